//! Organizer panel: one registration link per project tag

use super::Clipboard;
use crate::form::registration_url;
use crate::store::DataStore;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::ProjectTag;
use shared::util::digits_only;
use std::collections::{BTreeMap, BTreeSet};

/// Digits accepted in the new-project input
pub const CODE_LEN: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRow {
    pub tag: ProjectTag,
    pub count: u64,
    pub url: String,
}

impl LinkRow {
    /// Legacy bucket; it has no usable link
    pub fn is_historical(&self) -> bool {
        self.tag.is_sentinel()
    }

    pub fn label(&self) -> &str {
        if self.is_historical() {
            "HISTÓRICO"
        } else {
            self.tag.as_str()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    pub links: usize,
    pub employees: u64,
    pub historical: u64,
}

pub struct LinkPanel {
    origin: String,
    rows: Vec<LinkRow>,
    /// Minted this session; no employee carries them yet
    generated: BTreeSet<ProjectTag>,
    code_input: String,
}

impl LinkPanel {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            rows: Vec::new(),
            generated: BTreeSet::new(),
            code_input: String::new(),
        }
    }

    pub fn rows(&self) -> &[LinkRow] {
        &self.rows
    }

    pub fn code_input(&self) -> &str {
        &self.code_input
    }

    /// Replace the rows with fresh per-tag counts
    ///
    /// Untagged and malformed tags are grouped under the sentinel.
    pub fn load(&mut self, counts: &BTreeMap<Option<String>, u64>) {
        let mut merged: BTreeMap<ProjectTag, u64> = BTreeMap::new();
        for (raw, count) in counts {
            *merged.entry(ProjectTag::from_stored(raw.as_deref())).or_insert(0) += count;
        }
        for tag in &self.generated {
            merged.entry(tag.clone()).or_insert(0);
        }

        self.rows = merged
            .into_iter()
            .map(|(tag, count)| LinkRow {
                url: registration_url(&self.origin, &tag),
                tag,
                count,
            })
            .collect();
        self.rows.sort_by(|a, b| {
            let key = |r: &LinkRow| (r.is_historical(), r.tag.as_str().len());
            key(a).cmp(&key(b)).then_with(|| a.tag.cmp(&b.tag))
        });
    }

    /// Fetch the counts from the store and reload
    pub async fn refresh(&mut self, store: &dyn DataStore) -> AppResult<()> {
        let counts = store.tag_counts().await.map_err(AppError::database)?;
        self.load(&counts);
        Ok(())
    }

    pub fn stats(&self) -> LinkStats {
        LinkStats {
            links: self.rows.len(),
            employees: self.rows.iter().map(|r| r.count).sum(),
            historical: self
                .rows
                .iter()
                .filter(|r| r.is_historical())
                .map(|r| r.count)
                .sum(),
        }
    }

    /// Edit the new-project input; digits only, at most three
    pub fn type_code(&mut self, text: &str) {
        let mut digits = digits_only(text);
        digits.truncate(CODE_LEN);
        self.code_input = digits;
    }

    /// Mint a link for the typed code and copy it
    pub fn generate(&mut self, clipboard: &mut dyn Clipboard) -> AppResult<LinkRow> {
        let tag = ProjectTag::from_code(&self.code_input)?;
        if self.rows.iter().any(|r| r.tag == tag) {
            return Err(AppError::with_message(
                ErrorCode::ProjectTagExists,
                format!("El código {tag} ya existe"),
            ));
        }
        let row = LinkRow {
            url: registration_url(&self.origin, &tag),
            tag: tag.clone(),
            count: 0,
        };
        clipboard.copy(&row.url)?;
        tracing::info!(tag = %tag, "Registration link generated");

        self.generated.insert(tag);
        self.rows.push(row.clone());
        self.code_input.clear();
        Ok(row)
    }

    /// Copy the link of an existing row
    pub fn copy(&self, index: usize, clipboard: &mut dyn Clipboard) -> AppResult<String> {
        let row = self
            .rows
            .get(index)
            .ok_or_else(|| AppError::not_found(format!("link {index}")))?;
        if row.is_historical() {
            return Err(AppError::invalid_request("El histórico no tiene enlace"));
        }
        clipboard.copy(&row.url)?;
        Ok(row.url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::MemoryClipboard;

    fn counts() -> BTreeMap<Option<String>, u64> {
        BTreeMap::from([
            (None, 2),
            (Some("NV000".to_string()), 3),
            (Some("NV499".to_string()), 4),
            (Some("NV12".to_string()), 1),
        ])
    }

    fn panel() -> LinkPanel {
        let mut p = LinkPanel::new("http://localhost:5173");
        p.load(&counts());
        p
    }

    #[test]
    fn test_rows_and_stats() {
        let p = panel();
        let labels: Vec<&str> = p.rows().iter().map(|r| r.label()).collect();
        assert_eq!(labels, ["NV12", "NV499", "HISTÓRICO"]);
        assert_eq!(p.rows()[1].url, "http://localhost:5173/formulario?nv=NV499");
        assert_eq!(
            p.stats(),
            LinkStats {
                links: 3,
                employees: 10,
                historical: 5
            }
        );
    }

    #[test]
    fn test_code_input_digits_only() {
        let mut p = panel();
        p.type_code("a5b0-17");
        assert_eq!(p.code_input(), "501");
    }

    #[test]
    fn test_generate() {
        let mut p = panel();
        let mut clip = MemoryClipboard::new();

        p.type_code("12");
        assert_eq!(p.generate(&mut clip).unwrap_err().code, ErrorCode::ProjectCodeInvalid);

        p.type_code("499");
        let err = p.generate(&mut clip).unwrap_err();
        assert_eq!(err.code, ErrorCode::ProjectTagExists);
        assert_eq!(err.message, "El código NV499 ya existe");
        assert!(clip.contents().is_none());

        p.type_code("500");
        let row = p.generate(&mut clip).unwrap();
        assert_eq!(row.count, 0);
        assert_eq!(clip.contents(), Some("http://localhost:5173/formulario?nv=NV500"));
        assert_eq!(p.code_input(), "");

        // survives a reload, still counts as taken
        p.load(&counts());
        assert!(p.rows().iter().any(|r| r.tag.as_str() == "NV500"));
        p.type_code("500");
        assert!(p.generate(&mut clip).is_err());
    }

    #[test]
    fn test_clipboard_failure_is_reported() {
        let mut p = panel();
        let mut clip = MemoryClipboard::failing();
        p.type_code("777");
        assert_eq!(p.generate(&mut clip).unwrap_err().code, ErrorCode::ClipboardError);
        assert_eq!(p.code_input(), "777");
        assert_eq!(p.stats().links, 3);
    }

    #[test]
    fn test_copy_existing() {
        let p = panel();
        let mut clip = MemoryClipboard::new();
        assert_eq!(p.copy(0, &mut clip).unwrap(), "http://localhost:5173/formulario?nv=NV12");
        assert!(p.copy(2, &mut clip).is_err());
        assert!(p.copy(9, &mut clip).is_err());
    }
}
