//! Entry link parsing: `https://host/formulario?nv=NV499` or a bare query

use reqwest::Url;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::ProjectTag;

const LOCAL_BASE: &str = "http://localhost/";

/// Extract and validate the `nv` parameter of an entry link
pub fn tag_from_entry(entry: &str) -> AppResult<ProjectTag> {
    let url = entry_url(entry.trim())?;
    let nv = url
        .query_pairs()
        .find(|(k, _)| k == "nv")
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::new(ErrorCode::ProjectTagMissing))?;
    ProjectTag::parse(nv.trim())
}

fn entry_url(entry: &str) -> AppResult<Url> {
    if entry.contains("://") {
        return Url::parse(entry).map_err(|e| {
            AppError::new(ErrorCode::ProjectTagMissing).with_detail("reason", e.to_string())
        });
    }
    let relative = if entry.starts_with(['/', '?']) {
        entry.to_string()
    } else {
        format!("?{entry}")
    };
    Url::parse(LOCAL_BASE)
        .and_then(|base| base.join(&relative))
        .map_err(|e| AppError::new(ErrorCode::ProjectTagMissing).with_detail("reason", e.to_string()))
}

/// Registration link for a project: `<origin>/formulario?nv=<tag>`
pub fn registration_url(origin: &str, tag: &ProjectTag) -> String {
    format!("{}/formulario?nv={}", origin.trim_end_matches('/'), tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url() {
        let tag = tag_from_entry("https://registro.example.cl/formulario?nv=NV499").unwrap();
        assert_eq!(tag.as_str(), "NV499");
    }

    #[test]
    fn test_bare_forms() {
        for entry in ["nv=NV12", "?nv=NV12", "/formulario?x=1&nv=NV12", "  nv=%20NV12%20"] {
            assert_eq!(tag_from_entry(entry).unwrap().as_str(), "NV12", "{entry}");
        }
    }

    #[test]
    fn test_missing_and_invalid() {
        assert_eq!(
            tag_from_entry("https://host/formulario").unwrap_err().code,
            ErrorCode::ProjectTagMissing
        );
        assert_eq!(tag_from_entry("nv=").unwrap_err().code, ErrorCode::ProjectTagMissing);
        assert_eq!(tag_from_entry("nv=abc").unwrap_err().code, ErrorCode::ProjectTagInvalid);
        assert_eq!(tag_from_entry("nv=nv499").unwrap_err().code, ErrorCode::ProjectTagInvalid);
    }

    #[test]
    fn test_registration_url() {
        let tag = ProjectTag::parse("NV499").unwrap();
        assert_eq!(
            registration_url("http://localhost:5173/", &tag),
            "http://localhost:5173/formulario?nv=NV499"
        );
    }
}
