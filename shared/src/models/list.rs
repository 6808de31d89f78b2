//! List query parameters for the personnel table
//!
//! [`ListParams`] is an immutable value. UI events are expressed as
//! [`ParamChange`]s and folded in with [`ListParams::apply`], which returns a
//! new value and never touches the old one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Columns the table can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CreatedAt,
    Nombre,
    Apellido,
    NumeroDocumento,
    EmailPersonal,
    FechaNacimiento,
    Nv,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Nombre => "nombre",
            SortField::Apellido => "apellido",
            SortField::NumeroDocumento => "numero_documento",
            SortField::EmailPersonal => "email_personal",
            SortField::FechaNacimiento => "fecha_nacimiento",
            SortField::Nv => "nv",
        }
    }
}

/// Single-column ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub field: SortField,
    pub asc: bool,
}

impl Sort {
    pub const fn new(field: SortField, asc: bool) -> Self {
        Self { field, asc }
    }
}

impl Default for Sort {
    /// Newest first
    fn default() -> Self {
        Self::new(SortField::CreatedAt, false)
    }
}

/// The orderings offered in the filter bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPreset {
    Newest,
    Oldest,
    NameAsc,
    NameDesc,
}

impl SortPreset {
    pub const ALL: [SortPreset; 4] = [
        SortPreset::Newest,
        SortPreset::Oldest,
        SortPreset::NameAsc,
        SortPreset::NameDesc,
    ];

    pub fn sort(&self) -> Sort {
        match self {
            SortPreset::Newest => Sort::new(SortField::CreatedAt, false),
            SortPreset::Oldest => Sort::new(SortField::CreatedAt, true),
            SortPreset::NameAsc => Sort::new(SortField::Nombre, true),
            SortPreset::NameDesc => Sort::new(SortField::Nombre, false),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortPreset::Newest => "Más recientes",
            SortPreset::Oldest => "Más antiguos",
            SortPreset::NameAsc => "Nombre A-Z",
            SortPreset::NameDesc => "Nombre Z-A",
        }
    }

    /// Preset matching a sort, if any
    pub fn of(sort: Sort) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.sort() == sort)
    }

    /// Next preset, wrapping around
    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|p| p == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}

/// Columns that accept an equality filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
    Sexo,
    Salud,
    FondoCotizacion,
    EstadoCivil,
    Nv,
}

impl FilterKey {
    pub const ALL: [FilterKey; 5] = [
        FilterKey::Sexo,
        FilterKey::Salud,
        FilterKey::FondoCotizacion,
        FilterKey::EstadoCivil,
        FilterKey::Nv,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            FilterKey::Sexo => "sexo",
            FilterKey::Salud => "salud",
            FilterKey::FondoCotizacion => "fondo_cotizacion",
            FilterKey::EstadoCivil => "estado_civil",
            FilterKey::Nv => "nv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterKey::Sexo => "Sexo",
            FilterKey::Salud => "Salud",
            FilterKey::FondoCotizacion => "AFP",
            FilterKey::EstadoCivil => "Estado civil",
            FilterKey::Nv => "Proyecto",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for FilterKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|k| k.column() == s).ok_or(())
    }
}

/// Removable summary entry for an active search or filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    /// `None` for the search chip
    pub key: Option<FilterKey>,
    pub label: String,
}

/// One UI-originated edit to [`ListParams`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamChange {
    Search(String),
    Sort(Sort),
    /// Empty value removes the filter
    Filter(FilterKey, String),
    RemoveFilter(FilterKey),
    ClearAll,
    Page(u32),
    PageSize(u32),
}

/// Table query state
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListParams {
    pub search: String,
    pub sort: Sort,
    pub filters: BTreeMap<FilterKey, String>,
    /// 1-based
    pub page: u32,
    pub page_size: u32,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: Sort::default(),
            filters: BTreeMap::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListParams {
    pub fn with_page_size(page_size: u32) -> Self {
        Self {
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            ..Self::default()
        }
    }

    /// Fold one change into a new value
    ///
    /// Search, sort and filter changes go back to page 1.
    pub fn apply(&self, change: ParamChange) -> Self {
        let mut next = self.clone();
        match change {
            ParamChange::Search(search) => {
                next.search = search;
                next.page = 1;
            }
            ParamChange::Sort(sort) => {
                next.sort = sort;
                next.page = 1;
            }
            ParamChange::Filter(key, value) => {
                let value = value.trim();
                if value.is_empty() {
                    next.filters.remove(&key);
                } else {
                    next.filters.insert(key, value.to_string());
                }
                next.page = 1;
            }
            ParamChange::RemoveFilter(key) => {
                next.filters.remove(&key);
                next.page = 1;
            }
            ParamChange::ClearAll => {
                next = Self {
                    page_size: self.page_size,
                    ..Self::default()
                };
            }
            ParamChange::Page(page) => next.page = page.max(1),
            ParamChange::PageSize(size) => {
                next.page_size = size.clamp(1, MAX_PAGE_SIZE);
                next.page = 1;
            }
        }
        next
    }

    /// Search text after trimming, if any
    pub fn search_term(&self) -> Option<&str> {
        let s = self.search.trim();
        (!s.is_empty()).then_some(s)
    }

    /// Filters with a non-empty value
    pub fn active_filters(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.filters
            .iter()
            .map(|(k, v)| (*k, v.trim()))
            .filter(|(_, v)| !v.is_empty())
    }

    /// Active filters, plus one for the search text
    pub fn active_filter_count(&self) -> usize {
        self.active_filters().count() + usize::from(self.search_term().is_some())
    }

    pub fn has_active_filters(&self) -> bool {
        self.active_filter_count() > 0
    }

    pub fn chips(&self) -> Vec<FilterChip> {
        let mut chips = Vec::new();
        if let Some(term) = self.search_term() {
            chips.push(FilterChip {
                key: None,
                label: format!("\"{term}\""),
            });
        }
        chips.extend(self.active_filters().map(|(key, value)| FilterChip {
            key: Some(key),
            label: format!("{}: {value}", key.label()),
        }));
        chips
    }

    /// Inclusive row range `[(page-1)*size, page*size-1]`
    pub fn range(&self) -> (u64, u64) {
        let size = u64::from(self.page_size.clamp(1, MAX_PAGE_SIZE));
        let page = u64::from(self.page.max(1));
        ((page - 1) * size, page * size - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let p = ListParams::default();
        assert_eq!(p.sort, Sort::new(SortField::CreatedAt, false));
        assert_eq!(p.page, 1);
        assert_eq!(p.page_size, 20);
        assert_eq!(p.active_filter_count(), 0);
        assert_eq!(ListParams::with_page_size(5000).page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_apply_is_pure_and_resets_page() {
        let p = ListParams::default().apply(ParamChange::Page(3));
        assert_eq!(p.page, 3);

        let q = p.apply(ParamChange::Search("rojas".into()));
        assert_eq!(p.page, 3);
        assert_eq!(p.search, "");
        assert_eq!(q.page, 1);
        assert_eq!(q.search, "rojas");

        let r = p.apply(ParamChange::Filter(FilterKey::Sexo, "Femenino".into()));
        assert_eq!(r.page, 1);
        let s = p.apply(ParamChange::Sort(SortPreset::NameAsc.sort()));
        assert_eq!(s.page, 1);
    }

    #[test]
    fn test_empty_filter_value_removes_key() {
        let p = ListParams::default()
            .apply(ParamChange::Filter(FilterKey::Salud, "Fonasa".into()))
            .apply(ParamChange::Filter(FilterKey::Salud, "  ".into()));
        assert!(p.filters.is_empty());
    }

    #[test]
    fn test_clear_all_keeps_page_size() {
        let p = ListParams::with_page_size(100)
            .apply(ParamChange::Search("x".into()))
            .apply(ParamChange::Filter(FilterKey::Nv, "NV499".into()))
            .apply(ParamChange::Sort(SortPreset::Oldest.sort()))
            .apply(ParamChange::Page(4))
            .apply(ParamChange::ClearAll);
        assert_eq!(p, ListParams::with_page_size(100));
    }

    #[test]
    fn test_active_count_and_chips() {
        let p = ListParams::default()
            .apply(ParamChange::Search("  ana ".into()))
            .apply(ParamChange::Filter(FilterKey::Sexo, "Femenino".into()))
            .apply(ParamChange::Filter(FilterKey::FondoCotizacion, "Habitat".into()));
        assert_eq!(p.active_filter_count(), 3);
        let chips = p.chips();
        assert_eq!(chips[0].label, "\"ana\"");
        assert_eq!(chips[0].key, None);
        assert_eq!(chips[1].label, "Sexo: Femenino");
        assert_eq!(chips[2].label, "AFP: Habitat");

        let p = p.apply(ParamChange::RemoveFilter(FilterKey::Sexo));
        assert_eq!(p.active_filter_count(), 2);
    }

    #[test]
    fn test_range() {
        let p = ListParams::default().apply(ParamChange::Page(2));
        assert_eq!(p.range(), (20, 39));
        let p = ListParams::with_page_size(100);
        assert_eq!(p.range(), (0, 99));
        let p = ListParams::default().apply(ParamChange::Page(0));
        assert_eq!(p.page, 1);
    }

    #[test]
    fn test_sort_presets() {
        assert_eq!(SortPreset::of(Sort::default()), Some(SortPreset::Newest));
        assert_eq!(SortPreset::of(Sort::new(SortField::Apellido, true)), None);
        assert_eq!(SortPreset::NameDesc.next(), SortPreset::Newest);
        assert_eq!(SortPreset::NameAsc.label(), "Nombre A-Z");
    }

    #[test]
    fn test_filter_key_from_str() {
        assert_eq!("estado_civil".parse::<FilterKey>(), Ok(FilterKey::EstadoCivil));
        assert!("banco".parse::<FilterKey>().is_err());
    }
}
