//! Query pipeline: list parameters to a backend-neutral plan
//!
//! `ListParams` → [`QueryPlan`] is pure and does all normalization (trimmed
//! search, dropped empty filters, clamped paging). Each store renders the
//! plan in its own dialect; [`QueryPlan::matches`] and
//! [`QueryPlan::compare`] are the reference semantics used by the
//! in-memory store.

use shared::models::{Empleado, FilterKey, ListParams, ProjectTag, Sort, SortField, TAG_PATTERN};
use std::cmp::Ordering;

/// Columns searched by the free-text box, OR-ed together
pub const SEARCH_COLUMNS: [&str; 4] = ["nombre", "apellido", "numero_documento", "email_personal"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    /// Trimmed, non-empty search text
    pub search: Option<String>,
    /// Equality conditions, AND-ed with each other and with the search
    pub equals: Vec<(FilterKey, String)>,
    pub sort: Sort,
    pub offset: u64,
    pub limit: u64,
}

impl QueryPlan {
    pub fn from_params(params: &ListParams) -> Self {
        let (from, to) = params.range();
        Self {
            search: params.search_term().map(str::to_string),
            equals: params
                .active_filters()
                .map(|(k, v)| (k, v.to_string()))
                .collect(),
            sort: params.sort,
            offset: from,
            limit: to - from + 1,
        }
    }

    /// No search and no filters
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_none() && self.equals.is_empty()
    }

    /// Whether a condition selects the sentinel tag, which also covers
    /// rows with a missing or malformed tag
    pub fn is_untagged_filter(key: FilterKey, value: &str) -> bool {
        key == FilterKey::Nv && value == ProjectTag::SENTINEL
    }

    /// Inclusive row range
    pub fn range(&self) -> (u64, u64) {
        (self.offset, self.offset + self.limit - 1)
    }

    // ========== PostgREST ==========

    /// Query-string pairs for `GET /rest/v1/empleados`
    pub fn to_postgrest(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_string(), "*".to_string())];
        // OR groups; more than one has to be nested under a single `and`
        let mut groups: Vec<String> = Vec::new();

        if let Some(term) = &self.search {
            let value = postgrest_quote(&format!("*{}*", escape_like(term)));
            let ors: Vec<String> = SEARCH_COLUMNS
                .iter()
                .map(|col| format!("{col}.ilike.{value}"))
                .collect();
            groups.push(ors.join(","));
        }

        for (key, value) in &self.equals {
            if Self::is_untagged_filter(*key, value) {
                let col = key.column();
                groups.push(format!(
                    "{col}.is.null,{col}.eq.{value},{col}.not.match.{}",
                    postgrest_quote(TAG_PATTERN)
                ));
            } else {
                pairs.push((key.column().to_string(), format!("eq.{value}")));
            }
        }

        match groups.as_slice() {
            [] => {}
            [single] => pairs.push(("or".to_string(), format!("({single})"))),
            many => {
                let nested: Vec<String> = many.iter().map(|g| format!("or({g})")).collect();
                pairs.push(("and".to_string(), format!("({})", nested.join(","))));
            }
        }

        let dir = if self.sort.asc { "asc" } else { "desc" };
        pairs.push(("order".to_string(), format!("{}.{dir}", self.sort.field.column())));
        pairs.push(("offset".to_string(), self.offset.to_string()));
        pairs.push(("limit".to_string(), self.limit.to_string()));
        pairs
    }

    // ========== Reference evaluation ==========

    /// Whether a row satisfies the search and all filters
    pub fn matches(&self, row: &Empleado) -> bool {
        if let Some(term) = &self.search {
            let needle = term.to_lowercase();
            let hit = [
                row.nombre.as_str(),
                row.apellido.as_str(),
                row.numero_documento.as_str(),
                row.email_personal.as_str(),
            ]
            .iter()
            .any(|v| v.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        self.equals.iter().all(|(key, value)| match key {
            FilterKey::Sexo => row.sexo.as_str() == value,
            FilterKey::Salud => row.salud.as_str() == value,
            FilterKey::FondoCotizacion => row.fondo_cotizacion.as_str() == value,
            FilterKey::EstadoCivil => row.estado_civil.as_str() == value,
            FilterKey::Nv if value == ProjectTag::SENTINEL => row.project_tag().is_sentinel(),
            FilterKey::Nv => row.nv.as_deref() == Some(value.as_str()),
        })
    }

    /// Row ordering for the plan's sort
    pub fn compare(&self, a: &Empleado, b: &Empleado) -> Ordering {
        let ord = match self.sort.field {
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Nombre => a.nombre.cmp(&b.nombre),
            SortField::Apellido => a.apellido.cmp(&b.apellido),
            SortField::NumeroDocumento => a.numero_documento.cmp(&b.numero_documento),
            SortField::EmailPersonal => a.email_personal.cmp(&b.email_personal),
            SortField::FechaNacimiento => a.fecha_nacimiento.cmp(&b.fecha_nacimiento),
            SortField::Nv => a.nv.cmp(&b.nv),
        };
        if self.sort.asc { ord } else { ord.reverse() }
    }
}

/// Escape LIKE metacharacters (backslash is the escape character)
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Double-quote a value inside a PostgREST logic tree so commas,
/// parentheses and dots are taken literally
fn postgrest_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        if matches!(ch, '\\' | '"') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}
