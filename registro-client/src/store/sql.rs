//! SQL rendering of a [`QueryPlan`] for Postgres

use crate::query::{QueryPlan, SEARCH_COLUMNS, escape_like};
use shared::models::{EMPLEADOS_TABLE, TAG_PATTERN};
use sqlx::Postgres;
use sqlx::postgres::PgArguments;
use sqlx::query::{QueryAs, QueryScalar};

/// Dynamic WHERE clause with numbered `$n` placeholders
///
/// Column names only ever come from closed enums; user text is always bound.
#[derive(Debug, Default)]
pub struct SqlBuilder {
    conditions: Vec<String>,
    bindings: Vec<String>,
}

impl SqlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Conditions for everything in the plan except paging and order
    pub fn from_plan(plan: &QueryPlan) -> Self {
        let mut builder = Self::new();
        if let Some(term) = &plan.search {
            builder.add_search_condition(&SEARCH_COLUMNS, term);
        }
        for (key, value) in &plan.equals {
            if QueryPlan::is_untagged_filter(*key, value) {
                builder.add_untagged_condition(key.column(), value);
            } else {
                builder.add_eq_condition(key.column(), value);
            }
        }
        builder
    }

    fn next_placeholder(&self) -> String {
        format!("${}", self.bindings.len() + 1)
    }

    /// `column = $n`
    pub fn add_eq_condition(&mut self, column: &str, value: &str) -> &mut Self {
        let placeholder = self.next_placeholder();
        self.conditions.push(format!("{column} = {placeholder}"));
        self.bindings.push(value.to_string());
        self
    }

    /// `column` is missing, equal to the sentinel, or not a well-formed tag
    pub fn add_untagged_condition(&mut self, column: &str, sentinel: &str) -> &mut Self {
        let eq = self.next_placeholder();
        self.bindings.push(sentinel.to_string());
        let pattern = self.next_placeholder();
        self.bindings.push(TAG_PATTERN.to_string());
        self.conditions
            .push(format!("({column} IS NULL OR {column} = {eq} OR {column} !~ {pattern})"));
        self
    }

    /// Case-insensitive substring match over several columns, OR-ed
    pub fn add_search_condition(&mut self, columns: &[&str], term: &str) -> &mut Self {
        let placeholder = self.next_placeholder();
        let parts: Vec<String> = columns
            .iter()
            .map(|col| format!("{col} ILIKE {placeholder} ESCAPE '\\'"))
            .collect();
        self.conditions.push(format!("({})", parts.join(" OR ")));
        self.bindings.push(format!("%{}%", escape_like(term)));
        self
    }

    /// Build WHERE clause (empty if no conditions)
    pub fn build_where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn bindings(&self) -> &[String] {
        &self.bindings
    }

    /// Page query: filtered, ordered, limited
    pub fn select_sql(&self, plan: &QueryPlan) -> String {
        let dir = if plan.sort.asc { "ASC" } else { "DESC" };
        format!(
            "SELECT * FROM {EMPLEADOS_TABLE}{} ORDER BY {} {dir}, id LIMIT {} OFFSET {}",
            self.build_where_clause(),
            plan.sort.field.column(),
            plan.limit,
            plan.offset,
        )
    }

    /// Total rows matching the same conditions
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM {EMPLEADOS_TABLE}{}", self.build_where_clause())
    }

    /// Apply bindings to a `query_as`
    pub fn apply_bindings<'a, O>(
        &'a self,
        mut query: QueryAs<'a, Postgres, O, PgArguments>,
    ) -> QueryAs<'a, Postgres, O, PgArguments> {
        for value in &self.bindings {
            query = query.bind(value);
        }
        query
    }

    /// Apply bindings to a `query_scalar`
    pub fn apply_bindings_scalar<'a, O>(
        &'a self,
        mut query: QueryScalar<'a, Postgres, O, PgArguments>,
    ) -> QueryScalar<'a, Postgres, O, PgArguments> {
        for value in &self.bindings {
            query = query.bind(value);
        }
        query
    }
}
