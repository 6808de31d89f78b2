//! Data-access boundary
//!
//! Every backend implements [`DataStore`]. Methods never return `Err`:
//! failures are logged here and folded into the `error` field of the result
//! so the UI can show a banner and keep going.

mod memory;
mod postgres;
mod rest;
mod sql;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use rest::RestStore;
pub use sql::SqlBuilder;

use crate::error::ClientResult;
use crate::query::QueryPlan;
use async_trait::async_trait;
use shared::models::{Empleado, EmpleadoInput, ListParams};
use std::collections::BTreeMap;

/// One page of rows plus the exact total
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListResult {
    pub data: Vec<Empleado>,
    pub count: Option<u64>,
    pub error: Option<String>,
}

impl ListResult {
    pub fn ok(data: Vec<Empleado>, count: u64) -> Self {
        Self {
            data,
            count: Some(count),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            count: None,
            error: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of a single-row insert
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertResult {
    pub data: Option<Empleado>,
    pub error: Option<String>,
}

impl InsertResult {
    pub fn ok(row: Empleado) -> Self {
        Self {
            data: Some(row),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Backend-specific operations; fallible, wrapped by [`DataStore`]
#[async_trait]
pub trait Backend: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &'static str;

    async fn fetch_page(&self, plan: &QueryPlan) -> ClientResult<(Vec<Empleado>, u64)>;

    async fn insert_row(&self, input: &EmpleadoInput) -> ClientResult<Empleado>;

    /// Raw `nv` column of every row (used for link statistics)
    async fn fetch_tags(&self) -> ClientResult<Vec<Option<String>>>;
}

/// Infallible store interface used by the UI layers
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn list(&self, params: &ListParams) -> ListResult;

    async fn insert(&self, input: &EmpleadoInput) -> InsertResult;

    /// Employee count per raw tag; `None` key for untagged rows
    async fn tag_counts(&self) -> Result<BTreeMap<Option<String>, u64>, String>;
}

#[async_trait]
impl<B: Backend> DataStore for B {
    async fn list(&self, params: &ListParams) -> ListResult {
        let plan = QueryPlan::from_params(params);
        tracing::debug!(backend = self.name(), ?plan, "Listing empleados");
        match self.fetch_page(&plan).await {
            Ok((data, count)) => ListResult::ok(data, count),
            Err(e) => {
                tracing::warn!(backend = self.name(), error = %e, "List query failed");
                ListResult::failed(e.to_string())
            }
        }
    }

    async fn insert(&self, input: &EmpleadoInput) -> InsertResult {
        match self.insert_row(input).await {
            Ok(row) => {
                tracing::info!(backend = self.name(), id = %row.id, nv = %input.nv, "Empleado registered");
                InsertResult::ok(row)
            }
            Err(e) => {
                tracing::error!(backend = self.name(), error = %e, nv = %input.nv, "Insert failed");
                InsertResult::failed(e.to_string())
            }
        }
    }

    async fn tag_counts(&self) -> Result<BTreeMap<Option<String>, u64>, String> {
        match self.fetch_tags().await {
            Ok(tags) => {
                let mut counts = BTreeMap::new();
                for tag in tags {
                    let tag = tag.filter(|t| !t.trim().is_empty());
                    *counts.entry(tag).or_insert(0) += 1;
                }
                Ok(counts)
            }
            Err(e) => {
                tracing::warn!(backend = self.name(), error = %e, "Tag query failed");
                Err(e.to_string())
            }
        }
    }
}
