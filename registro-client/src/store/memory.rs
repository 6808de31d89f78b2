//! In-memory backend for demo mode and tests

use super::Backend;
use crate::error::{ClientError, ClientResult};
use crate::query::QueryPlan;
use async_trait::async_trait;
use chrono::Utc;
use shared::models::{Empleado, EmpleadoInput};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    rows: Vec<Empleado>,
    /// Next operations fail with this message
    fail_with: Option<String>,
    latency: Option<Duration>,
}

/// Rows kept in a `Vec`, evaluated with the reference plan semantics
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<Empleado>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                rows,
                ..Inner::default()
            })),
        }
    }

    pub async fn rows(&self) -> Vec<Empleado> {
        self.inner.read().await.rows.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.rows.is_empty()
    }

    /// Make every following call fail until cleared with `None`
    pub async fn set_failure(&self, message: Option<&str>) {
        self.inner.write().await.fail_with = message.map(str::to_string);
    }

    /// Delay every call, to exercise loading states
    pub async fn set_latency(&self, latency: Option<Duration>) {
        self.inner.write().await.latency = latency;
    }

    async fn simulate(&self) -> ClientResult<()> {
        let (latency, failure) = {
            let inner = self.inner.read().await;
            (inner.latency, inner.fail_with.clone())
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        match failure {
            Some(message) => Err(ClientError::InvalidResponse(message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Backend for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_page(&self, plan: &QueryPlan) -> ClientResult<(Vec<Empleado>, u64)> {
        self.simulate().await?;
        let inner = self.inner.read().await;

        let mut hits: Vec<&Empleado> = inner.rows.iter().filter(|r| plan.matches(r)).collect();
        hits.sort_by(|a, b| plan.compare(a, b));

        let total = hits.len() as u64;
        let page = hits
            .into_iter()
            .skip(plan.offset as usize)
            .take(plan.limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn insert_row(&self, input: &EmpleadoInput) -> ClientResult<Empleado> {
        self.simulate().await?;
        let row = Empleado::from_input(Uuid::new_v4(), input.clone(), Utc::now());
        self.inner.write().await.rows.push(row.clone());
        Ok(row)
    }

    async fn fetch_tags(&self) -> ClientResult<Vec<Option<String>>> {
        self.simulate().await?;
        Ok(self.inner.read().await.rows.iter().map(|r| r.nv.clone()).collect())
    }
}
