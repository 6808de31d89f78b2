//! PostgREST backend over HTTPS

use super::Backend;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::query::QueryPlan;
use async_trait::async_trait;
use reqwest::{Client, header};
use serde::de::DeserializeOwned;
use shared::models::{EMPLEADOS_TABLE, Empleado, EmpleadoInput};

/// Error body returned by PostgREST
#[derive(serde::Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    message: String,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

/// Rows requested per tag page; PostgREST may still cap it lower
const TAG_PAGE_SIZE: u64 = 1000;

#[derive(serde::Deserialize)]
struct TagRow {
    nv: Option<String>,
}

/// REST client for the hosted `empleados` collection
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    rest_url: String,
}

impl RestStore {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("REST base URL is empty".into()));
        }

        let mut headers = header::HeaderMap::new();
        headers.insert("apikey", header_value(&config.anon_key)?);
        headers.insert(
            header::AUTHORIZATION,
            header_value(&format!("Bearer {}", config.anon_key))?,
        );
        headers.insert("x-client-info", header_value(&config.client_info)?);

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            rest_url: config.rest_url(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/{}", self.rest_url, EMPLEADOS_TABLE)
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<(T, Option<u64>)> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            if let Ok(err) = serde_json::from_str::<PostgrestError>(&text) {
                return Err(ClientError::Api {
                    code: err.code,
                    message: err.message,
                    details: err.details,
                    hint: err.hint,
                });
            }
            return Err(ClientError::InvalidResponse(format!("{status}: {text}")));
        }

        let total = response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total);
        let body = response.json().await?;
        Ok((body, total))
    }
}

fn header_value(value: &str) -> ClientResult<header::HeaderValue> {
    header::HeaderValue::from_str(value)
        .map_err(|e| ClientError::Config(format!("invalid header value: {e}")))
}

/// One page of the tag column, in a stable order
fn tag_page_query(offset: u64) -> [(&'static str, String); 4] {
    [
        ("select", "nv".to_string()),
        ("order", "id.asc".to_string()),
        ("offset", offset.to_string()),
        ("limit", TAG_PAGE_SIZE.to_string()),
    ]
}

/// Another tag page is due while the reported total is not reached; without
/// a total, only a full page implies more
fn more_tag_pages(fetched: usize, seen: u64, total: Option<u64>) -> bool {
    if fetched == 0 {
        return false;
    }
    match total {
        Some(total) => seen < total,
        None => fetched as u64 >= TAG_PAGE_SIZE,
    }
}

/// Total from a `Content-Range` header such as `0-19/45` or `*/0`
pub fn parse_content_range_total(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

#[async_trait]
impl Backend for RestStore {
    fn name(&self) -> &'static str {
        "rest"
    }

    async fn fetch_page(&self, plan: &QueryPlan) -> ClientResult<(Vec<Empleado>, u64)> {
        let response = self
            .client
            .get(self.table_url())
            .query(&plan.to_postgrest())
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let (rows, total): (Vec<Empleado>, _) = Self::handle_response(response).await?;
        let total = total.ok_or_else(|| {
            ClientError::InvalidResponse("missing Content-Range total".to_string())
        })?;
        Ok((rows, total))
    }

    async fn insert_row(&self, input: &EmpleadoInput) -> ClientResult<Empleado> {
        let response = self
            .client
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(&[input])
            .send()
            .await?;
        let (rows, _): (Vec<Empleado>, _) = Self::handle_response(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ClientError::InvalidResponse("insert returned no row".to_string()))
    }

    async fn fetch_tags(&self) -> ClientResult<Vec<Option<String>>> {
        let mut tags = Vec::new();
        loop {
            let response = self
                .client
                .get(self.table_url())
                .query(&tag_page_query(tags.len() as u64))
                .header("Prefer", "count=exact")
                .send()
                .await?;
            let (rows, total): (Vec<TagRow>, _) = Self::handle_response(response).await?;
            let fetched = rows.len();
            tags.extend(rows.into_iter().map(|r| r.nv));
            if !more_tag_pages(fetched, tags.len() as u64, total) {
                break;
            }
        }
        tracing::debug!(rows = tags.len(), "Fetched project tags");
        Ok(tags)
    }
}
