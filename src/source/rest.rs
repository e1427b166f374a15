//! REST data source for the hosted backend.
//!
//! Speaks the PostgREST dialect the hosted backend exposes: one resource per
//! table, filters as `column=op.value` query parameters, `order` and `limit`
//! parameters, and `Prefer: return=representation` on writes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;
use uuid::Uuid;

use crate::config::RestBackendConfig;
use crate::error::{DashboardError, DashboardResult};

use super::{DataSource, FilterOp, Query, Row, Table};

/// Environment variable consulted when the configuration carries no key.
pub const API_KEY_ENV: &str = "BIZDASH_API_KEY";

/// Client for the hosted backend's REST interface.
pub struct RestSource {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestSource {
    /// Creates a source from configuration, falling back to the
    /// `BIZDASH_API_KEY` environment variable for the key.
    pub fn from_config(config: &RestBackendConfig) -> DashboardResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .ok_or_else(|| DashboardError::ConfigParseError {
                path: "backend.api_key".to_string(),
                message: format!("API key not provided and {} env var not set", API_KEY_ENV),
            })?;

        Self::new(&config.base_url, &api_key, config.timeout_secs)
    }

    /// Creates a source with explicit parameters.
    pub fn new(base_url: &str, api_key: &str, timeout_secs: u64) -> DashboardResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| DashboardError::Source {
                table: "*".to_string(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/{}", self.base_url, table.name())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn send(table: Table, request: RequestBuilder) -> DashboardResult<Vec<Row>> {
        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "Request timed out".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                format!("Request failed: {}", e)
            };
            DashboardError::Source {
                table: table.to_string(),
                message,
            }
        })?;

        Self::read_rows(table, response).await
    }

    async fn read_rows(table: Table, response: Response) -> DashboardResult<Vec<Row>> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DashboardError::Source {
                table: table.to_string(),
                message: format!("Backend error ({}): {}", status, body),
            });
        }

        response.json().await.map_err(|e| DashboardError::Source {
            table: table.to_string(),
            message: format!("Failed to parse response: {}", e),
        })
    }
}

/// Escapes the `LIKE` metacharacters `\`, `%` and `_` so a contains filter
/// matches them literally, as the in-memory source does.
///
/// PostgREST turns every `*` into `%`, so a `*` in the search text still
/// acts as a wildcard against the hosted backend.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Renders a query as PostgREST query parameters.
///
/// # Example
///
/// ```
/// use bizdash::source::{Query, Table, query_params};
/// use chrono::NaiveDate;
///
/// let query = Query::table(Table::LeaveRequests)
///     .lte("start_date", NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
///     .gte("end_date", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
///
/// assert_eq!(
///     query_params(&query),
///     vec![
///         ("start_date".to_string(), "lte.2024-03-31".to_string()),
///         ("end_date".to_string(), "gte.2024-03-01".to_string()),
///     ]
/// );
/// ```
pub fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = query
        .filters
        .iter()
        .map(|filter| {
            let operand = match filter.op {
                FilterOp::Contains => {
                    format!("*{}*", escape_like(&filter.value.to_query_string()))
                }
                _ => filter.value.to_query_string(),
            };
            (
                filter.column.clone(),
                format!("{}.{}", filter.op.as_str(), operand),
            )
        })
        .collect();

    if let Some(order) = &query.order {
        let direction = if order.ascending { "asc" } else { "desc" };
        params.push(("order".to_string(), format!("{}.{}", order.column, direction)));
    }

    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }

    params
}

#[async_trait]
impl DataSource for RestSource {
    async fn select(&self, query: &Query) -> DashboardResult<Vec<Row>> {
        let params = query_params(query);
        debug!(table = %query.table, params = ?params, "REST select");

        let request = self
            .authorized(self.client.get(self.table_url(query.table)))
            .query(&params);
        Self::send(query.table, request).await
    }

    async fn insert(&self, table: Table, row: Row) -> DashboardResult<Row> {
        debug!(table = %table, "REST insert");

        let request = self
            .authorized(self.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&row);
        Self::send(table, request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DashboardError::Source {
                table: table.to_string(),
                message: "Insert returned no row".to_string(),
            })
    }

    async fn update(&self, table: Table, id: Uuid, patch: Row) -> DashboardResult<Option<Row>> {
        debug!(table = %table, id = %id, "REST update");

        let request = self
            .authorized(self.client.patch(self.table_url(table)))
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(&patch);
        Ok(Self::send(table, request).await?.into_iter().next())
    }
}
