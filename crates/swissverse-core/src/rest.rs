//! Blocking HTTP client for the hosted backend's PostgREST-style table API.
//!
//! One route per table under `/rest/v1/`, equality filters as `field=eq.v`
//! query parameters, API key sent as both `apikey` and bearer token. Calls
//! are issued sequentially; there is no retry policy, a failed call surfaces
//! as an error and the caller re-fetches.

use crate::config::Config;
use crate::error::{Result, SwissverseError};
use crate::table::{Query, TableClient};
use crate::types::Table;
use serde_json::Value;
use std::time::Duration;

pub struct RestTableClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl RestTableClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.backend.url.clone(),
            config.backend.effective_api_key(),
            Duration::from_secs(config.backend.timeout_secs),
        )
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authed(&self, req: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn check(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().unwrap_or_default();
        Err(SwissverseError::Backend {
            status: status.as_u16(),
            message,
        })
    }
}

impl TableClient for RestTableClient {
    fn fetch(&self, table: Table, query: &Query) -> Result<Vec<Value>> {
        let mut params: Vec<(String, String)> = vec![("select".to_string(), "*".to_string())];
        for (field, value) in &query.filters {
            params.push((field.clone(), format!("eq.{value}")));
        }
        if query.active_only {
            params.push(("is_active".to_string(), "eq.true".to_string()));
        }
        if let Some(field) = &query.sort_field {
            params.push(("order".to_string(), format!("{field}.asc")));
        }

        tracing::debug!(%table, filters = query.filters.len(), "fetch");
        let resp = self
            .authed(self.http.get(self.table_url(table)))
            .query(&params)
            .send()?;
        let rows: Vec<Value> = Self::check(resp)?.json()?;
        Ok(rows)
    }

    fn insert(&self, table: Table, row: Value) -> Result<Value> {
        tracing::debug!(%table, "insert");
        let resp = self
            .authed(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(&row)
            .send()?;
        let status = resp.status().as_u16();
        let mut rows: Vec<Value> = Self::check(resp)?.json()?;
        if rows.is_empty() {
            return Err(SwissverseError::Backend {
                status,
                message: "insert returned no representation".to_string(),
            });
        }
        Ok(rows.remove(0))
    }

    fn update(&self, table: Table, id: &str, fields: Value) -> Result<()> {
        tracing::debug!(%table, id, "update");
        let resp = self
            .authed(self.http.patch(self.table_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .json(&fields)
            .send()?;
        Self::check(resp)?;
        Ok(())
    }

    fn delete(&self, table: Table, id: &str) -> Result<()> {
        tracing::debug!(%table, id, "delete");
        let resp = self
            .authed(self.http.delete(self.table_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .send()?;
        Self::check(resp)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
