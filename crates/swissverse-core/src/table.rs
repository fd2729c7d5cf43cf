//! The boundary to the hosted backend's table storage.
//!
//! Everything above this trait works in terms of JSON rows; typed row structs
//! live in `content` and cross the boundary via serde. Two implementations
//! exist: `rest::RestTableClient` for the real backend and
//! `memory::MemoryTableClient` for tests and offline dry runs.

use crate::error::Result;
use crate::types::Table;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Row selection for a fetch: equality filters, optional ascending sort,
/// optional `is_active = true` restriction (public views).
#[derive(Debug, Clone, Default)]
pub struct Query {
    pub filters: Vec<(String, String)>,
    pub sort_field: Option<String>,
    pub active_only: bool,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn sorted_by(mut self, field: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self
    }

    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }
}

// ---------------------------------------------------------------------------
// TableClient
// ---------------------------------------------------------------------------

pub trait TableClient {
    /// All rows matching `query`. An empty table is `Ok(vec![])`, not an error.
    fn fetch(&self, table: Table, query: &Query) -> Result<Vec<Value>>;

    /// Insert one row; the returned row carries the backend-assigned `id`.
    fn insert(&self, table: Table, row: Value) -> Result<Value>;

    /// Patch the named fields of one row; absent fields are left untouched.
    fn update(&self, table: Table, id: &str, fields: Value) -> Result<()>;

    /// Hard-delete one row.
    fn delete(&self, table: Table, id: &str) -> Result<()>;
}
