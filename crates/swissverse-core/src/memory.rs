//! In-memory `TableClient` used by tests and offline dry runs.
//!
//! Mints UUID ids on insert the way the backend would, counts every issued
//! write, and can be scripted to fail the nth upcoming write so partial
//! failure paths (swap rollback, editor revert) are exercisable without a
//! network.

use crate::error::{Result, SwissverseError};
use crate::table::{Query, TableClient};
use crate::types::Table;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryTableClient {
    tables: Mutex<HashMap<Table, Vec<Value>>>,
    write_attempts: Mutex<usize>,
    scripted_failures: Mutex<HashSet<usize>>,
}

impl MemoryTableClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Preload rows, keeping whatever ids the caller provided.
    pub fn seed(&self, table: Table, rows: Vec<Value>) {
        self.tables.lock().unwrap().insert(table, rows);
    }

    /// Total writes issued so far (insert, update, delete), including ones
    /// that were scripted to fail.
    pub fn writes_issued(&self) -> usize {
        *self.write_attempts.lock().unwrap()
    }

    /// Make the next write fail with a backend error.
    pub fn fail_next_write(&self) {
        self.fail_write_n(1);
    }

    /// Make the nth upcoming write fail (1 = the very next one).
    pub fn fail_write_n(&self, n: usize) {
        let current = *self.write_attempts.lock().unwrap();
        self.scripted_failures.lock().unwrap().insert(current + n);
    }

    fn record_write(&self) -> Result<()> {
        let mut attempts = self.write_attempts.lock().unwrap();
        *attempts += 1;
        if self.scripted_failures.lock().unwrap().remove(&*attempts) {
            return Err(SwissverseError::Backend {
                status: 500,
                message: "scripted write failure".to_string(),
            });
        }
        Ok(())
    }

    fn matches(row: &Value, field: &str, expected: &str) -> bool {
        match row.get(field) {
            Some(Value::String(s)) => s == expected,
            Some(other) => other.to_string() == expected,
            None => false,
        }
    }

    fn order_of(row: &Value, field: &str) -> f64 {
        row.get(field).and_then(Value::as_f64).unwrap_or(f64::MAX)
    }

    fn id_of(row: &Value) -> String {
        row.get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

impl TableClient for MemoryTableClient {
    fn fetch(&self, table: Table, query: &Query) -> Result<Vec<Value>> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Value> = tables
            .get(&table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| {
                        query
                            .filters
                            .iter()
                            .all(|(field, value)| Self::matches(row, field, value))
                    })
                    .filter(|row| {
                        !query.active_only
                            || row.get("is_active").and_then(Value::as_bool).unwrap_or(true)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(field) = &query.sort_field {
            rows.sort_by(|a, b| {
                Self::order_of(a, field)
                    .partial_cmp(&Self::order_of(b, field))
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| Self::id_of(a).cmp(&Self::id_of(b)))
            });
        }
        Ok(rows)
    }

    fn insert(&self, table: Table, mut row: Value) -> Result<Value> {
        self.record_write()?;
        if row.get("id").is_none() {
            row["id"] = Value::String(Uuid::new_v4().to_string());
        }
        let mut tables = self.tables.lock().unwrap();
        tables.entry(table).or_default().push(row.clone());
        Ok(row)
    }

    fn update(&self, table: Table, id: &str, fields: Value) -> Result<()> {
        self.record_write()?;
        let mut tables = self.tables.lock().unwrap();
        let rows = tables
            .get_mut(&table)
            .ok_or_else(|| SwissverseError::ItemNotFound(id.to_string()))?;
        let row = rows
            .iter_mut()
            .find(|r| Self::id_of(r) == id)
            .ok_or_else(|| SwissverseError::ItemNotFound(id.to_string()))?;
        if let Value::Object(patch) = fields {
            if let Value::Object(target) = row {
                for (k, v) in patch {
                    target.insert(k, v);
                }
            }
        }
        Ok(())
    }

    fn delete(&self, table: Table, id: &str) -> Result<()> {
        self.record_write()?;
        let mut tables = self.tables.lock().unwrap();
        let rows = tables
            .get_mut(&table)
            .ok_or_else(|| SwissverseError::ItemNotFound(id.to_string()))?;
        let before = rows.len();
        rows.retain(|r| Self::id_of(r) != id);
        if rows.len() == before {
            return Err(SwissverseError::ItemNotFound(id.to_string()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_mints_id_and_fetch_returns_row() {
        let client = MemoryTableClient::new();
        let row = client
            .insert(Table::Resources, json!({"title": "Docs"}))
            .unwrap();
        assert!(row["id"].as_str().is_some());

        let rows = client.fetch(Table::Resources, &Query::new()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["title"], "Docs");
    }

    #[test]
    fn fetch_sorts_and_filters() {
        let client = MemoryTableClient::new();
        client.seed(
            Table::TimelineMoments,
            vec![
                json!({"id": "b", "year": 2021, "display_order": 2.0}),
                json!({"id": "a", "year": 2021, "display_order": 1.0}),
                json!({"id": "c", "year": 2022, "display_order": 1.0}),
            ],
        );
        let rows = client
            .fetch(
                Table::TimelineMoments,
                &Query::new()
                    .filter_eq("year", "2021")
                    .sorted_by("display_order"),
            )
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], "a");
        assert_eq!(rows[1]["id"], "b");
    }

    #[test]
    fn active_only_hides_inactive_rows() {
        let client = MemoryTableClient::new();
        client.seed(
            Table::Resources,
            vec![
                json!({"id": "r1", "is_active": true}),
                json!({"id": "r2", "is_active": false}),
            ],
        );
        let rows = client
            .fetch(Table::Resources, &Query::new().active_only())
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], "r1");
    }

    #[test]
    fn scripted_failure_fails_nth_write_once() {
        let client = MemoryTableClient::new();
        client.seed(Table::Resources, vec![json!({"id": "r1", "n": 0})]);
        client.fail_write_n(2);

        client
            .update(Table::Resources, "r1", json!({"n": 1}))
            .unwrap();
        assert!(client
            .update(Table::Resources, "r1", json!({"n": 2}))
            .is_err());
        client
            .update(Table::Resources, "r1", json!({"n": 3}))
            .unwrap();
        assert_eq!(client.writes_issued(), 3);
    }

    #[test]
    fn update_missing_row_fails() {
        let client = MemoryTableClient::new();
        client.seed(Table::Resources, vec![json!({"id": "r1"})]);
        assert!(matches!(
            client.update(Table::Resources, "ghost", json!({"x": 1})),
            Err(SwissverseError::ItemNotFound(_))
        ));
    }

    #[test]
    fn delete_removes_row() {
        let client = MemoryTableClient::new();
        client.seed(Table::Resources, vec![json!({"id": "r1"})]);
        client.delete(Table::Resources, "r1").unwrap();
        assert!(client
            .fetch(Table::Resources, &Query::new())
            .unwrap()
            .is_empty());
        assert!(client.delete(Table::Resources, "r1").is_err());
    }
}
