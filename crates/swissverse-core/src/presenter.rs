//! List presentation state: the locally cached, eventually-consistent copy
//! of a server-owned ordered collection.
//!
//! A `ListView` never mutates its rows on its own; it is refreshed with the
//! snapshot returned by an `OrderedCollection` call, except for inline field
//! edits, which patch the one changed row in place (optimistic patch).

use crate::content::{Orderable, TimelineMoment};
use crate::error::Result;
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// LoadState / ListView
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(Vec<T>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ListView<T> {
    state: LoadState<T>,
}

impl<T: Orderable> ListView<T> {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
        }
    }

    /// Apply a fetch result. A failure becomes an error state, never a panic.
    pub fn resolve(&mut self, result: Result<Vec<T>>) {
        self.state = match result {
            Ok(rows) => LoadState::Ready(rows),
            Err(err) => {
                tracing::warn!(table = %T::TABLE, %err, "list fetch failed");
                LoadState::Failed(err.to_string())
            }
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// All rows, inactive included (admin view). Empty while loading/failed.
    pub fn rows(&self) -> &[T] {
        match &self.state {
            LoadState::Ready(rows) => rows,
            _ => &[],
        }
    }

    /// Active rows only (public view).
    pub fn active_rows(&self) -> Vec<&T> {
        self.rows().iter().filter(|r| r.is_active()).collect()
    }

    /// Optimistic single-row patch after a confirmed field write. Returns
    /// false when the row is no longer in the snapshot.
    pub fn patch(&mut self, id: &str, apply: impl FnOnce(&mut T)) -> bool {
        if let LoadState::Ready(rows) = &mut self.state {
            if let Some(row) = rows.iter_mut().find(|r| r.id() == id) {
                apply(row);
                return true;
            }
        }
        false
    }
}

impl<T: Orderable> Default for ListView<T> {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Timeline grouping
// ---------------------------------------------------------------------------

/// Group an already-sorted timeline snapshot by year. Years come out in
/// natural order; per-year order is the flat sort order.
pub fn group_by_year(rows: &[TimelineMoment]) -> BTreeMap<i32, Vec<TimelineMoment>> {
    let mut groups: BTreeMap<i32, Vec<TimelineMoment>> = BTreeMap::new();
    for row in rows {
        groups.entry(row.year).or_default().push(row.clone());
    }
    groups
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
