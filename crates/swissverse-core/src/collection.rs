//! The ordered-collection protocol shared by every admin screen.
//!
//! `OrderedCollection` implements the reorder/insert/edit pattern once,
//! generic over the row type, instead of once per content table. Every
//! mutating call returns a fresh snapshot fetched after the write, so the
//! authoritative list is always the backend's; convergence between
//! concurrent editors is last-write-wins plus refresh.

use crate::content::Orderable;
use crate::error::{Result, SwissverseError};
use crate::order;
use crate::slug::slugify;
use crate::table::{Query, TableClient};
use serde_json::{json, Value};
use std::marker::PhantomData;

pub const ORDER_FIELD: &str = "display_order";

/// Scope filter: the subset of rows among which a total order is maintained.
pub type Scope = (&'static str, String);

pub struct OrderedCollection<'a, C: TableClient, T: Orderable> {
    client: &'a C,
    _row: PhantomData<T>,
}

impl<'a, C: TableClient, T: Orderable> OrderedCollection<'a, C, T> {
    pub fn new(client: &'a C) -> Self {
        debug_assert!(
            T::TABLE.is_orderable(),
            "{} rows do not carry {ORDER_FIELD}",
            T::TABLE
        );
        Self {
            client,
            _row: PhantomData,
        }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Admin snapshot: every row, inactive included, ascending by
    /// `display_order` with id as tie-break.
    pub fn list(&self, scope: Option<&Scope>) -> Result<Vec<T>> {
        self.fetch(scope, false)
    }

    /// Public snapshot: active rows only.
    pub fn list_public(&self, scope: Option<&Scope>) -> Result<Vec<T>> {
        self.fetch(scope, true)
    }

    fn fetch(&self, scope: Option<&Scope>, active_only: bool) -> Result<Vec<T>> {
        let mut query = Query::new().sorted_by(ORDER_FIELD);
        if let Some((field, value)) = scope {
            query = query.filter_eq(*field, value.clone());
        }
        if active_only {
            query = query.active_only();
        }
        let rows = self.client.fetch(T::TABLE, &query)?;
        let mut typed = rows
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(SwissverseError::from))
            .collect::<Result<Vec<T>>>()?;
        // The client already sorts; re-sorting pins the id tie-break locally.
        typed.sort_by(|a, b| {
            a.display_order()
                .partial_cmp(&b.display_order())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id().cmp(b.id()))
        });
        Ok(typed)
    }

    fn find<'r>(rows: &'r [T], id: &str) -> Result<(usize, &'r T)> {
        rows.iter()
            .enumerate()
            .find(|(_, r)| r.id() == id)
            .ok_or_else(|| SwissverseError::ItemNotFound(id.to_string()))
    }

    // -----------------------------------------------------------------------
    // Insertion
    // -----------------------------------------------------------------------

    /// Append `row` at the end of its scope: order = max + 1, or the
    /// baseline when the scope is empty.
    pub fn append(&self, mut row: T) -> Result<Vec<T>> {
        row.validate()?;
        let scope = row.scope();
        let existing = self.fetch(scope.as_ref(), false)?;
        let max = existing.last().map(|r| r.display_order());
        row.set_display_order(order::append_after(max));
        tracing::debug!(table = %T::TABLE, order = row.display_order(), "append");
        self.client.insert(T::TABLE, serde_json::to_value(&row)?)?;
        self.fetch(scope.as_ref(), false)
    }

    /// Insert `row` directly after the row with id `anchor_id`, using the
    /// midpoint of the anchor and its successor. When repeated midpoint
    /// insertion has exhausted precision, the scope is renumbered to
    /// 10, 20, 30, … and the insertion retried once.
    pub fn insert_after(&self, anchor_id: &str, row: T) -> Result<Vec<T>> {
        self.insert_relative(Some(anchor_id), row)
    }

    /// Insert `row` before everything else in its scope.
    pub fn insert_at_head(&self, row: T) -> Result<Vec<T>> {
        self.insert_relative(None, row)
    }

    fn insert_relative(&self, anchor_id: Option<&str>, mut row: T) -> Result<Vec<T>> {
        row.validate()?;
        let scope = row.scope();
        let mut existing = self.fetch(scope.as_ref(), false)?;

        let value = match self.neighbor_orders(&existing, anchor_id)? {
            Some(value) => value,
            None => {
                tracing::warn!(table = %T::TABLE, "order precision exhausted, rebalancing scope");
                self.rebalance(&existing)?;
                existing = self.fetch(scope.as_ref(), false)?;
                self.neighbor_orders(&existing, anchor_id)?
                    .ok_or_else(|| SwissverseError::Validation(
                        "order collapsed even after rebalance".to_string(),
                    ))?
            }
        };

        row.set_display_order(value);
        tracing::debug!(table = %T::TABLE, order = value, "insert");
        self.client.insert(T::TABLE, serde_json::to_value(&row)?)?;
        self.fetch(scope.as_ref(), false)
    }

    /// Midpoint for the slot after `anchor_id` (or the head slot when
    /// `None`). `Ok(None)` means precision is exhausted.
    fn neighbor_orders(&self, rows: &[T], anchor_id: Option<&str>) -> Result<Option<f64>> {
        let (left, right) = match anchor_id {
            Some(id) => {
                let (idx, anchor) = Self::find(rows, id)?;
                (
                    Some(anchor.display_order()),
                    rows.get(idx + 1).map(|r| r.display_order()),
                )
            }
            None => (None, rows.first().map(|r| r.display_order())),
        };
        Ok(order::between(left, right))
    }

    /// Renumber every row of the scope to the fixed 10, 20, 30, … sequence.
    fn rebalance(&self, rows: &[T]) -> Result<()> {
        for (row, fresh) in rows.iter().zip(order::rebalanced(rows.len())) {
            self.client
                .update(T::TABLE, row.id(), json!({ ORDER_FIELD: fresh }))?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reordering
    // -----------------------------------------------------------------------

    pub fn move_up(&self, id: &str) -> Result<Vec<T>> {
        self.swap_with_neighbor(id, -1)
    }

    pub fn move_down(&self, id: &str) -> Result<Vec<T>> {
        self.swap_with_neighbor(id, 1)
    }

    /// Swap `display_order` values with the neighbor at `offset` in the
    /// sorted scope. A no-op (zero writes) at the edges.
    ///
    /// Two sequential writes; if the second fails a single compensating
    /// write restores the first row. The original error is returned either
    /// way, upgraded to `SwapInconsistent` when compensation also failed.
    fn swap_with_neighbor(&self, id: &str, offset: isize) -> Result<Vec<T>> {
        let all = self.fetch(None, false)?;
        let (_, target) = Self::find(&all, id)?;
        let scope = target.scope();

        let rows: Vec<&T> = all
            .iter()
            .filter(|r| r.scope() == scope)
            .collect();
        let idx = rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| SwissverseError::ItemNotFound(id.to_string()))?;

        let neighbor_idx = idx as isize + offset;
        if neighbor_idx < 0 || neighbor_idx as usize >= rows.len() {
            // Already first (up) or last (down).
            return Ok(rows.into_iter().cloned().collect());
        }
        let neighbor = rows[neighbor_idx as usize];
        let target = rows[idx];

        let target_order = target.display_order();
        let neighbor_order = neighbor.display_order();
        tracing::debug!(
            table = %T::TABLE,
            id,
            neighbor = neighbor.id(),
            "swap display_order"
        );

        self.client
            .update(T::TABLE, target.id(), json!({ ORDER_FIELD: neighbor_order }))?;
        if let Err(err) = self
            .client
            .update(T::TABLE, neighbor.id(), json!({ ORDER_FIELD: target_order }))
        {
            tracing::warn!(table = %T::TABLE, id, "second swap write failed, compensating");
            if let Err(comp) = self
                .client
                .update(T::TABLE, target.id(), json!({ ORDER_FIELD: target_order }))
            {
                return Err(SwissverseError::SwapInconsistent {
                    table: T::TABLE.to_string(),
                    reason: format!("swap failed ({err}) and compensation failed ({comp})"),
                });
            }
            return Err(err);
        }

        self.fetch(scope.as_ref(), false)
    }

    // -----------------------------------------------------------------------
    // Field edits, visibility, deletion
    // -----------------------------------------------------------------------

    /// Write one text field of one row. A term/title field with a derived
    /// slug rewrites the slug in the same update.
    pub fn edit_field(&self, id: &str, field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(SwissverseError::Validation(format!("{field} is required")));
        }
        let mut patch = json!({ field: value });
        if let Some((source, slug_field)) = T::slug_source() {
            if field == source {
                let slug = slugify(value);
                crate::slug::validate_slug(&slug)?;
                patch[slug_field] = Value::String(slug);
            }
        }
        tracing::debug!(table = %T::TABLE, id, field, "edit field");
        self.client.update(T::TABLE, id, patch)
    }

    /// Soft delete / restore.
    pub fn set_active(&self, id: &str, active: bool) -> Result<Vec<T>> {
        self.client
            .update(T::TABLE, id, json!({ "is_active": active }))?;
        self.fetch(None, false)
    }

    /// Hard delete.
    pub fn remove(&self, id: &str) -> Result<Vec<T>> {
        self.client.delete(T::TABLE, id)?;
        self.fetch(None, false)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{GlossaryTerm, Resource, TimelineMoment};
    use crate::memory::MemoryTableClient;

    fn resources(client: &MemoryTableClient) -> OrderedCollection<'_, MemoryTableClient, Resource> {
        OrderedCollection::new(client)
    }

    fn seed_three(client: &MemoryTableClient) {
        // X, Y, Z with orders 1, 2, 3.
        client.seed(
            crate::types::Table::Resources,
            vec![
                serde_json::json!({"id": "x", "title": "X", "url": "u", "category": "c", "display_order": 1.0, "is_active": true}),
                serde_json::json!({"id": "y", "title": "Y", "url": "u", "category": "c", "display_order": 2.0, "is_active": true}),
                serde_json::json!({"id": "z", "title": "Z", "url": "u", "category": "c", "display_order": 3.0, "is_active": true}),
            ],
        );
    }

    fn orders(rows: &[Resource]) -> Vec<(String, f64)> {
        rows.iter()
            .map(|r| (r.id.clone(), r.display_order))
            .collect()
    }

    #[test]
    fn appends_produce_strictly_increasing_orders() {
        let client = MemoryTableClient::new();
        let coll = resources(&client);
        for i in 0..5 {
            coll.append(Resource::new(format!("R{i}"), "https://r", "c"))
                .unwrap();
        }
        let rows = coll.list(None).unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows
            .windows(2)
            .all(|w| w[0].display_order < w[1].display_order));
        assert_eq!(rows[0].display_order, order::BASELINE);
    }

    #[test]
    fn insert_after_takes_midpoint() {
        let client = MemoryTableClient::new();
        client.seed(
            crate::types::Table::Resources,
            vec![
                serde_json::json!({"id": "x", "title": "X", "url": "u", "category": "c", "display_order": 1.0, "is_active": true}),
                serde_json::json!({"id": "y", "title": "Y", "url": "u", "category": "c", "display_order": 3.0, "is_active": true}),
            ],
        );
        let coll = resources(&client);
        let rows = coll
            .insert_after("x", Resource::new("New", "https://n", "c"))
            .unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, "x");
        assert_eq!(rows[1].title, "New");
        assert_eq!(rows[1].display_order, 2.0);
        assert_eq!(rows[2].id, "y");
    }

    #[test]
    fn insert_after_last_steps_past_tail() {
        let client = MemoryTableClient::new();
        seed_three(&client);
        let coll = resources(&client);
        let rows = coll
            .insert_after("z", Resource::new("Tail", "https://t", "c"))
            .unwrap();
        assert_eq!(rows.last().unwrap().title, "Tail");
        assert_eq!(rows.last().unwrap().display_order, 13.0);
        assert_eq!(
            orders(&rows[..3]),
            vec![
                ("x".to_string(), 1.0),
                ("y".to_string(), 2.0),
                ("z".to_string(), 3.0),
            ]
        );
    }

    #[test]
    fn insert_at_head_sorts_first() {
        let client = MemoryTableClient::new();
        seed_three(&client);
        let coll = resources(&client);
        let rows = coll
            .insert_at_head(Resource::new("First", "https://f", "c"))
            .unwrap();
        assert_eq!(rows[0].title, "First");
        assert!(rows[0].display_order < 1.0);
    }

    #[test]
    fn insert_rebalances_when_precision_is_exhausted() {
        let client = MemoryTableClient::new();
        // Neighbors so close their midpoint rounds onto the left one.
        let right = 1.0 + f64::EPSILON;
        client.seed(
            crate::types::Table::Resources,
            vec![
                serde_json::json!({"id": "a", "title": "A", "url": "u", "category": "c", "display_order": 1.0, "is_active": true}),
                serde_json::json!({"id": "b", "title": "B", "url": "u", "category": "c", "display_order": right, "is_active": true}),
            ],
        );
        let coll = resources(&client);
        let rows = coll
            .insert_after("a", Resource::new("Mid", "https://m", "c"))
            .unwrap();
        assert_eq!(
            rows.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
            vec!["A", "Mid", "B"]
        );
        // Rebalance renumbered the scope to the step sequence first.
        assert_eq!(rows[0].display_order, 10.0);
        assert_eq!(rows[1].display_order, 15.0);
        assert_eq!(rows[2].display_order, 20.0);
    }

    #[test]
    fn move_down_swaps_order_values() {
        let client = MemoryTableClient::new();
        seed_three(&client);
        let coll = resources(&client);

        // Move Y down: X keeps 1, Y gets 3, Z gets 2.
        let rows = coll.move_down("y").unwrap();
        assert_eq!(
            orders(&rows),
            vec![
                ("x".to_string(), 1.0),
                ("z".to_string(), 2.0),
                ("y".to_string(), 3.0),
            ]
        );
    }

    #[test]
    fn move_up_swaps_with_predecessor_only() {
        let client = MemoryTableClient::new();
        seed_three(&client);
        let coll = resources(&client);
        let rows = coll.move_up("z").unwrap();
        assert_eq!(
            orders(&rows),
            vec![
                ("x".to_string(), 1.0),
                ("z".to_string(), 2.0),
                ("y".to_string(), 3.0),
            ]
        );
    }

    #[test]
    fn move_at_edges_is_a_no_op_with_zero_writes() {
        let client = MemoryTableClient::new();
        seed_three(&client);
        let coll = resources(&client);

        let before = orders(&coll.list(None).unwrap());
        let up = coll.move_up("x").unwrap();
        let down = coll.move_down("z").unwrap();
        assert_eq!(orders(&up), before);
        assert_eq!(orders(&down), before);
        assert_eq!(client.writes_issued(), 0);
    }

    #[test]
    fn swap_second_write_failure_is_compensated() {
        let client = MemoryTableClient::new();
        seed_three(&client);
        let coll = resources(&client);

        client.fail_write_n(2);
        let err = coll.move_down("y").unwrap_err();
        assert!(matches!(err, SwissverseError::Backend { .. }));
        // First write undone; both writes plus the compensation were issued.
        assert_eq!(client.writes_issued(), 3);
        let rows = coll.list(None).unwrap();
        assert_eq!(
            orders(&rows),
            vec![
                ("x".to_string(), 1.0),
                ("y".to_string(), 2.0),
                ("z".to_string(), 3.0),
            ]
        );
    }

    #[test]
    fn swap_failed_compensation_reports_inconsistency() {
        let client = MemoryTableClient::new();
        seed_three(&client);
        let coll = resources(&client);

        client.fail_write_n(2);
        client.fail_write_n(3);
        let err = coll.move_down("y").unwrap_err();
        assert!(matches!(err, SwissverseError::SwapInconsistent { .. }));
    }

    #[test]
    fn move_unknown_id_fails() {
        let client = MemoryTableClient::new();
        seed_three(&client);
        assert!(matches!(
            resources(&client).move_up("ghost"),
            Err(SwissverseError::ItemNotFound(_))
        ));
    }

    #[test]
    fn timeline_moves_stay_within_their_year() {
        let client = MemoryTableClient::new();
        client.seed(
            crate::types::Table::TimelineMoments,
            vec![
                serde_json::json!({"id": "a21", "year": 2021, "title": "A", "description": "d", "display_order": 1.0, "is_active": true}),
                serde_json::json!({"id": "b21", "year": 2021, "title": "B", "description": "d", "display_order": 2.0, "is_active": true}),
                serde_json::json!({"id": "a22", "year": 2022, "title": "C", "description": "d", "display_order": 1.5, "is_active": true}),
            ],
        );
        let coll: OrderedCollection<'_, _, TimelineMoment> = OrderedCollection::new(&client);

        // b21 is last within 2021 even though a22 sorts after it table-wide.
        let rows = coll.move_down("b21").unwrap();
        assert_eq!(client.writes_issued(), 0);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].id, "b21");
    }

    #[test]
    fn append_scopes_by_year() {
        let client = MemoryTableClient::new();
        client.seed(
            crate::types::Table::TimelineMoments,
            vec![
                serde_json::json!({"id": "a21", "year": 2021, "title": "A", "description": "d", "display_order": 7.0, "is_active": true}),
            ],
        );
        let coll: OrderedCollection<'_, _, TimelineMoment> = OrderedCollection::new(&client);

        let rows = coll
            .append(TimelineMoment::new(2022, "First of 2022", "d"))
            .unwrap();
        // Empty 2022 scope starts at the baseline, ignoring 2021's max.
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].display_order, order::BASELINE);
    }

    #[test]
    fn edit_term_rewrites_slug_in_same_update() {
        let client = MemoryTableClient::new();
        client.seed(
            crate::types::Table::GlossaryTerms,
            vec![serde_json::json!({
                "id": "g1", "term": "NFT", "slug": "nft", "definition": "d",
                "display_order": 1.0, "is_active": true
            })],
        );
        let coll: OrderedCollection<'_, _, GlossaryTerm> = OrderedCollection::new(&client);

        coll.edit_field("g1", "term", "Non-Fungible Token!").unwrap();
        assert_eq!(client.writes_issued(), 1);

        let rows = coll.list(None).unwrap();
        assert_eq!(rows[0].term, "Non-Fungible Token!");
        assert_eq!(rows[0].slug, "non-fungible-token");
    }

    #[test]
    fn edit_non_term_field_leaves_slug_alone() {
        let client = MemoryTableClient::new();
        client.seed(
            crate::types::Table::GlossaryTerms,
            vec![serde_json::json!({
                "id": "g1", "term": "NFT", "slug": "nft", "definition": "d",
                "display_order": 1.0, "is_active": true
            })],
        );
        let coll: OrderedCollection<'_, _, GlossaryTerm> = OrderedCollection::new(&client);
        coll.edit_field("g1", "definition", "updated").unwrap();
        let rows = coll.list(None).unwrap();
        assert_eq!(rows[0].slug, "nft");
        assert_eq!(rows[0].definition, "updated");
    }

    #[test]
    fn edit_empty_value_is_rejected_before_any_write() {
        let client = MemoryTableClient::new();
        seed_three(&client);
        let err = resources(&client)
            .edit_field("x", "title", "   ")
            .unwrap_err();
        assert!(matches!(err, SwissverseError::Validation(_)));
        assert_eq!(client.writes_issued(), 0);
    }

    #[test]
    fn append_invalid_row_issues_no_write() {
        let client = MemoryTableClient::new();
        let err = resources(&client)
            .append(Resource::new("", "https://r", "c"))
            .unwrap_err();
        assert!(matches!(err, SwissverseError::Validation(_)));
        assert_eq!(client.writes_issued(), 0);
    }

    #[test]
    fn set_active_soft_deletes() {
        let client = MemoryTableClient::new();
        seed_three(&client);
        let coll = resources(&client);

        coll.set_active("y", false).unwrap();
        assert_eq!(coll.list(None).unwrap().len(), 3);
        let public = coll.list_public(None).unwrap();
        assert_eq!(public.len(), 2);
        assert!(public.iter().all(|r| r.id != "y"));
    }

    #[test]
    fn failed_toggle_leaves_state_unchanged() {
        let client = MemoryTableClient::new();
        seed_three(&client);
        let coll = resources(&client);

        client.fail_next_write();
        assert!(coll.set_active("y", false).is_err());
        let rows = coll.list(None).unwrap();
        assert!(rows.iter().find(|r| r.id == "y").unwrap().is_active);
    }

    #[test]
    fn remove_hard_deletes() {
        let client = MemoryTableClient::new();
        seed_three(&client);
        let rows = resources(&client).remove("y").unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.id != "y"));
    }
}
