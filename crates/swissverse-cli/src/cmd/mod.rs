pub mod gallery;
pub mod glossary;
pub mod init;
pub mod link;
pub mod resource;
pub mod section;
pub mod seo;
pub mod timeline;
pub mod user;
pub mod video;

use anyhow::Context;
use std::path::Path;
use swissverse_core::collection::OrderedCollection;
use swissverse_core::config::Config;
use swissverse_core::content::Orderable;
use swissverse_core::rest::RestTableClient;
use swissverse_core::types::Direction;

use crate::output::{print_json, print_table};

pub fn connect(root: &Path) -> anyhow::Result<RestTableClient> {
    let config = Config::load(root).context("failed to load config")?;
    RestTableClient::from_config(&config).context("failed to build backend client")
}

/// Table rendering for the verbs shared by every orderable collection.
pub trait Listable: Orderable {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

pub fn active_marker(active: bool) -> String {
    let marker = if active { "yes" } else { "no" };
    marker.to_string()
}

pub fn print_rows<T: Listable>(rows: &[T], json: bool) -> anyhow::Result<()> {
    if json {
        print_json(&rows)
    } else {
        print_table(T::headers(), rows.iter().map(Listable::cells).collect());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shared verbs
// ---------------------------------------------------------------------------

pub fn list_items<T: Listable>(
    client: &RestTableClient,
    public: bool,
    json: bool,
) -> anyhow::Result<()> {
    let coll: OrderedCollection<'_, _, T> = OrderedCollection::new(client);
    let rows = if public {
        coll.list_public(None)
    } else {
        coll.list(None)
    }
    .context("failed to fetch rows")?;
    print_rows(&rows, json)
}

pub fn add_item<T: Listable>(
    client: &RestTableClient,
    row: T,
    after: Option<&str>,
    head: bool,
    json: bool,
) -> anyhow::Result<()> {
    let coll = OrderedCollection::new(client);
    let rows = match (after, head) {
        (Some(anchor), _) => coll.insert_after(anchor, row),
        (None, true) => coll.insert_at_head(row),
        (None, false) => coll.append(row),
    }
    .context("failed to insert row")?;
    print_rows(&rows, json)
}

pub fn move_item<T: Listable>(
    client: &RestTableClient,
    id: &str,
    direction: Direction,
    json: bool,
) -> anyhow::Result<()> {
    let coll: OrderedCollection<'_, _, T> = OrderedCollection::new(client);
    let rows = match direction {
        Direction::Up => coll.move_up(id),
        Direction::Down => coll.move_down(id),
    }
    .with_context(|| format!("failed to move '{id}'"))?;
    print_rows(&rows, json)
}

pub fn edit_item<T: Listable>(
    client: &RestTableClient,
    id: &str,
    field: &str,
    value: &str,
    json: bool,
) -> anyhow::Result<()> {
    let coll: OrderedCollection<'_, _, T> = OrderedCollection::new(client);
    coll.edit_field(id, field, value)
        .with_context(|| format!("failed to edit '{field}' of '{id}'"))?;
    if json {
        print_json(&serde_json::json!({ "id": id, "field": field, "value": value }))?;
    } else {
        println!("Updated {field} of '{id}'.");
    }
    Ok(())
}

/// Flip the soft-delete flag of one row.
pub fn toggle_item<T: Listable>(
    client: &RestTableClient,
    id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let coll: OrderedCollection<'_, _, T> = OrderedCollection::new(client);
    let rows = coll.list(None).context("failed to fetch rows")?;
    let current = rows
        .iter()
        .find(|r| r.id() == id)
        .with_context(|| format!("no row with id '{id}'"))?;
    let rows = coll
        .set_active(id, !current.is_active())
        .with_context(|| format!("failed to toggle '{id}'"))?;
    print_rows(&rows, json)
}

pub fn delete_item<T: Listable>(
    client: &RestTableClient,
    id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let coll: OrderedCollection<'_, _, T> = OrderedCollection::new(client);
    let rows = coll
        .remove(id)
        .with_context(|| format!("failed to delete '{id}'"))?;
    print_rows(&rows, json)
}
