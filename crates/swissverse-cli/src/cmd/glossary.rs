use super::{
    active_marker, add_item, connect, delete_item, edit_item, list_items, move_item, toggle_item,
    Listable,
};
use clap::Subcommand;
use std::path::Path;
use swissverse_core::content::GlossaryTerm;
use swissverse_core::types::Direction;

impl Listable for GlossaryTerm {
    fn headers() -> &'static [&'static str] {
        &["id", "order", "active", "slug", "term", "definition"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.display_order.to_string(),
            active_marker(self.is_active),
            self.slug.clone(),
            self.term.clone(),
            self.definition.clone(),
        ]
    }
}

#[derive(Subcommand)]
pub enum GlossarySubcommand {
    /// List glossary terms
    List {
        #[arg(long)]
        public: bool,
    },
    /// Add a term; the slug is derived from the term text
    Add {
        term: String,
        #[arg(long)]
        definition: String,
        /// Related term slugs (repeatable: --related nft --related dao)
        #[arg(long = "related")]
        related: Vec<String>,
        #[arg(long, conflicts_with = "head")]
        after: Option<String>,
        #[arg(long)]
        head: bool,
    },
    /// Move a term one slot earlier
    MoveUp { id: String },
    /// Move a term one slot later
    MoveDown { id: String },
    /// Edit one field in place (editing `term` also rewrites the slug)
    Edit {
        id: String,
        field: String,
        value: String,
    },
    /// Flip visibility (soft delete / restore)
    Toggle { id: String },
    /// Permanently delete a term
    Delete { id: String },
}

pub fn run(root: &Path, subcmd: GlossarySubcommand, json: bool) -> anyhow::Result<()> {
    let client = connect(root)?;
    match subcmd {
        GlossarySubcommand::List { public } => list_items::<GlossaryTerm>(&client, public, json),
        GlossarySubcommand::Add {
            term,
            definition,
            related,
            after,
            head,
        } => {
            let mut row = GlossaryTerm::new(term, definition);
            row.related_terms = related;
            add_item(&client, row, after.as_deref(), head, json)
        }
        GlossarySubcommand::MoveUp { id } => {
            move_item::<GlossaryTerm>(&client, &id, Direction::Up, json)
        }
        GlossarySubcommand::MoveDown { id } => {
            move_item::<GlossaryTerm>(&client, &id, Direction::Down, json)
        }
        GlossarySubcommand::Edit { id, field, value } => {
            edit_item::<GlossaryTerm>(&client, &id, &field, &value, json)
        }
        GlossarySubcommand::Toggle { id } => toggle_item::<GlossaryTerm>(&client, &id, json),
        GlossarySubcommand::Delete { id } => delete_item::<GlossaryTerm>(&client, &id, json),
    }
}
