use super::{
    active_marker, add_item, connect, delete_item, edit_item, list_items, move_item, toggle_item,
    Listable,
};
use clap::Subcommand;
use std::path::Path;
use swissverse_core::content::Resource;
use swissverse_core::types::Direction;

impl Listable for Resource {
    fn headers() -> &'static [&'static str] {
        &["id", "order", "active", "icon", "category", "title", "url"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.display_order.to_string(),
            active_marker(self.is_active),
            self.icon().glyph().to_string(),
            self.category.clone(),
            self.title.clone(),
            self.url.clone(),
        ]
    }
}

#[derive(Subcommand)]
pub enum ResourceSubcommand {
    /// List resources
    List {
        /// Only rows visible on the public site
        #[arg(long)]
        public: bool,
    },
    /// Add a resource (appends unless --after or --head)
    Add {
        title: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: Option<String>,
        /// Icon key (unknown keys render with the generic glyph)
        #[arg(long)]
        icon: Option<String>,
        /// Insert directly after this row id
        #[arg(long, conflicts_with = "head")]
        after: Option<String>,
        /// Insert before everything else
        #[arg(long)]
        head: bool,
    },
    /// Move a resource one slot earlier
    MoveUp { id: String },
    /// Move a resource one slot later
    MoveDown { id: String },
    /// Edit one field in place
    Edit {
        id: String,
        field: String,
        value: String,
    },
    /// Flip visibility (soft delete / restore)
    Toggle { id: String },
    /// Permanently delete a resource
    Delete { id: String },
}

pub fn run(root: &Path, subcmd: ResourceSubcommand, json: bool) -> anyhow::Result<()> {
    let client = connect(root)?;
    match subcmd {
        ResourceSubcommand::List { public } => list_items::<Resource>(&client, public, json),
        ResourceSubcommand::Add {
            title,
            url,
            category,
            description,
            icon,
            after,
            head,
        } => {
            let mut row = Resource::new(title, url, category);
            row.description = description;
            if let Some(icon) = icon {
                row.icon = icon;
            }
            add_item(&client, row, after.as_deref(), head, json)
        }
        ResourceSubcommand::MoveUp { id } => {
            move_item::<Resource>(&client, &id, Direction::Up, json)
        }
        ResourceSubcommand::MoveDown { id } => {
            move_item::<Resource>(&client, &id, Direction::Down, json)
        }
        ResourceSubcommand::Edit { id, field, value } => {
            edit_item::<Resource>(&client, &id, &field, &value, json)
        }
        ResourceSubcommand::Toggle { id } => toggle_item::<Resource>(&client, &id, json),
        ResourceSubcommand::Delete { id } => delete_item::<Resource>(&client, &id, json),
    }
}
