use super::{
    active_marker, add_item, connect, delete_item, edit_item, list_items, move_item, toggle_item,
    Listable,
};
use clap::Subcommand;
use std::path::Path;
use swissverse_core::content::SiteLink;
use swissverse_core::types::Direction;

impl Listable for SiteLink {
    fn headers() -> &'static [&'static str] {
        &["id", "order", "active", "icon", "label", "url"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.display_order.to_string(),
            active_marker(self.is_active),
            self.icon().glyph().to_string(),
            self.label.clone(),
            self.url.clone(),
        ]
    }
}

#[derive(Subcommand)]
pub enum LinkSubcommand {
    /// List configurable links
    List {
        #[arg(long)]
        public: bool,
    },
    /// Add a link (appends unless --after or --head)
    Add {
        label: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        icon: Option<String>,
        #[arg(long, conflicts_with = "head")]
        after: Option<String>,
        #[arg(long)]
        head: bool,
    },
    /// Move a link one slot earlier
    MoveUp { id: String },
    /// Move a link one slot later
    MoveDown { id: String },
    /// Edit one field in place
    Edit {
        id: String,
        field: String,
        value: String,
    },
    /// Flip visibility (soft delete / restore)
    Toggle { id: String },
    /// Permanently delete a link
    Delete { id: String },
}

pub fn run(root: &Path, subcmd: LinkSubcommand, json: bool) -> anyhow::Result<()> {
    let client = connect(root)?;
    match subcmd {
        LinkSubcommand::List { public } => list_items::<SiteLink>(&client, public, json),
        LinkSubcommand::Add {
            label,
            url,
            icon,
            after,
            head,
        } => {
            let mut row = SiteLink::new(label, url);
            if let Some(icon) = icon {
                row.icon = icon;
            }
            add_item(&client, row, after.as_deref(), head, json)
        }
        LinkSubcommand::MoveUp { id } => move_item::<SiteLink>(&client, &id, Direction::Up, json),
        LinkSubcommand::MoveDown { id } => {
            move_item::<SiteLink>(&client, &id, Direction::Down, json)
        }
        LinkSubcommand::Edit { id, field, value } => {
            edit_item::<SiteLink>(&client, &id, &field, &value, json)
        }
        LinkSubcommand::Toggle { id } => toggle_item::<SiteLink>(&client, &id, json),
        LinkSubcommand::Delete { id } => delete_item::<SiteLink>(&client, &id, json),
    }
}
