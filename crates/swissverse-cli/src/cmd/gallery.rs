use super::{
    active_marker, add_item, connect, delete_item, edit_item, list_items, move_item, toggle_item,
    Listable,
};
use clap::Subcommand;
use std::path::Path;
use swissverse_core::content::GalleryImage;
use swissverse_core::types::Direction;

impl Listable for GalleryImage {
    fn headers() -> &'static [&'static str] {
        &["id", "order", "active", "title", "image_url"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.display_order.to_string(),
            active_marker(self.is_active),
            self.title.clone(),
            self.image_url.clone(),
        ]
    }
}

#[derive(Subcommand)]
pub enum GallerySubcommand {
    /// List gallery images
    List {
        #[arg(long)]
        public: bool,
    },
    /// Add an image by its already-uploaded public URL
    Add {
        title: String,
        /// Public URL returned by the storage upload
        #[arg(long)]
        image_url: String,
        #[arg(long)]
        alt: Option<String>,
        #[arg(long, conflicts_with = "head")]
        after: Option<String>,
        #[arg(long)]
        head: bool,
    },
    /// Move an image one slot earlier
    MoveUp { id: String },
    /// Move an image one slot later
    MoveDown { id: String },
    /// Edit one field in place
    Edit {
        id: String,
        field: String,
        value: String,
    },
    /// Flip visibility (soft delete / restore)
    Toggle { id: String },
    /// Permanently delete an image row
    Delete { id: String },
}

pub fn run(root: &Path, subcmd: GallerySubcommand, json: bool) -> anyhow::Result<()> {
    let client = connect(root)?;
    match subcmd {
        GallerySubcommand::List { public } => list_items::<GalleryImage>(&client, public, json),
        GallerySubcommand::Add {
            title,
            image_url,
            alt,
            after,
            head,
        } => {
            let mut row = GalleryImage::new(title, image_url);
            row.alt_text = alt.unwrap_or_default();
            add_item(&client, row, after.as_deref(), head, json)
        }
        GallerySubcommand::MoveUp { id } => {
            move_item::<GalleryImage>(&client, &id, Direction::Up, json)
        }
        GallerySubcommand::MoveDown { id } => {
            move_item::<GalleryImage>(&client, &id, Direction::Down, json)
        }
        GallerySubcommand::Edit { id, field, value } => {
            edit_item::<GalleryImage>(&client, &id, &field, &value, json)
        }
        GallerySubcommand::Toggle { id } => toggle_item::<GalleryImage>(&client, &id, json),
        GallerySubcommand::Delete { id } => delete_item::<GalleryImage>(&client, &id, json),
    }
}
