use super::{
    active_marker, add_item, connect, delete_item, edit_item, list_items, move_item, toggle_item,
    Listable,
};
use clap::Subcommand;
use std::path::Path;
use swissverse_core::content::YoutubeVideo;
use swissverse_core::types::Direction;

impl Listable for YoutubeVideo {
    fn headers() -> &'static [&'static str] {
        &["id", "order", "active", "video_id", "title"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.display_order.to_string(),
            active_marker(self.is_active),
            self.video_id.clone(),
            self.title.clone(),
        ]
    }
}

#[derive(Subcommand)]
pub enum VideoSubcommand {
    /// List YouTube videos
    List {
        #[arg(long)]
        public: bool,
    },
    /// Add a video by its YouTube id (appends unless --after or --head)
    Add {
        title: String,
        #[arg(long)]
        video_id: String,
        #[arg(long, conflicts_with = "head")]
        after: Option<String>,
        #[arg(long)]
        head: bool,
    },
    /// Move a video one slot earlier
    MoveUp { id: String },
    /// Move a video one slot later
    MoveDown { id: String },
    /// Edit one field in place
    Edit {
        id: String,
        field: String,
        value: String,
    },
    /// Flip visibility (soft delete / restore)
    Toggle { id: String },
    /// Permanently delete a video row
    Delete { id: String },
}

pub fn run(root: &Path, subcmd: VideoSubcommand, json: bool) -> anyhow::Result<()> {
    let client = connect(root)?;
    match subcmd {
        VideoSubcommand::List { public } => list_items::<YoutubeVideo>(&client, public, json),
        VideoSubcommand::Add {
            title,
            video_id,
            after,
            head,
        } => add_item(
            &client,
            YoutubeVideo::new(title, video_id),
            after.as_deref(),
            head,
            json,
        ),
        VideoSubcommand::MoveUp { id } => {
            move_item::<YoutubeVideo>(&client, &id, Direction::Up, json)
        }
        VideoSubcommand::MoveDown { id } => {
            move_item::<YoutubeVideo>(&client, &id, Direction::Down, json)
        }
        VideoSubcommand::Edit { id, field, value } => {
            edit_item::<YoutubeVideo>(&client, &id, &field, &value, json)
        }
        VideoSubcommand::Toggle { id } => toggle_item::<YoutubeVideo>(&client, &id, json),
        VideoSubcommand::Delete { id } => delete_item::<YoutubeVideo>(&client, &id, json),
    }
}
