use super::{
    active_marker, add_item, connect, delete_item, edit_item, move_item, print_rows, toggle_item,
    Listable,
};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;
use swissverse_core::collection::OrderedCollection;
use swissverse_core::content::TimelineMoment;
use swissverse_core::presenter::group_by_year;
use swissverse_core::types::Direction;

impl Listable for TimelineMoment {
    fn headers() -> &'static [&'static str] {
        &["id", "year", "order", "active", "title"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.year.to_string(),
            self.display_order.to_string(),
            active_marker(self.is_active),
            self.title.clone(),
        ]
    }
}

#[derive(Subcommand)]
pub enum TimelineSubcommand {
    /// List timeline moments, grouped by year unless --year narrows the view
    List {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        public: bool,
    },
    /// Add a moment to a year (appends within that year unless --after/--head)
    Add {
        title: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        description: String,
        #[arg(long)]
        media_url: Option<String>,
        #[arg(long, conflicts_with = "head")]
        after: Option<String>,
        #[arg(long)]
        head: bool,
    },
    /// Move a moment one slot earlier within its year
    MoveUp { id: String },
    /// Move a moment one slot later within its year
    MoveDown { id: String },
    /// Edit one field in place
    Edit {
        id: String,
        field: String,
        value: String,
    },
    /// Flip visibility (soft delete / restore)
    Toggle { id: String },
    /// Permanently delete a moment
    Delete { id: String },
}

pub fn run(root: &Path, subcmd: TimelineSubcommand, json: bool) -> anyhow::Result<()> {
    let client = connect(root)?;
    match subcmd {
        TimelineSubcommand::List { year, public } => list(&client, year, public, json),
        TimelineSubcommand::Add {
            title,
            year,
            description,
            media_url,
            after,
            head,
        } => {
            let mut row = TimelineMoment::new(year, title, description);
            row.media_url = media_url;
            add_item(&client, row, after.as_deref(), head, json)
        }
        TimelineSubcommand::MoveUp { id } => {
            move_item::<TimelineMoment>(&client, &id, Direction::Up, json)
        }
        TimelineSubcommand::MoveDown { id } => {
            move_item::<TimelineMoment>(&client, &id, Direction::Down, json)
        }
        TimelineSubcommand::Edit { id, field, value } => {
            edit_item::<TimelineMoment>(&client, &id, &field, &value, json)
        }
        TimelineSubcommand::Toggle { id } => toggle_item::<TimelineMoment>(&client, &id, json),
        TimelineSubcommand::Delete { id } => delete_item::<TimelineMoment>(&client, &id, json),
    }
}

fn list(
    client: &swissverse_core::rest::RestTableClient,
    year: Option<i32>,
    public: bool,
    json: bool,
) -> anyhow::Result<()> {
    let coll: OrderedCollection<'_, _, TimelineMoment> = OrderedCollection::new(client);
    let scope = year.map(|y| ("year", y.to_string()));
    let rows = if public {
        coll.list_public(scope.as_ref())
    } else {
        coll.list(scope.as_ref())
    }
    .context("failed to fetch timeline")?;

    if year.is_some() || json {
        return print_rows(&rows, json);
    }

    // Whole-timeline text view: one block per year.
    for (year, moments) in group_by_year(&rows) {
        println!("{year}");
        for moment in &moments {
            println!(
                "  [{}] {}  (order {})",
                moment.id, moment.title, moment.display_order
            );
        }
    }
    Ok(())
}
