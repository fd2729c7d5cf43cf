use super::connect;
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use serde_json::json;
use std::path::Path;
use swissverse_core::content::SeoMetadata;
use swissverse_core::rest::RestTableClient;
use swissverse_core::table::{Query, TableClient};
use swissverse_core::types::Table;

#[derive(Subcommand)]
pub enum SeoSubcommand {
    /// List SEO metadata for every page
    List,
    /// Show one page's metadata
    Get { page: String },
    /// Create or update a page's metadata (singleton per page name)
    Set {
        page: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        image_url: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: SeoSubcommand, json: bool) -> anyhow::Result<()> {
    let client = connect(root)?;
    match subcmd {
        SeoSubcommand::List => list(&client, json),
        SeoSubcommand::Get { page } => get(&client, &page, json),
        SeoSubcommand::Set {
            page,
            title,
            description,
            image_url,
        } => set(&client, &page, &title, &description, image_url, json),
    }
}

fn fetch_all(client: &RestTableClient) -> anyhow::Result<Vec<SeoMetadata>> {
    let rows = client
        .fetch(Table::SeoMetadata, &Query::new())
        .context("failed to fetch SEO metadata")?;
    rows.into_iter()
        .map(|row| serde_json::from_value(row).context("malformed SEO metadata row"))
        .collect()
}

fn list(client: &RestTableClient, json: bool) -> anyhow::Result<()> {
    let pages = fetch_all(client)?;
    if json {
        return print_json(&pages);
    }
    print_table(
        &["page", "title", "description"],
        pages
            .iter()
            .map(|p| vec![p.page.clone(), p.title.clone(), p.description.clone()])
            .collect(),
    );
    Ok(())
}

fn get(client: &RestTableClient, page: &str, json: bool) -> anyhow::Result<()> {
    let pages = fetch_all(client)?;
    let found = pages
        .iter()
        .find(|p| p.page == page)
        .with_context(|| format!("no SEO metadata for page '{page}'"))?;
    if json {
        print_json(found)
    } else {
        println!("{}: {}", found.page, found.title);
        println!("  {}", found.description);
        Ok(())
    }
}

fn set(
    client: &RestTableClient,
    page: &str,
    title: &str,
    description: &str,
    image_url: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let existing = client
        .fetch(Table::SeoMetadata, &Query::new().filter_eq("page", page))
        .context("failed to fetch SEO metadata")?;

    match existing
        .first()
        .and_then(|row| row.get("id"))
        .and_then(|id| id.as_str())
    {
        Some(id) => {
            let mut patch = json!({ "title": title, "description": description });
            if let Some(image_url) = &image_url {
                patch["image_url"] = json!(image_url);
            }
            client
                .update(Table::SeoMetadata, id, patch)
                .with_context(|| format!("failed to update SEO metadata for '{page}'"))?;
        }
        None => {
            let row = SeoMetadata {
                id: String::new(),
                page: page.to_string(),
                title: title.to_string(),
                description: description.to_string(),
                image_url,
            };
            client
                .insert(Table::SeoMetadata, serde_json::to_value(&row)?)
                .with_context(|| format!("failed to create SEO metadata for '{page}'"))?;
        }
    }

    if json {
        print_json(&json!({ "page": page, "title": title }))
    } else {
        println!("Set SEO metadata for '{page}'.");
        Ok(())
    }
}
