use super::connect;
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use serde_json::json;
use std::path::Path;
use swissverse_core::content::SectionTitle;
use swissverse_core::rest::RestTableClient;
use swissverse_core::table::{Query, TableClient};
use swissverse_core::types::Table;

#[derive(Subcommand)]
pub enum SectionSubcommand {
    /// List every section title
    List,
    /// Show one section's title
    Get { section: String },
    /// Create or update a section title (singleton per section name)
    Set {
        section: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        subtitle: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: SectionSubcommand, json: bool) -> anyhow::Result<()> {
    let client = connect(root)?;
    match subcmd {
        SectionSubcommand::List => list(&client, json),
        SectionSubcommand::Get { section } => get(&client, &section, json),
        SectionSubcommand::Set {
            section,
            title,
            subtitle,
        } => set(&client, &section, &title, subtitle, json),
    }
}

fn fetch_all(client: &RestTableClient) -> anyhow::Result<Vec<SectionTitle>> {
    let rows = client
        .fetch(Table::SectionTitles, &Query::new())
        .context("failed to fetch section titles")?;
    rows.into_iter()
        .map(|row| serde_json::from_value(row).context("malformed section title row"))
        .collect()
}

fn list(client: &RestTableClient, json: bool) -> anyhow::Result<()> {
    let sections = fetch_all(client)?;
    if json {
        return print_json(&sections);
    }
    print_table(
        &["section", "title", "subtitle"],
        sections
            .iter()
            .map(|s| {
                vec![
                    s.section.clone(),
                    s.title.clone(),
                    s.subtitle.clone().unwrap_or_default(),
                ]
            })
            .collect(),
    );
    Ok(())
}

fn get(client: &RestTableClient, section: &str, json: bool) -> anyhow::Result<()> {
    let sections = fetch_all(client)?;
    let found = sections
        .iter()
        .find(|s| s.section == section)
        .with_context(|| format!("no section named '{section}'"))?;
    if json {
        print_json(found)
    } else {
        println!("{}: {}", found.section, found.title);
        if let Some(subtitle) = &found.subtitle {
            println!("  {subtitle}");
        }
        Ok(())
    }
}

fn set(
    client: &RestTableClient,
    section: &str,
    title: &str,
    subtitle: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let existing = client
        .fetch(
            Table::SectionTitles,
            &Query::new().filter_eq("section", section),
        )
        .context("failed to fetch section title")?;

    match existing
        .first()
        .and_then(|row| row.get("id"))
        .and_then(|id| id.as_str())
    {
        Some(id) => {
            let mut patch = json!({ "title": title });
            if let Some(subtitle) = &subtitle {
                patch["subtitle"] = json!(subtitle);
            }
            client
                .update(Table::SectionTitles, id, patch)
                .with_context(|| format!("failed to update section '{section}'"))?;
        }
        None => {
            let row = SectionTitle {
                id: String::new(),
                section: section.to_string(),
                title: title.to_string(),
                subtitle,
            };
            client
                .insert(Table::SectionTitles, serde_json::to_value(&row)?)
                .with_context(|| format!("failed to create section '{section}'"))?;
        }
    }

    if json {
        print_json(&json!({ "section": section, "title": title }))
    } else {
        println!("Set section '{section}'.");
        Ok(())
    }
}
