use super::connect;
use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use std::collections::HashMap;
use std::path::Path;
use swissverse_core::content::{Profile, RoleAssignment};
use swissverse_core::rest::RestTableClient;
use swissverse_core::table::{Query, TableClient};
use swissverse_core::types::{Role, Table};

#[derive(Subcommand)]
pub enum UserSubcommand {
    /// List user profiles and their role grants
    List,
    /// Grant a role to a user (idempotent)
    Grant {
        user_id: String,
        /// `admin` or `user`
        role: Role,
    },
    /// Revoke a role from a user
    Revoke { user_id: String, role: Role },
}

pub fn run(root: &Path, subcmd: UserSubcommand, json: bool) -> anyhow::Result<()> {
    let client = connect(root)?;
    match subcmd {
        UserSubcommand::List => list(&client, json),
        UserSubcommand::Grant { user_id, role } => grant(&client, &user_id, role, json),
        UserSubcommand::Revoke { user_id, role } => revoke(&client, &user_id, role, json),
    }
}

fn fetch_roles(client: &RestTableClient, user_id: Option<&str>) -> anyhow::Result<Vec<RoleAssignment>> {
    let mut query = Query::new();
    if let Some(user_id) = user_id {
        query = query.filter_eq("user_id", user_id);
    }
    let rows = client
        .fetch(Table::UserRoles, &query)
        .context("failed to fetch role assignments")?;
    rows.into_iter()
        .map(|row| serde_json::from_value(row).context("malformed role assignment row"))
        .collect()
}

fn list(client: &RestTableClient, json: bool) -> anyhow::Result<()> {
    let profiles: Vec<Profile> = client
        .fetch(Table::Profiles, &Query::new())
        .context("failed to fetch profiles")?
        .into_iter()
        .map(|row| serde_json::from_value(row).context("malformed profile row"))
        .collect::<anyhow::Result<_>>()?;

    let mut roles_by_user: HashMap<String, Vec<String>> = HashMap::new();
    for grant in fetch_roles(client, None)? {
        roles_by_user
            .entry(grant.user_id)
            .or_default()
            .push(grant.role.to_string());
    }

    if json {
        let combined: Vec<_> = profiles
            .iter()
            .map(|p| {
                serde_json::json!({
                    "id": p.id,
                    "email": p.email,
                    "display_name": p.display_name,
                    "roles": roles_by_user.get(&p.id).cloned().unwrap_or_default(),
                })
            })
            .collect();
        return print_json(&combined);
    }

    print_table(
        &["id", "email", "name", "roles"],
        profiles
            .iter()
            .map(|p| {
                vec![
                    p.id.clone(),
                    p.email.clone(),
                    p.display_name.clone().unwrap_or_default(),
                    roles_by_user
                        .get(&p.id)
                        .map(|r| r.join(", "))
                        .unwrap_or_default(),
                ]
            })
            .collect(),
    );
    Ok(())
}

fn grant(client: &RestTableClient, user_id: &str, role: Role, json: bool) -> anyhow::Result<()> {
    let existing = fetch_roles(client, Some(user_id))?;
    if existing.iter().any(|g| g.role == role) {
        if !json {
            println!("User '{user_id}' already has role '{role}'.");
        }
        return Ok(());
    }

    let row = RoleAssignment {
        id: String::new(),
        user_id: user_id.to_string(),
        role,
    };
    client
        .insert(Table::UserRoles, serde_json::to_value(&row)?)
        .with_context(|| format!("failed to grant '{role}' to '{user_id}'"))?;

    if json {
        print_json(&serde_json::json!({ "user_id": user_id, "role": role.to_string() }))
    } else {
        println!("Granted '{role}' to '{user_id}'.");
        Ok(())
    }
}

fn revoke(client: &RestTableClient, user_id: &str, role: Role, json: bool) -> anyhow::Result<()> {
    let existing = fetch_roles(client, Some(user_id))?;
    let grant = existing
        .iter()
        .find(|g| g.role == role)
        .with_context(|| format!("user '{user_id}' does not have role '{role}'"))?;

    client
        .delete(Table::UserRoles, &grant.id)
        .with_context(|| format!("failed to revoke '{role}' from '{user_id}'"))?;

    if json {
        print_json(&serde_json::json!({ "user_id": user_id, "role": role.to_string() }))
    } else {
        println!("Revoked '{role}' from '{user_id}'.");
        Ok(())
    }
}
