//! `srms views`: print the role navigation table.

use anyhow::Result;
use colored::Colorize;
use serde_json::{json, Map, Value as JsonValue};

use srms_core::Role;
use srms_shell::navigation;

pub fn views(role: Option<Role>, as_json: bool) -> Result<()> {
    let roles: Vec<Role> = match role {
        Some(role) => vec![role],
        None => Role::ALL.to_vec(),
    };

    if as_json {
        println!("{}", serde_json::to_string_pretty(&to_json(&roles))?);
        return Ok(());
    }

    for role in roles {
        println!("{}", role.as_str().bold());
        for (i, view) in navigation(role).iter().enumerate() {
            println!("  {:>2}. {}", i + 1, view.label());
        }
    }
    Ok(())
}

fn to_json(roles: &[Role]) -> JsonValue {
    let mut table = Map::new();
    for role in roles {
        let labels: Vec<&str> = navigation(*role).iter().map(|v| v.label()).collect();
        table.insert(role.as_str().to_string(), json!(labels));
    }
    JsonValue::Object(table)
}
