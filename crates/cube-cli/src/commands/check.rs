/*
 * check.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Check command implementation
 */

//! Check command implementation.
//!
//! Validates the project configuration and rule table, loads tokens, and
//! reports which configured groups are available.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cube_css::ThemeRegistry;
use cube_tokens::load_registry;
use tracing::warn;

use crate::project::{Project, ProjectConfig};

/// Arguments for the check command
#[derive(Debug, Default)]
pub struct CheckArgs {
    pub config: Option<PathBuf>,
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<()> {
    let project = Project::load(args.config.as_deref())?;
    let rules = project
        .config
        .style
        .rule_table()
        .context("Invalid rule configuration")?;
    let registry = load_registry(&project.token_sources()).context("Failed to load tokens")?;

    println!("rules: {}", rules.len());
    for line in group_report(&project.config, &registry) {
        println!("{}", line);
    }
    Ok(())
}

/// One line per group referenced by the configuration, in first-use order.
fn group_report(config: &ProjectConfig, registry: &ThemeRegistry) -> Vec<String> {
    let mut referenced: Vec<&str> = Vec::new();
    let used = config
        .style
        .custom_properties
        .iter()
        .map(|group| group.group.as_str())
        .chain(config.style.utilities.iter().map(|family| family.group.as_str()));
    for name in used {
        if !referenced.contains(&name) {
            referenced.push(name);
        }
    }

    referenced
        .into_iter()
        .map(|name| match registry.lookup(name) {
            Some(group) => format!("group {}: {} tokens", name, group.len()),
            None => {
                warn!(group = name, "configured token group is not available");
                format!("group {}: missing", name)
            }
        })
        .collect()
}
