/*
 * rules.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Rules command implementation
 */

//! Lists the rule table in dispatch order.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cube_css::RuleTable;

use crate::project::Project;

/// Arguments for the rules command
#[derive(Debug, Default)]
pub struct RulesArgs {
    pub config: Option<PathBuf>,
}

/// Execute the rules command
pub fn execute(args: RulesArgs) -> Result<()> {
    let project = Project::load(args.config.as_deref())?;
    let rules = project
        .config
        .style
        .rule_table()
        .context("Invalid rule configuration")?;
    for line in listing(&rules) {
        println!("{}", line);
    }
    Ok(())
}

fn listing(rules: &RuleTable) -> Vec<String> {
    rules
        .rules()
        .enumerate()
        .map(|(index, info)| {
            let kind = if info.is_pattern { "pattern" } else { "exact" };
            format!(
                "{:>2}  {:<16} {:<10} {:<7}  {}",
                index, info.name, info.layer, kind, info.matcher
            )
            .trim_end()
            .to_string()
        })
        .collect()
}
