/*
 * build.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Build command implementation
 */

//! Build command implementation.
//!
//! `cube build` loads design tokens, scans content for class tokens and
//! writes one stylesheet.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cube_css::{LayerMode, OutputStyle, StyleCompiler};
use cube_tokens::load_registry;
use tracing::info;

use crate::content::{content_files, scan_tokens};
use crate::project::Project;

/// Arguments for the build command
#[derive(Debug, Default)]
pub struct BuildArgs {
    /// Project file
    pub config: Option<PathBuf>,
    /// Output file, `-` for stdout
    pub output: Option<String>,
    /// Content paths replacing the configured ones
    pub content: Vec<PathBuf>,
    /// Write plain rules instead of `@layer` blocks
    pub flatten: bool,
    /// Write compressed CSS
    pub compressed: bool,
}

/// Where the stylesheet goes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Destination {
    Stdout,
    File(PathBuf),
}

/// Execute the build command
pub fn execute(args: BuildArgs) -> Result<()> {
    let mut project = Project::load(args.config.as_deref())?;
    if !args.content.is_empty() {
        project.config.content.paths = args.content.clone();
    }
    if args.flatten {
        project.config.style.output.layers = LayerMode::Flattened;
    }
    if args.compressed {
        project.config.style.output.style = OutputStyle::Compressed;
    }

    let css = build_stylesheet(&project)?;

    match destination(&project, args.output.as_deref()) {
        Destination::Stdout => print!("{}", css),
        Destination::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(&path, &css)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = css.len(), "wrote stylesheet");
        }
    }
    Ok(())
}

/// Compile the project's stylesheet.
pub fn build_stylesheet(project: &Project) -> Result<String> {
    let style = &project.config.style;
    let rules = style.rule_table().context("Invalid rule configuration")?;
    let registry = load_registry(&project.token_sources()).context("Failed to load tokens")?;

    let files = content_files(&project.content_paths(), &project.config.content.extensions);
    let tokens = scan_tokens(&files)?;

    let sheet = StyleCompiler::new(&registry, &rules, style).compile(&tokens);
    info!(
        files = files.len(),
        matched = sheet.matched,
        unmatched = sheet.unmatched,
        "compiled stylesheet"
    );
    Ok(sheet.css)
}

fn destination(project: &Project, output: Option<&str>) -> Destination {
    match output {
        Some("-") => Destination::Stdout,
        Some(path) => Destination::File(PathBuf::from(path)),
        None => match &project.config.build.output {
            Some(path) => Destination::File(project.resolve(path)),
            None => Destination::Stdout,
        },
    }
}
