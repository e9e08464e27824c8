//! cube CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod content;
mod project;

#[derive(Parser)]
#[command(name = "cube")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Utility-class stylesheet generator for design-token projects", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the stylesheet for a project
    Build {
        /// Project configuration file (defaults to ./cube.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Write output to FILE (use '--output -' for stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Content path to scan for class names (repeatable, replaces configured paths)
        #[arg(long)]
        content: Vec<PathBuf>,

        /// Emit plain rules instead of @layer blocks
        #[arg(long)]
        flatten: bool,

        /// Emit compressed CSS
        #[arg(long)]
        compressed: bool,
    },

    /// Validate configuration, rules and token files
    Check {
        /// Project configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List rules in dispatch order
    Rules {
        /// Project configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cube=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            config,
            output,
            content,
            flatten,
            compressed,
        } => commands::build::execute(commands::build::BuildArgs {
            config,
            output,
            content,
            flatten,
            compressed,
        }),
        Commands::Check { config } => {
            commands::check::execute(commands::check::CheckArgs { config })
        }
        Commands::Rules { config } => {
            commands::rules::execute(commands::rules::RulesArgs { config })
        }
    }
}
