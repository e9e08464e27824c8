//! Project configuration (`cube.toml`).
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A project file combines where tokens and content live with the engine
//! configuration. Every section is optional:
//!
//! ```toml
//! [tokens]
//! dir = "src/design-tokens"
//! viewports = "viewports.json"
//!
//! [[tokens.groups]]
//! group = "spacing"
//! file = "spacing.json"
//! fluid = true
//!
//! [content]
//! paths = ["src"]
//!
//! [build]
//! output = "public/css/utilities.css"
//!
//! [output]
//! layers = "flattened"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cube_css::StyleConfig;
use cube_tokens::TokenSources;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "cube.toml";

const DEFAULT_EXTENSIONS: &[&str] = &[
    "astro", "html", "js", "jsx", "md", "mdx", "svelte", "ts", "tsx", "vue",
];

/// Which files are scanned for class tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub paths: Vec<PathBuf>,
    pub extensions: Vec<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            paths: vec![PathBuf::from("src")],
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Stylesheet path; standard output when unset
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub tokens: TokenSources,
    pub content: ContentConfig,
    pub build: BuildConfig,
    #[serde(flatten)]
    pub style: StyleConfig,
}

/// A loaded project: its configuration plus the directory relative paths
/// resolve against.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl Project {
    /// Load the project file at `path`, or `cube.toml` in the current
    /// directory. A missing default file means an all-defaults project.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        let root = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        if !explicit && !path.is_file() {
            debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
            return Ok(Self {
                root,
                config: ProjectConfig::default(),
            });
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Invalid project configuration in {}", path.display()))?;
        Ok(Self { root, config })
    }

    pub fn parse(content: &str) -> Result<ProjectConfig> {
        Ok(toml::from_str(content)?)
    }

    /// Token sources with the token directory resolved against the root.
    pub fn token_sources(&self) -> TokenSources {
        self.config.tokens.clone().relative_to(&self.root)
    }

    /// Content paths resolved against the root.
    pub fn content_paths(&self) -> Vec<PathBuf> {
        self.config
            .content
            .paths
            .iter()
            .map(|path| self.resolve(path))
            .collect()
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_relative() {
            self.root.join(path)
        } else {
            path.to_path_buf()
        }
    }
}
