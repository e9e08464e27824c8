//! Theme registry loading from a directory of token files.
//!
//! Copyright (c) 2025 Posit, PBC

use std::path::{Path, PathBuf};

use cube_css::{ThemeRegistry, groups};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TokenError;
use crate::file::{TokenFile, tokens_to_group};
use crate::fluid::{Viewports, clamp_generator};

/// One token group and the file it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSource {
    /// Group name in the theme registry
    pub group: String,
    /// File name, relative to the token directory
    pub file: PathBuf,
    /// Items carry min/max sizes and get fluid `clamp()` values
    #[serde(default)]
    pub fluid: bool,
}

impl GroupSource {
    pub fn new(group: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            group: group.into(),
            file: file.into(),
            fluid: false,
        }
    }

    pub fn fluid(mut self) -> Self {
        self.fluid = true;
        self
    }
}

/// Where token files live and which groups they provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenSources {
    pub dir: PathBuf,
    /// Viewports file, relative to `dir`
    pub viewports: Option<PathBuf>,
    pub groups: Vec<GroupSource>,
}

impl Default for TokenSources {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("src/design-tokens"),
            viewports: Some(PathBuf::from("viewports.json")),
            groups: vec![
                GroupSource::new(groups::COLORS, "colors.json"),
                GroupSource::new(groups::FONT_FAMILY, "fonts.json"),
                GroupSource::new(groups::FONT_SIZE, "text-sizes.json").fluid(),
                GroupSource::new(groups::FONT_WEIGHT, "text-weights.json"),
                GroupSource::new(groups::LINE_HEIGHT, "text-leading.json"),
                GroupSource::new(groups::SPACING, "spacing.json").fluid(),
            ],
        }
    }
}

impl TokenSources {
    /// Resolve a relative token directory against `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        if self.dir.is_relative() {
            self.dir = base.join(&self.dir);
        }
        self
    }

    fn load_viewports(&self) -> Result<Viewports, TokenError> {
        let Some(file) = &self.viewports else {
            return Ok(Viewports::default());
        };
        let path = self.dir.join(file);
        if !path.is_file() {
            warn!(path = %path.display(), "viewports file not found, using defaults");
            return Ok(Viewports::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|source| TokenError::Io {
            path: path.clone(),
            source,
        })?;
        let viewports: Viewports = serde_json::from_str(&content)
            .map_err(|source| TokenError::Json { path, source })?;
        viewports.validate()?;
        Ok(viewports)
    }
}

/// Read every configured token file into a registry.
///
/// A missing file leaves its group out of the registry, which the compiler
/// treats as an absent group. Unreadable or malformed files are errors.
pub fn load_registry(sources: &TokenSources) -> Result<ThemeRegistry, TokenError> {
    let viewports = if sources.groups.iter().any(|source| source.fluid) {
        Some(sources.load_viewports()?)
    } else {
        None
    };

    let mut registry = ThemeRegistry::new();
    for source in &sources.groups {
        let path = sources.dir.join(&source.file);
        if !path.is_file() {
            warn!(
                group = %source.group,
                path = %path.display(),
                "token file not found, skipping group"
            );
            continue;
        }

        let file = TokenFile::read(&path)?;
        let group = match &viewports {
            Some(viewports) if source.fluid => {
                tokens_to_group(&clamp_generator(&file.items, viewports)?)
            }
            _ => tokens_to_group(&file.items),
        };
        debug!(group = %source.group, tokens = group.len(), "loaded token group");
        registry = registry.with_group(source.group.as_str(), group);
    }

    Ok(registry)
}
