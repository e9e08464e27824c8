//! Custom property emission.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Projects selected token groups into root-scope CSS variables. Every token
//! `name` in a group exposed under prefix `p` becomes `--p-name`:
//!
//! ```text
//! spacing = { s: 0.5rem, m: 1rem }   prefix "space"
//!   =>  :root { --space-s: 0.5rem; --space-m: 1rem; }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::MissingGroupPolicy;
use crate::theme::{ThemeRegistry, groups};
use crate::types::{Declarations, Fragment, Layer};

/// Selector used for the custom property fragment.
pub const ROOT_SELECTOR: &str = ":root";

/// One token group exposed as custom properties under a prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyGroup {
    /// Name of the group in the theme registry
    pub group: String,
    /// Custom property prefix, without leading dashes
    pub prefix: String,
}

impl PropertyGroup {
    pub fn new(group: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            prefix: prefix.into(),
        }
    }

    /// The groups exposed by a default build.
    ///
    /// Font families and font weights share the `font` prefix, so their token
    /// names must not collide.
    pub fn defaults() -> Vec<PropertyGroup> {
        vec![
            PropertyGroup::new(groups::COLORS, "color"),
            PropertyGroup::new(groups::FONT_FAMILY, "font"),
            PropertyGroup::new(groups::FONT_SIZE, "size"),
            PropertyGroup::new(groups::FONT_WEIGHT, "font"),
            PropertyGroup::new(groups::LINE_HEIGHT, "leading"),
            PropertyGroup::new(groups::SPACING, "space"),
        ]
    }

    /// The property name for one token of this group.
    pub fn property_name(&self, token: &str) -> String {
        format!("--{}-{}", self.prefix, token)
    }
}

/// Emit one custom property per token for every configured group.
///
/// Groups missing from the registry are handled according to `policy`:
/// [`MissingGroupPolicy::SkipGroup`] omits only that group, while
/// [`MissingGroupPolicy::SkipEmitter`] discards the whole emission.
///
/// Two groups that produce the same property name overwrite each other; the
/// property keeps its first position and takes the last value.
pub fn emit_custom_properties(
    registry: &ThemeRegistry,
    property_groups: &[PropertyGroup],
    policy: MissingGroupPolicy,
) -> Declarations {
    let mut properties = Declarations::new();

    for property_group in property_groups {
        let Some(group) = registry.lookup(&property_group.group) else {
            warn!(
                group = %property_group.group,
                prefix = %property_group.prefix,
                "token group not found; no custom properties emitted for it"
            );
            match policy {
                MissingGroupPolicy::SkipGroup => continue,
                MissingGroupPolicy::SkipEmitter => return Declarations::new(),
            }
        };

        for (name, value) in group.iter() {
            properties.insert(property_group.property_name(name), value.to_css());
        }
    }

    debug!(count = properties.len(), "emitted custom properties");
    properties
}

/// Wrap custom properties in a `:root` fragment in the base layer.
///
/// Returns `None` when there is nothing to emit.
pub fn root_fragment(properties: Declarations) -> Option<Fragment> {
    if properties.is_empty() {
        return None;
    }
    Some(Fragment::new(ROOT_SELECTOR, Layer::Base, properties))
}
