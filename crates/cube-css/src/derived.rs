//! Derived utility classes.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A utility family turns every token of a source group into a class that
//! assigns the token's value to one target property, e.g. the `gutter`
//! family over `spacing` yields `.gutter-s { --gutter: 0.5rem; }`.
//!
//! Class names are built from token names and escaped like dispatched ones,
//! so a token such as `1/2` still yields a valid selector.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::MissingGroupPolicy;
use crate::selector::escape_identifier;
use crate::theme::{ThemeRegistry, groups};
use crate::types::{Declarations, Fragment, Layer};

/// A family of utility classes derived from one token group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilityFamily {
    /// Source group in the theme registry
    pub group: String,
    /// Class name prefix (`gutter` gives `.gutter-<token>`)
    pub prefix: String,
    /// Property each class assigns (usually a custom property)
    pub property: String,
}

impl UtilityFamily {
    pub fn new(
        group: impl Into<String>,
        prefix: impl Into<String>,
        property: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            prefix: prefix.into(),
            property: property.into(),
        }
    }

    /// Flow spacing, region spacing and gutter, all over the spacing group.
    pub fn defaults() -> Vec<UtilityFamily> {
        vec![
            UtilityFamily::new(groups::SPACING, "flow-space", "--flow-space"),
            UtilityFamily::new(groups::SPACING, "region-space", "--region-space"),
            UtilityFamily::new(groups::SPACING, "gutter", "--gutter"),
        ]
    }

    pub fn selector(&self, token: &str) -> String {
        format!(".{}", escape_identifier(&format!("{}-{}", self.prefix, token)))
    }
}

/// Emit one components-layer fragment per token for every family.
pub fn emit_derived_utilities(
    registry: &ThemeRegistry,
    families: &[UtilityFamily],
    policy: MissingGroupPolicy,
) -> Vec<Fragment> {
    let mut fragments = Vec::new();

    for family in families {
        let Some(group) = registry.lookup(&family.group) else {
            warn!(
                group = %family.group,
                family = %family.prefix,
                "token group not found; utility family skipped"
            );
            match policy {
                MissingGroupPolicy::SkipGroup => continue,
                MissingGroupPolicy::SkipEmitter => return Vec::new(),
            }
        };

        fragments.extend(group.iter().map(|(name, value)| {
            Fragment::new(
                family.selector(name),
                Layer::Components,
                Declarations::new().set(family.property.as_str(), value.to_css()),
            )
        }));
    }

    debug!(count = fragments.len(), "emitted derived utilities");
    fragments
}
