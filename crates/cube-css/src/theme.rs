//! Theme registry: the resolved token groups a stylesheet is generated from.
//!
//! Copyright (c) 2025 Posit, PBC

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::TokenGroup;

/// Conventional group names used by the default configuration.
pub mod groups {
    pub const COLORS: &str = "colors";
    pub const FONT_FAMILY: &str = "fontFamily";
    pub const FONT_SIZE: &str = "fontSize";
    pub const FONT_WEIGHT: &str = "fontWeight";
    pub const LINE_HEIGHT: &str = "lineHeight";
    pub const SPACING: &str = "spacing";
}

/// Read-only collection of token groups, keyed by group name.
///
/// Build it once with [`ThemeRegistry::with_group`] and share it by reference;
/// nothing in the crate mutates a registry after construction, so one registry
/// can serve any number of concurrent compiles.
///
/// # Example
///
/// ```
/// use cube_css::{ThemeRegistry, TokenGroup};
///
/// let registry = ThemeRegistry::new()
///     .with_group("spacing", TokenGroup::new().with("s", "0.5rem"));
///
/// assert!(registry.lookup("spacing").is_some());
/// assert!(registry.lookup("fontFamily").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThemeRegistry {
    groups: IndexMap<String, TokenGroup>,
}

impl ThemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a group, returning the registry for chaining.
    pub fn with_group(mut self, name: impl Into<String>, group: TokenGroup) -> Self {
        self.groups.insert(name.into(), group);
        self
    }

    /// Look up a group by name. Absence is a normal condition.
    pub fn lookup(&self, name: &str) -> Option<&TokenGroup> {
        self.groups.get(name)
    }

    /// Group names in registration order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_present_and_absent() {
        let registry = ThemeRegistry::new()
            .with_group(groups::COLORS, TokenGroup::new().with("dark", "#111"));
        assert_eq!(registry.lookup(groups::COLORS).map(TokenGroup::len), Some(1));
        assert!(registry.lookup(groups::SPACING).is_none());
    }

    #[test]
    fn test_group_names_in_registration_order() {
        let registry = ThemeRegistry::new()
            .with_group("spacing", TokenGroup::new())
            .with_group("colors", TokenGroup::new())
            .with_group("fontSize", TokenGroup::new());
        let names: Vec<&str> = registry.group_names().collect();
        assert_eq!(names, vec!["spacing", "colors", "fontSize"]);
    }

    #[test]
    fn test_registry_deserialize() {
        let registry: ThemeRegistry = serde_json::from_str(
            r##"{
                "colors": {"light": "#fff", "dark": "#000"},
                "fontFamily": {"base": ["Inter", "sans-serif"]}
            }"##,
        )
        .unwrap();
        assert_eq!(registry.len(), 2);
        let fonts = registry.lookup("fontFamily").unwrap();
        assert_eq!(fonts.get("base").unwrap().to_css(), "Inter, sans-serif");
    }

    #[test]
    fn test_empty_registry() {
        let registry = ThemeRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.lookup("colors").is_none());
    }
}
