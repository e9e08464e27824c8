//! Design-token file format.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A token file is a JSON document with a list of named items:
//!
//! ```json
//! {
//!   "title": "Colors",
//!   "description": "Brand palette",
//!   "items": [
//!     { "name": "Dark Glaucous", "value": "#4a5b8c" },
//!     { "name": "Base", "value": ["Inter", "sans-serif"] },
//!     { "name": "Step 0", "min": 16, "max": 18 }
//!   ]
//! }
//! ```
//!
//! Names are display names; they become token names through [`slugify`].

use std::path::Path;

use cube_css::{TokenGroup, TokenValue};
use serde::{Deserialize, Serialize};

use crate::error::TokenError;

/// One entry in a token file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ItemValue>,
    /// Smallest size in px, for fluid tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Largest size in px, for fluid tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl TokenItem {
    pub fn new(name: impl Into<String>, value: impl Into<ItemValue>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            min: None,
            max: None,
        }
    }

    pub fn fluid(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            value: None,
            min: Some(min),
            max: Some(max),
        }
    }
}

/// A raw item value as written in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
}

impl ItemValue {
    pub fn to_token_value(&self) -> TokenValue {
        match self {
            ItemValue::Text(text) => TokenValue::Scalar(text.clone()),
            ItemValue::Number(number) => TokenValue::Scalar(number.to_string()),
            ItemValue::List(items) => TokenValue::List(items.clone()),
        }
    }
}

impl From<&str> for ItemValue {
    fn from(value: &str) -> Self {
        ItemValue::Text(value.to_string())
    }
}

impl From<f64> for ItemValue {
    fn from(value: f64) -> Self {
        ItemValue::Number(value)
    }
}

impl From<Vec<&str>> for ItemValue {
    fn from(value: Vec<&str>) -> Self {
        ItemValue::List(value.into_iter().map(str::to_string).collect())
    }
}

/// A parsed token file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Vec<TokenItem>,
}

impl TokenFile {
    pub fn from_json_str(content: &str, path: &Path) -> Result<Self, TokenError> {
        serde_json::from_str(content).map_err(|source| TokenError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn read(path: &Path) -> Result<Self, TokenError> {
        let content = std::fs::read_to_string(path).map_err(|source| TokenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content, path)
    }
}

/// Turn a display name into a token name.
///
/// Lowercases, turns whitespace and underscores into single dashes, and drops
/// anything else that is not an ASCII letter, digit or dash.
///
/// ```
/// use cube_tokens::slugify;
///
/// assert_eq!(slugify("Dark Glaucous"), "dark-glaucous");
/// assert_eq!(slugify("Step 0"), "step-0");
/// assert_eq!(slugify("  XL / 2XL  "), "xl-2xl");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
        } else if (ch == '-' || ch == '_' || ch.is_whitespace()) && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_string()
}

/// Build a token group from file items, keyed by slugified name.
///
/// Items without a value are skipped; fluid items go through
/// [`crate::clamp_generator`] first.
pub fn tokens_to_group(items: &[TokenItem]) -> TokenGroup {
    items
        .iter()
        .filter_map(|item| {
            item.value
                .as_ref()
                .map(|value| (slugify(&item.name), value.to_token_value()))
        })
        .collect()
}
