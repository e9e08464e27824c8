//! Core value types shared by the emitters, the dispatcher and the composer.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! The type hierarchy is:
//! - TokenValue / TokenGroup: resolved design tokens, one group per design dimension
//! - Declarations: an ordered set of CSS property/value pairs
//! - Fragment: one selector plus its declarations, tagged with a cascade layer
//! - Layer: the closed, ordered set of cascade layers fragments are sorted into

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::CssError;

/// The value of a single design token.
///
/// Most tokens are plain strings (a color, a length). Font stacks are
/// ordered lists that serialize as a comma-separated CSS value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Scalar(String),
    List(Vec<String>),
}

impl TokenValue {
    /// Render the value as CSS text. Lists are joined with `", "`.
    pub fn to_css(&self) -> String {
        match self {
            TokenValue::Scalar(value) => value.clone(),
            TokenValue::List(items) => items.join(", "),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        TokenValue::Scalar(value.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        TokenValue::Scalar(value)
    }
}

impl From<Vec<String>> for TokenValue {
    fn from(items: Vec<String>) -> Self {
        TokenValue::List(items)
    }
}

impl From<Vec<&str>> for TokenValue {
    fn from(items: Vec<&str>) -> Self {
        TokenValue::List(items.into_iter().map(String::from).collect())
    }
}

/// A named mapping of token name to value, kept in insertion order.
///
/// Names are unique: inserting an existing name replaces its value without
/// moving it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenGroup {
    tokens: IndexMap<String, TokenValue>,
}

impl TokenGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token, returning the group for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<TokenValue>) {
        self.tokens.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&TokenValue> {
        self.tokens.get(name)
    }

    /// Iterate tokens in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenValue)> {
        self.tokens.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for TokenGroup
where
    N: Into<String>,
    V: Into<TokenValue>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut group = TokenGroup::new();
        for (name, value) in iter {
            group.insert(name, value);
        }
        group
    }
}

/// Cascade layers, in precedence order.
///
/// Fragments in a later layer win over fragments in an earlier layer
/// regardless of specificity, so the composer always emits them in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Reset,
    Base,
    Components,
    Default,
}

impl Layer {
    /// All layers in precedence order.
    pub const ALL: [Layer; 4] = [Layer::Reset, Layer::Base, Layer::Components, Layer::Default];

    pub fn name(&self) -> &'static str {
        match self {
            Layer::Reset => "reset",
            Layer::Base => "base",
            Layer::Components => "components",
            Layer::Default => "default",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Layer {
    type Err = CssError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reset" => Ok(Layer::Reset),
            "base" => Ok(Layer::Base),
            "components" => Ok(Layer::Components),
            "default" => Ok(Layer::Default),
            other => Err(CssError::UnknownLayer(other.to_string())),
        }
    }
}

/// An ordered set of CSS declarations.
///
/// Setting a property that is already present overwrites its value in place,
/// so the first-set position is kept and the last-set value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Declarations {
    entries: IndexMap<String, String>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, returning the declarations for chaining.
    pub fn set(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(property, value);
        self
    }

    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries.get(property).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(property, value)| (property.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as `prop:value;` pairs with no whitespace.
    ///
    /// ```
    /// use cube_css::Declarations;
    ///
    /// let decls = Declarations::new().set("--space-s", "0.5rem").set("--space-m", "1rem");
    /// assert_eq!(decls.to_inline(), "--space-s:0.5rem;--space-m:1rem;");
    /// ```
    pub fn to_inline(&self) -> String {
        let mut out = String::new();
        for (property, value) in self.iter() {
            out.push_str(property);
            out.push(':');
            out.push_str(value);
            out.push(';');
        }
        out
    }
}

impl<P, V> FromIterator<(P, V)> for Declarations
where
    P: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, V)>>(iter: I) -> Self {
        let mut decls = Declarations::new();
        for (property, value) in iter {
            decls.insert(property, value);
        }
        decls
    }
}

/// One unit of generated CSS: a selector, its declarations and its layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub selector: String,
    pub declarations: Declarations,
    pub layer: Layer,
}

impl Fragment {
    pub fn new(selector: impl Into<String>, layer: Layer, declarations: Declarations) -> Self {
        Self {
            selector: selector.into(),
            declarations,
            layer,
        }
    }
}
