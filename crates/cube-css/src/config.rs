//! Engine configuration.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Everything the engine generates is driven by data: which token groups are
//! exposed as custom properties, which utility families are derived, which
//! extra pattern rules exist, and how the stylesheet is serialized.
//!
//! # Configuration Format
//!
//! ```toml
//! missing-groups = "skip-group"
//!
//! [[custom-properties]]
//! group = "spacing"
//! prefix = "space"
//!
//! [[utilities]]
//! group = "spacing"
//! prefix = "gutter"
//! property = "--gutter"
//!
//! [[rules]]
//! name = "measure"
//! pattern = "measure-(.+)"
//! property = "max-inline-size"
//! value = "var(--measure-$1)"
//!
//! [output]
//! layers = "layered"
//! style = "compressed"
//! ```
//!
//! Omitted sections fall back to the defaults of a standard build.

use serde::{Deserialize, Serialize};

use crate::compose::ComposeOptions;
use crate::derived::UtilityFamily;
use crate::error::CssError;
use crate::primitives::default_rules;
use crate::selector::is_identifier_fragment;
use crate::properties::PropertyGroup;
use crate::rules::{Rule, RuleMatch, RuleOutput, RuleTable};
use crate::types::{Declarations, Layer};

/// What happens when a configured token group is absent from the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingGroupPolicy {
    /// Omit only the missing group's output
    #[default]
    SkipGroup,
    /// Omit the whole emitter's output as soon as one group is missing
    SkipEmitter,
}

/// A pattern rule declared in configuration.
///
/// `value` may reference capture groups as `$1` through `$9`; `$$` is a
/// literal dollar sign. A token whose referenced captures contain anything
/// but identifier characters produces no output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub name: String,
    pub pattern: String,
    pub property: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<Layer>,
}

impl RuleSpec {
    /// Number of capture groups `value` reads.
    pub fn arity(&self) -> usize {
        let mut arity = 0;
        let mut chars = self.value.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch != '$' {
                continue;
            }
            match chars.peek() {
                Some('$') => {
                    chars.next();
                }
                Some(digit) if digit.is_ascii_digit() => {
                    let index = digit.to_digit(10).unwrap_or(0) as usize;
                    arity = arity.max(index);
                    chars.next();
                }
                _ => {}
            }
        }
        arity
    }

    pub fn to_rule(&self) -> Rule {
        let property = self.property.clone();
        let template = self.value.clone();
        let rule = Rule::pattern(
            self.name.as_str(),
            self.pattern.as_str(),
            self.arity(),
            move |rule_match, _| match expand_template(&template, rule_match) {
                Some(value) => Declarations::new().set(property.as_str(), value).into(),
                None => RuleOutput::none(),
            },
        );
        match self.layer {
            Some(layer) => rule.layer(layer),
            None => rule,
        }
    }
}

fn expand_template(template: &str, rule_match: &RuleMatch<'_>) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('$') => {
                out.push('$');
                chars.next();
            }
            Some(digit) if digit.is_ascii_digit() => {
                let index = digit.to_digit(10).unwrap_or(0) as usize;
                let capture = rule_match.get(index).unwrap_or_default();
                if !is_identifier_fragment(capture) {
                    return None;
                }
                out.push_str(capture);
                chars.next();
            }
            _ => out.push('$'),
        }
    }
    Some(out)
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StyleConfig {
    /// Token groups exposed as `:root` custom properties, in order
    pub custom_properties: Vec<PropertyGroup>,
    /// Utility families derived from token groups, in order
    pub utilities: Vec<UtilityFamily>,
    /// Extra pattern rules, dispatched after the built-in rules
    pub rules: Vec<RuleSpec>,
    pub missing_groups: MissingGroupPolicy,
    pub output: ComposeOptions,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            custom_properties: PropertyGroup::defaults(),
            utilities: UtilityFamily::defaults(),
            rules: Vec::new(),
            missing_groups: MissingGroupPolicy::default(),
            output: ComposeOptions::default(),
        }
    }
}

impl StyleConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, CssError> {
        Ok(toml::from_str(content)?)
    }

    /// The built-in rules followed by the configured ones, validated.
    pub fn rule_table(&self) -> Result<RuleTable, CssError> {
        RuleTable::new(
            default_rules()
                .into_iter()
                .chain(self.rules.iter().map(RuleSpec::to_rule)),
        )
    }
}
