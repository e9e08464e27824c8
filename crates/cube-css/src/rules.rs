//! Rule table and dispatch.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! A rule pairs a matcher with a handler and a target cascade layer. Rules
//! are kept in registration order and dispatch is a linear scan: the first
//! rule whose matcher accepts a class token produces that token's CSS, and
//! no other rule is consulted. A token no rule accepts produces nothing.
//!
//! Matchers come in two kinds:
//!
//! - exact: the token must equal a literal (`cluster`)
//! - pattern: the token must match a regular expression in full; capture
//!   groups are handed to the handler (`gutter-([a-z0-9-]+)`)
//!
//! Handlers either return one declaration set for the token's own selector
//! or a list of [`RuleBlock`]s, each of which may derive its selector from the
//! base selector through a [`SelectorTransform`]. That second form is what
//! layout primitives use to emit a container rule plus child rules.
//!
//! The table is validated once, in [`RuleTable::new`]; a broken pattern or a
//! handler that reads more capture groups than its pattern defines is an
//! error there rather than at dispatch time.

use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::error::CssError;
use crate::selector::class_selector;
use crate::types::{Declarations, Fragment, Layer};

/// Handler signature shared by every rule.
pub type HandlerFn = dyn Fn(&RuleMatch<'_>, &RuleContext<'_>) -> RuleOutput + Send + Sync;

/// A function from a base selector to a derived selector.
#[derive(Clone)]
pub struct SelectorTransform(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl SelectorTransform {
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(transform))
    }

    /// Append a fixed suffix to the base selector.
    ///
    /// `SelectorTransform::suffix(" > * + *")` turns `.flow` into `.flow > * + *`.
    pub fn suffix(suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        Self::new(move |base| format!("{}{}", base, suffix))
    }

    pub fn apply(&self, base: &str) -> String {
        (self.0)(base)
    }
}

impl fmt::Debug for SelectorTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SelectorTransform(..)")
    }
}

/// One declaration set, optionally applied to a derived selector.
#[derive(Debug, Clone)]
pub struct RuleBlock {
    pub transform: Option<SelectorTransform>,
    pub declarations: Declarations,
}

impl RuleBlock {
    /// A block applied to the base selector itself.
    pub fn base(declarations: Declarations) -> Self {
        Self {
            transform: None,
            declarations,
        }
    }

    /// A block applied to a selector derived from the base selector.
    pub fn derived(transform: SelectorTransform, declarations: Declarations) -> Self {
        Self {
            transform: Some(transform),
            declarations,
        }
    }
}

/// What a handler produces for one matched token.
#[derive(Debug, Clone)]
pub enum RuleOutput {
    /// A single declaration set for the matched selector
    Declarations(Declarations),
    /// Several declaration sets, in output order
    Blocks(Vec<RuleBlock>),
}

impl RuleOutput {
    /// Output that produces no CSS.
    pub fn none() -> Self {
        RuleOutput::Blocks(Vec::new())
    }

    fn into_fragments(self, base: &str, layer: Layer) -> Vec<Fragment> {
        match self {
            RuleOutput::Declarations(declarations) => {
                if declarations.is_empty() {
                    Vec::new()
                } else {
                    vec![Fragment::new(base, layer, declarations)]
                }
            }
            RuleOutput::Blocks(blocks) => blocks
                .into_iter()
                .filter(|block| !block.declarations.is_empty())
                .map(|block| {
                    let selector = match &block.transform {
                        Some(transform) => transform.apply(base),
                        None => base.to_string(),
                    };
                    Fragment::new(selector, layer, block.declarations)
                })
                .collect(),
        }
    }
}

impl From<Declarations> for RuleOutput {
    fn from(declarations: Declarations) -> Self {
        RuleOutput::Declarations(declarations)
    }
}

impl From<Vec<RuleBlock>> for RuleOutput {
    fn from(blocks: Vec<RuleBlock>) -> Self {
        RuleOutput::Blocks(blocks)
    }
}

/// A successful match of a class token against a rule.
#[derive(Debug, Clone)]
pub struct RuleMatch<'t> {
    token: &'t str,
    groups: Vec<Option<&'t str>>,
}

impl<'t> RuleMatch<'t> {
    /// The full class token that matched.
    pub fn token(&self) -> &'t str {
        self.token
    }

    /// Capture group `index`. Index 0 is the whole token; exact rules have no
    /// other groups.
    pub fn get(&self, index: usize) -> Option<&'t str> {
        if index == 0 {
            return Some(self.token);
        }
        self.groups.get(index - 1).copied().flatten()
    }
}

/// Context handed to a handler alongside its match.
#[derive(Debug)]
pub struct RuleContext<'a> {
    selector: &'a str,
}

impl<'a> RuleContext<'a> {
    /// The escaped base selector for the matched token (`.flow`).
    pub fn selector(&self) -> &'a str {
        self.selector
    }

    /// Build a selector transform for a derived block.
    pub fn transform<F>(&self, transform: F) -> SelectorTransform
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        SelectorTransform::new(transform)
    }
}

#[derive(Debug, Clone)]
enum MatcherSource {
    Exact(String),
    Pattern { pattern: String, arity: usize },
}

/// A compiled matcher.
#[derive(Debug, Clone)]
pub enum Matcher {
    Exact(String),
    Pattern(Regex),
}

impl Matcher {
    fn capture<'t>(&self, token: &'t str) -> Option<RuleMatch<'t>> {
        match self {
            Matcher::Exact(literal) => (literal == token).then(|| RuleMatch {
                token,
                groups: Vec::new(),
            }),
            Matcher::Pattern(regex) => {
                let captures = regex.captures(token)?;
                let groups = captures
                    .iter()
                    .skip(1)
                    .map(|group| group.map(|m| m.as_str()))
                    .collect();
                Some(RuleMatch { token, groups })
            }
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Matcher::Pattern(_))
    }
}

/// An unvalidated rule definition.
///
/// Rules are collected into a [`RuleTable`], which compiles and checks them.
#[derive(Clone)]
pub struct Rule {
    name: String,
    source: MatcherSource,
    layer: Layer,
    handler: Arc<HandlerFn>,
}

impl Rule {
    /// A rule matching exactly one literal class token.
    pub fn exact<F>(name: impl Into<String>, literal: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&RuleMatch<'_>, &RuleContext<'_>) -> RuleOutput + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            source: MatcherSource::Exact(literal.into()),
            layer: Layer::Components,
            handler: Arc::new(handler),
        }
    }

    /// A rule matching every token that matches `pattern` in full.
    ///
    /// `arity` is the number of capture groups the handler reads; the pattern
    /// must define at least that many.
    pub fn pattern<F>(
        name: impl Into<String>,
        pattern: impl Into<String>,
        arity: usize,
        handler: F,
    ) -> Self
    where
        F: Fn(&RuleMatch<'_>, &RuleContext<'_>) -> RuleOutput + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            source: MatcherSource::Pattern {
                pattern: pattern.into(),
                arity,
            },
            layer: Layer::Components,
            handler: Arc::new(handler),
        }
    }

    /// Route this rule's fragments into `layer` (components by default).
    pub fn layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn compile(self) -> Result<CompiledRule, CssError> {
        let matcher = match self.source {
            MatcherSource::Exact(literal) => {
                if literal.is_empty() {
                    return Err(CssError::EmptyMatcher { rule: self.name });
                }
                Matcher::Exact(literal)
            }
            MatcherSource::Pattern { pattern, arity } => {
                if pattern.is_empty() {
                    return Err(CssError::EmptyMatcher { rule: self.name });
                }
                // Anchor so a match always spans the whole token
                let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
                    CssError::InvalidPattern {
                        rule: self.name.clone(),
                        source,
                    }
                })?;
                let found = regex.captures_len() - 1;
                if found < arity {
                    return Err(CssError::MissingCaptureGroups {
                        rule: self.name,
                        expected: arity,
                        found,
                    });
                }
                Matcher::Pattern(regex)
            }
        };

        Ok(CompiledRule {
            name: self.name,
            matcher,
            layer: self.layer,
            handler: self.handler,
        })
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("layer", &self.layer)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
struct CompiledRule {
    name: String,
    matcher: Matcher,
    layer: Layer,
    handler: Arc<HandlerFn>,
}

/// Summary of one registered rule, for listings and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo<'a> {
    pub name: &'a str,
    /// The literal for exact rules, the anchored regex for pattern rules
    pub matcher: &'a str,
    pub is_pattern: bool,
    pub layer: Layer,
}

/// The result of dispatching one class token.
#[derive(Debug, Clone)]
pub struct Dispatch {
    /// Position of the winning rule in the table
    pub rule_index: usize,
    pub fragments: Vec<Fragment>,
}

/// A validated, ordered, immutable rule table.
#[derive(Clone, Default)]
pub struct RuleTable {
    rules: Vec<CompiledRule>,
}

impl RuleTable {
    /// Compile and validate rules, keeping their order.
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Result<Self, CssError> {
        let rules = rules
            .into_iter()
            .map(Rule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// A new table with `rules` appended after the existing ones.
    pub fn with_rules(&self, rules: impl IntoIterator<Item = Rule>) -> Result<Self, CssError> {
        let mut table = self.clone();
        for rule in rules {
            table.rules.push(rule.compile()?);
        }
        Ok(table)
    }

    /// Dispatch a class token. `None` means no rule matched.
    pub fn dispatch(&self, token: &str) -> Option<Dispatch> {
        self.rules
            .iter()
            .enumerate()
            .find_map(|(rule_index, rule)| {
                let rule_match = rule.matcher.capture(token)?;
                let selector = class_selector(token);
                let context = RuleContext {
                    selector: &selector,
                };
                let output = (rule.handler)(&rule_match, &context);
                Some(Dispatch {
                    rule_index,
                    fragments: output.into_fragments(&selector, rule.layer),
                })
            })
    }

    pub fn rules(&self) -> impl Iterator<Item = RuleInfo<'_>> {
        self.rules.iter().map(|rule| RuleInfo {
            name: &rule.name,
            matcher: match &rule.matcher {
                Matcher::Exact(literal) => literal.as_str(),
                Matcher::Pattern(regex) => regex.as_str(),
            },
            is_pattern: rule.matcher.is_pattern(),
            layer: rule.layer,
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| (&rule.name, rule.layer)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn display_flex(_: &RuleMatch<'_>, _: &RuleContext<'_>) -> RuleOutput {
        Declarations::new().set("display", "flex").into()
    }

    #[test]
    fn test_exact_rule_matches_literal_only() {
        let table = RuleTable::new([Rule::exact("row", "row", display_flex)]).unwrap();
        let dispatch = table.dispatch("row").unwrap();
        assert_eq!(dispatch.fragments.len(), 1);
        assert_eq!(dispatch.fragments[0].selector, ".row");
        assert!(table.dispatch("rows").is_none());
        assert!(table.dispatch("a-row").is_none());
    }

    #[test]
    fn test_pattern_rule_passes_captures() {
        let table = RuleTable::new([Rule::pattern("gap", r"gap-(\w+)", 1, |m, _| {
            Declarations::new()
                .set("gap", format!("var(--space-{})", m.get(1).unwrap_or_default()))
                .into()
        })])
        .unwrap();
        let dispatch = table.dispatch("gap-m").unwrap();
        assert_eq!(dispatch.fragments[0].declarations.get("gap"), Some("var(--space-m)"));
    }

    #[test]
    fn test_pattern_must_match_whole_token() {
        let table = RuleTable::new([Rule::pattern("gap", r"gap-(\w+)", 1, |_, _| {
            Declarations::new().set("gap", "1rem").into()
        })])
        .unwrap();
        assert!(table.dispatch("row-gap-m").is_none());
        assert!(table.dispatch("gap-m:hover").is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let table = RuleTable::new([
            Rule::exact("specific", "gap-m", |_, _| {
                Declarations::new().set("gap", "exact").into()
            }),
            Rule::pattern("general", r"gap-(.+)", 1, |_, _| {
                Declarations::new().set("gap", "pattern").into()
            }),
        ])
        .unwrap();
        let exact = table.dispatch("gap-m").unwrap();
        assert_eq!(exact.rule_index, 0);
        assert_eq!(exact.fragments[0].declarations.get("gap"), Some("exact"));
        let pattern = table.dispatch("gap-l").unwrap();
        assert_eq!(pattern.rule_index, 1);
    }

    #[test]
    fn test_unmatched_token_is_inert() {
        let table = RuleTable::new([Rule::exact("row", "row", display_flex)]).unwrap();
        assert!(table.dispatch("text-center").is_none());
        assert!(table.dispatch("").is_none());
    }

    #[test]
    fn test_blocks_with_selector_transforms() {
        let table = RuleTable::new([Rule::exact("stack", "stack", |_, ctx| {
            vec![
                RuleBlock::base(Declarations::new().set("display", "flex")),
                RuleBlock::derived(
                    ctx.transform(|base| format!("{} > * + *", base)),
                    Declarations::new().set("margin-top", "1em"),
                ),
                RuleBlock::derived(
                    SelectorTransform::suffix("[data-dense]"),
                    Declarations::new().set("gap", "0"),
                ),
            ]
            .into()
        })])
        .unwrap();
        let selectors: Vec<String> = table
            .dispatch("stack")
            .unwrap()
            .fragments
            .into_iter()
            .map(|f| f.selector)
            .collect();
        assert_eq!(selectors, vec![".stack", ".stack > * + *", ".stack[data-dense]"]);
    }

    #[test]
    fn test_empty_blocks_dropped() {
        let table = RuleTable::new([Rule::exact("noop", "noop", |_, _| RuleOutput::none())])
            .unwrap();
        let dispatch = table.dispatch("noop").unwrap();
        assert!(dispatch.fragments.is_empty());
    }

    #[test]
    fn test_rule_layer_declared_per_rule() {
        let table = RuleTable::new([
            Rule::exact("reset", "reset-box", display_flex).layer(Layer::Reset),
            Rule::exact("plain", "plain", display_flex),
        ])
        .unwrap();
        assert_eq!(table.dispatch("reset-box").unwrap().fragments[0].layer, Layer::Reset);
        assert_eq!(table.dispatch("plain").unwrap().fragments[0].layer, Layer::Components);
    }

    #[test]
    fn test_invalid_pattern_fails_at_construction() {
        let err = RuleTable::new([Rule::pattern("broken", "gap-(", 1, display_flex)]).unwrap_err();
        assert!(matches!(err, CssError::InvalidPattern { ref rule, .. } if rule == "broken"));
    }

    #[test]
    fn test_missing_capture_groups_fails_at_construction() {
        let err = RuleTable::new([Rule::pattern("gutter", "gutter-.+", 1, display_flex)])
            .unwrap_err();
        match err {
            CssError::MissingCaptureGroups {
                rule,
                expected,
                found,
            } => {
                assert_eq!(rule, "gutter");
                assert_eq!(expected, 1);
                assert_eq!(found, 0);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_exact_literal_rejected() {
        let err = RuleTable::new([Rule::exact("blank", "", display_flex)]).unwrap_err();
        assert!(matches!(err, CssError::EmptyMatcher { .. }));
    }

    #[test]
    fn test_with_rules_appends() {
        let base = RuleTable::new([Rule::exact("row", "row", display_flex)]).unwrap();
        let extended = base
            .with_rules([Rule::exact("row-dupe", "row", display_flex)])
            .unwrap();
        assert_eq!(base.len(), 1);
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.dispatch("row").unwrap().rule_index, 0);
    }

    #[test]
    fn test_rule_info_listing() {
        let table = RuleTable::new([
            Rule::exact("row", "row", display_flex),
            Rule::pattern("gap", r"gap-(.+)", 1, display_flex),
        ])
        .unwrap();
        let infos: Vec<RuleInfo<'_>> = table.rules().collect();
        assert_eq!(infos[0].name, "row");
        assert!(!infos[0].is_pattern);
        assert!(infos[1].is_pattern);
        assert_eq!(infos[1].matcher, "^(?:gap-(.+))$");
    }

    #[test]
    fn test_rule_table_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleTable>();
    }
}
