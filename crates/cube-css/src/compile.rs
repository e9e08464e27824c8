//! Stylesheet compilation pipeline.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! The compile flow is:
//! 1. Emit token groups as `:root` custom properties (base layer)
//! 2. Emit derived utility classes (components layer)
//! 3. Dispatch every requested class token through the rule table
//! 4. Compose all fragments by layer into stylesheet text
//!
//! Compilation is a pure function of the registry, the rule table, the
//! configuration and the requested tokens. Requested tokens are de-duplicated
//! and their fragments ordered by (rule position, token), so the order in
//! which a build discovers class names never changes the output.
//!
//! # Example
//!
//! ```
//! use cube_css::{StyleCompiler, StyleConfig, ThemeRegistry, TokenGroup};
//!
//! let registry = ThemeRegistry::new()
//!     .with_group("spacing", TokenGroup::new().with("s", "0.5rem").with("m", "1rem"));
//! let config = StyleConfig::default();
//! let rules = config.rule_table().unwrap();
//!
//! let sheet = StyleCompiler::new(&registry, &rules, &config).compile(["flow", "gutter-m", "text-red"]);
//! assert!(sheet.css.contains("--space-m: 1rem;"));
//! assert!(sheet.css.contains(".flow > * + *"));
//! assert_eq!(sheet.matched, 2);
//! assert_eq!(sheet.unmatched, 1);
//! ```

use std::collections::BTreeSet;

use tracing::debug;

use crate::compose::compose;
use crate::config::StyleConfig;
use crate::derived::emit_derived_utilities;
use crate::properties::{emit_custom_properties, root_fragment};
use crate::rules::RuleTable;
use crate::theme::ThemeRegistry;
use crate::types::Fragment;

/// The result of a compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    /// Stylesheet text
    pub css: String,
    /// Distinct requested tokens that produced output
    pub matched: usize,
    /// Distinct requested tokens that produced nothing
    pub unmatched: usize,
}

/// Borrowing compiler over immutable inputs.
///
/// Holds only shared references, so one set of inputs can be compiled from
/// several threads at once.
#[derive(Debug, Clone, Copy)]
pub struct StyleCompiler<'a> {
    registry: &'a ThemeRegistry,
    rules: &'a RuleTable,
    config: &'a StyleConfig,
}

impl<'a> StyleCompiler<'a> {
    pub fn new(registry: &'a ThemeRegistry, rules: &'a RuleTable, config: &'a StyleConfig) -> Self {
        Self {
            registry,
            rules,
            config,
        }
    }

    /// Fragments generated from the theme alone (custom properties and
    /// derived utilities).
    pub fn theme_fragments(&self) -> Vec<Fragment> {
        let properties = emit_custom_properties(
            self.registry,
            &self.config.custom_properties,
            self.config.missing_groups,
        );

        let mut fragments: Vec<Fragment> = root_fragment(properties).into_iter().collect();
        fragments.extend(emit_derived_utilities(
            self.registry,
            &self.config.utilities,
            self.config.missing_groups,
        ));
        fragments
    }

    /// Compile a stylesheet for the requested class tokens.
    pub fn compile<I, S>(&self, tokens: I) -> Stylesheet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: BTreeSet<String> = tokens
            .into_iter()
            .map(|token| token.as_ref().to_string())
            .filter(|token| !token.is_empty())
            .collect();

        let mut dispatched = Vec::new();
        let mut unmatched = 0;
        for token in &requested {
            match self.rules.dispatch(token) {
                Some(dispatch) if !dispatch.fragments.is_empty() => {
                    dispatched.push((dispatch.rule_index, dispatch.fragments))
                }
                _ => {
                    debug!(token = %token, "class token produced no output");
                    unmatched += 1;
                }
            }
        }
        // Tokens are already sorted, so a stable sort by rule keeps token order within a rule
        dispatched.sort_by_key(|(rule_index, _)| *rule_index);

        let matched = dispatched.len();
        let mut fragments = self.theme_fragments();
        fragments.extend(dispatched.into_iter().flat_map(|(_, fragments)| fragments));

        debug!(
            fragments = fragments.len(),
            matched, unmatched, "composing stylesheet"
        );

        Stylesheet {
            css: compose(fragments, &self.config.output),
            matched,
            unmatched,
        }
    }
}

/// Compile a stylesheet in one call.
pub fn compile_stylesheet<I, S>(
    registry: &ThemeRegistry,
    rules: &RuleTable,
    config: &StyleConfig,
    tokens: I,
) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    StyleCompiler::new(registry, rules, config).compile(tokens).css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{ComposeOptions, LayerMode, OutputStyle};
    use crate::properties::PropertyGroup;
    use crate::types::TokenGroup;

    fn registry() -> ThemeRegistry {
        ThemeRegistry::new().with_group(
            "spacing",
            TokenGroup::new()
                .with("s", "0.5rem")
                .with("m", "1rem")
                .with("l", "2rem"),
        )
    }

    fn compressed_config() -> StyleConfig {
        StyleConfig {
            custom_properties: vec![PropertyGroup::new("spacing", "space")],
            utilities: Vec::new(),
            output: ComposeOptions::new(LayerMode::Flattened, OutputStyle::Compressed),
            ..Default::default()
        }
    }

    #[test]
    fn test_token_order_does_not_change_output() {
        let config = compressed_config();
        let rules = config.rule_table().unwrap();
        let registry = registry();
        let compiler = StyleCompiler::new(&registry, &rules, &config);
        let a = compiler.compile(["gutter-m", "flow", "cluster", "flow-space-s"]);
        let b = compiler.compile(["flow-space-s", "cluster", "flow", "gutter-m", "flow"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fragments_ordered_by_rule_then_token() {
        let config = compressed_config();
        let rules = config.rule_table().unwrap();
        let css = compile_stylesheet(
            &registry(),
            &rules,
            &config,
            ["gutter-s", "cluster", "flow", "gutter-l"],
        );
        assert_eq!(
            css,
            ":root{--space-s:0.5rem;--space-m:1rem;--space-l:2rem}\
             .flow > * + *{margin-block-start:var(--flow-space, 1em)}\
             .cluster{display:flex;flex-wrap:wrap;gap:var(--gutter, 1rem);justify-content:var(--cluster-horizontal-alignment, flex-start);align-items:var(--cluster-vertical-alignment, center)}\
             .gutter-l{--gutter:var(--space-l)}\
             .gutter-s{--gutter:var(--space-s)}"
        );
    }

    #[test]
    fn test_unmatched_tokens_counted_not_emitted() {
        let config = compressed_config();
        let rules = config.rule_table().unwrap();
        let sheet = StyleCompiler::new(&registry(), &rules, &config)
            .compile(["text-center", "", "flow", "bg-red"]);
        assert_eq!(sheet.matched, 1);
        assert_eq!(sheet.unmatched, 2);
        assert!(!sheet.css.contains("text-center"));
        assert!(!sheet.css.contains("bg-red"));
    }

    #[test]
    fn test_theme_only() {
        let config = StyleConfig::default();
        let rules = config.rule_table().unwrap();
        let registry = registry();
        let compiler = StyleCompiler::new(&registry, &rules, &config);
        let fragments = compiler.theme_fragments();
        // :root plus three families of three tokens
        assert_eq!(fragments.len(), 10);
        assert_eq!(fragments[0].selector, ":root");
    }

    #[test]
    fn test_empty_inputs_produce_empty_sheet() {
        let config = StyleConfig::default();
        let rules = config.rule_table().unwrap();
        let sheet = StyleCompiler::new(&ThemeRegistry::new(), &rules, &config)
            .compile(Vec::<String>::new());
        assert_eq!(sheet.css, "");
        assert_eq!(sheet.matched, 0);
    }
}
