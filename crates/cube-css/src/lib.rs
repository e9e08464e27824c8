//! Utility-class CSS generation for CUBE-style design systems.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! This crate provides:
//! - Theme registry of design-token groups
//! - Custom property emission (`:root` variables per token group)
//! - Derived utility classes generated from token groups
//! - A rule dispatcher mapping class tokens to declaration blocks, with a
//!   built-in library of layout primitives
//! - Layer composition into stylesheet text, layered or flattened
//! - The compile pipeline tying these together, and class-token extraction
//!   from content files

mod compile;
mod compose;
mod config;
mod derived;
mod error;
mod extract;
mod primitives;
mod properties;
mod rules;
mod selector;
mod theme;
mod types;

pub use compile::{StyleCompiler, Stylesheet, compile_stylesheet};
pub use compose::{ComposeOptions, LayerMode, OutputStyle, compose};
pub use config::{MissingGroupPolicy, RuleSpec, StyleConfig};
pub use derived::{UtilityFamily, emit_derived_utilities};
pub use error::CssError;
pub use extract::extract_tokens;
pub use primitives::{BUILT_IN_RULES, default_rule_table, default_rules, variable_family};
pub use properties::{PropertyGroup, ROOT_SELECTOR, emit_custom_properties, root_fragment};
pub use rules::{
    Dispatch, HandlerFn, Matcher, Rule, RuleBlock, RuleContext, RuleInfo, RuleMatch, RuleOutput,
    RuleTable, SelectorTransform,
};
pub use selector::{class_selector, escape_identifier};
pub use theme::{ThemeRegistry, groups};
pub use types::{Declarations, Fragment, Layer, TokenGroup, TokenValue};
