//! Layer composition and CSS serialization.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Fragments are grouped by cascade layer and the groups are written in
//! precedence order: reset, base, components, default. Within a group,
//! fragments keep the order they were emitted in.
//!
//! Two switches control the text:
//!
//! - [`LayerMode`]: wrap each group in an `@layer` block (preceded by the
//!   layer order statement), or flatten the groups for targets that do not
//!   support cascade layers
//! - [`OutputStyle`]: readable expanded CSS, or compressed CSS with no
//!   insignificant whitespace

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Fragment, Layer};

/// Whether layer groups are wrapped in `@layer` blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerMode {
    #[default]
    Layered,
    Flattened,
}

/// Whitespace style of the emitted CSS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Expanded,
    /// No insignificant whitespace. The last declaration in a block has no
    /// trailing `;`, which CSS makes optional.
    Compressed,
}

/// Options for [`compose`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposeOptions {
    pub layers: LayerMode,
    pub style: OutputStyle,
}

impl ComposeOptions {
    pub fn new(layers: LayerMode, style: OutputStyle) -> Self {
        Self { layers, style }
    }
}

/// Compose fragments into stylesheet text.
///
/// Fragments without declarations are dropped and empty layers are omitted.
/// With no fragments at all the result is empty.
///
/// ```
/// use cube_css::{ComposeOptions, Declarations, Fragment, Layer, LayerMode, OutputStyle, compose};
///
/// let css = compose(
///     vec![
///         Fragment::new(".gutter-s", Layer::Components, Declarations::new().set("--gutter", "0.5rem")),
///         Fragment::new(":root", Layer::Base, Declarations::new().set("--space-s", "0.5rem")),
///     ],
///     &ComposeOptions::new(LayerMode::Flattened, OutputStyle::Compressed),
/// );
/// assert_eq!(css, ":root{--space-s:0.5rem}.gutter-s{--gutter:0.5rem}");
/// ```
pub fn compose(
    fragments: impl IntoIterator<Item = Fragment>,
    options: &ComposeOptions,
) -> String {
    let mut groups: BTreeMap<Layer, Vec<Fragment>> = BTreeMap::new();
    for fragment in fragments {
        if fragment.declarations.is_empty() {
            continue;
        }
        groups.entry(fragment.layer).or_default().push(fragment);
    }

    if groups.is_empty() {
        return String::new();
    }

    match options.layers {
        LayerMode::Flattened => {
            let rules: Vec<&Fragment> = groups.values().flatten().collect();
            write_rules(&rules, options.style, "")
        }
        LayerMode::Layered => write_layered(&groups, options.style),
    }
}

fn layer_order_statement(style: OutputStyle) -> String {
    let separator = match style {
        OutputStyle::Expanded => ", ",
        OutputStyle::Compressed => ",",
    };
    let names: Vec<&str> = Layer::ALL.iter().map(Layer::name).collect();
    format!("@layer {};", names.join(separator))
}

fn write_layered(groups: &BTreeMap<Layer, Vec<Fragment>>, style: OutputStyle) -> String {
    let mut out = layer_order_statement(style);

    for (layer, fragments) in groups {
        let rules: Vec<&Fragment> = fragments.iter().collect();
        match style {
            OutputStyle::Expanded => {
                out.push_str("\n\n");
                out.push_str(&format!("@layer {} {{\n", layer));
                out.push_str(&write_rules(&rules, style, "  "));
                out.push('}');
            }
            OutputStyle::Compressed => {
                out.push_str(&format!("@layer {}{{", layer));
                out.push_str(&write_rules(&rules, style, ""));
                out.push('}');
            }
        }
    }

    if style == OutputStyle::Expanded {
        out.push('\n');
    }
    out
}

fn write_rules(rules: &[&Fragment], style: OutputStyle, indent: &str) -> String {
    let rendered: Vec<String> = rules
        .iter()
        .map(|fragment| write_rule(fragment, style, indent))
        .collect();
    match style {
        OutputStyle::Expanded => rendered.join("\n"),
        OutputStyle::Compressed => rendered.concat(),
    }
}

fn write_rule(fragment: &Fragment, style: OutputStyle, indent: &str) -> String {
    match style {
        OutputStyle::Expanded => {
            let mut out = format!("{}{} {{\n", indent, fragment.selector);
            for (property, value) in fragment.declarations.iter() {
                out.push_str(&format!("{}  {}: {};\n", indent, property, value));
            }
            out.push_str(indent);
            out.push_str("}\n");
            out
        }
        OutputStyle::Compressed => {
            let body: Vec<String> = fragment
                .declarations
                .iter()
                .map(|(property, value)| format!("{}:{}", property, value))
                .collect();
            format!("{}{{{}}}", fragment.selector, body.join(";"))
        }
    }
}
