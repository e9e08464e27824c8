//! Built-in layout primitives and spacing families.
//!
//! Copyright (c) 2025 Posit, PBC
//!
//! Each primitive is configured through custom properties with fallbacks, so
//! one class covers every variant and a page tunes it by setting variables:
//!
//! ```html
//! <ul class="cluster" style="--gutter: var(--space-s)">…</ul>
//! ```
//!
//! Layout primitives that need child rules return several blocks; the spacing
//! families are pattern rules that point a primitive's variable at a spacing
//! token (`flow-space-m` sets `--flow-space: var(--space-m)`).

use crate::error::CssError;
use crate::rules::{
    Rule, RuleBlock, RuleContext, RuleMatch, RuleOutput, RuleTable, SelectorTransform,
};
use crate::types::Declarations;

/// Spacing-token suffix accepted by the pattern families.
const SUFFIX_PATTERN: &str = "[A-Za-z0-9_-]+";

/// Names of the built-in rules, in dispatch order.
pub const BUILT_IN_RULES: &[&str] = &[
    "flow",
    "cluster",
    "wrapper",
    "region",
    "visually-hidden",
    "switcher",
    "sidebar",
    "repel",
    "grid",
    "flow-space",
    "region-space",
    "gutter",
];

/// The built-in rules, in dispatch order.
pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::exact("flow", "flow", flow),
        Rule::exact("cluster", "cluster", cluster),
        Rule::exact("wrapper", "wrapper", wrapper),
        Rule::exact("region", "region", region),
        Rule::exact("visually-hidden", "visually-hidden", visually_hidden),
        Rule::exact("switcher", "switcher", switcher),
        Rule::exact("sidebar", "sidebar", sidebar),
        Rule::exact("repel", "repel", repel),
        Rule::exact("grid", "grid", grid),
        variable_family("flow-space", "flow-space", "--flow-space", "space"),
        variable_family("region-space", "region-space", "--region-space", "space"),
        variable_family("gutter", "gutter", "--gutter", "space"),
    ]
}

/// A validated table holding only the built-in rules.
pub fn default_rule_table() -> Result<RuleTable, CssError> {
    RuleTable::new(default_rules())
}

/// A pattern family `<class_prefix>-<suffix>` that assigns
/// `var(--<var_prefix>-<suffix>)` to `property`.
///
/// The suffix is limited to identifier characters, so a token such as
/// `gutter-m)` does not match and stays inert.
///
/// ```
/// use cube_css::{RuleTable, variable_family};
///
/// let table = RuleTable::new([variable_family("measure", "measure", "--measure", "size")]).unwrap();
/// let dispatch = table.dispatch("measure-long").unwrap();
/// assert_eq!(
///     dispatch.fragments[0].declarations.get("--measure"),
///     Some("var(--size-long)")
/// );
/// ```
pub fn variable_family(
    name: &str,
    class_prefix: &str,
    property: &str,
    var_prefix: &str,
) -> Rule {
    let property = property.to_string();
    let var_prefix = var_prefix.to_string();
    Rule::pattern(
        name,
        format!("{}-({})", regex::escape(class_prefix), SUFFIX_PATTERN),
        1,
        move |rule_match, _| {
            let suffix = rule_match.get(1).unwrap_or_default();
            Declarations::new()
                .set(property.as_str(), format!("var(--{}-{})", var_prefix, suffix))
                .into()
        },
    )
}

fn child(ctx: &RuleContext<'_>, combinator: &'static str) -> SelectorTransform {
    ctx.transform(move |base| format!("{} {}", base, combinator))
}

fn flow(_: &RuleMatch<'_>, ctx: &RuleContext<'_>) -> RuleOutput {
    vec![RuleBlock::derived(
        child(ctx, "> * + *"),
        Declarations::new().set("margin-block-start", "var(--flow-space, 1em)"),
    )]
    .into()
}

fn cluster(_: &RuleMatch<'_>, _: &RuleContext<'_>) -> RuleOutput {
    Declarations::new()
        .set("display", "flex")
        .set("flex-wrap", "wrap")
        .set("gap", "var(--gutter, 1rem)")
        .set(
            "justify-content",
            "var(--cluster-horizontal-alignment, flex-start)",
        )
        .set("align-items", "var(--cluster-vertical-alignment, center)")
        .into()
}

fn wrapper(_: &RuleMatch<'_>, _: &RuleContext<'_>) -> RuleOutput {
    Declarations::new()
        .set("margin-inline", "auto")
        .set(
            "max-width",
            "clamp(16rem, var(--wrapper-max-width, 100vw), 80rem)",
        )
        .set("padding-left", "var(--gutter)")
        .set("padding-right", "var(--gutter)")
        .set("position", "relative")
        .into()
}

fn region(_: &RuleMatch<'_>, _: &RuleContext<'_>) -> RuleOutput {
    Declarations::new()
        .set("padding-block", "var(--region-space, var(--space-xl-2xl))")
        .into()
}

fn visually_hidden(_: &RuleMatch<'_>, _: &RuleContext<'_>) -> RuleOutput {
    Declarations::new()
        .set("border", "0")
        .set("clip", "rect(0 0 0 0)")
        .set("height", "0")
        .set("margin", "0")
        .set("overflow", "hidden")
        .set("padding", "0")
        .set("position", "absolute")
        .set("width", "1px")
        .set("white-space", "nowrap")
        .into()
}

fn switcher(_: &RuleMatch<'_>, ctx: &RuleContext<'_>) -> RuleOutput {
    vec![
        RuleBlock::base(
            Declarations::new()
                .set("display", "flex")
                .set("flex-wrap", "wrap")
                .set("gap", "var(--gutter, 1rem)")
                .set(
                    "align-items",
                    "var(--switcher-vertical-alignment, flex-start)",
                ),
        ),
        RuleBlock::derived(
            child(ctx, "> *"),
            Declarations::new().set("flex-grow", "1").set(
                "flex-basis",
                "calc((var(--switcher-target-container-width, 40rem) - 100%) * 999)",
            ),
        ),
        RuleBlock::derived(
            child(ctx, "> :nth-child(n+3)"),
            Declarations::new().set("flex-basis", "100%"),
        ),
    ]
    .into()
}

fn sidebar(_: &RuleMatch<'_>, ctx: &RuleContext<'_>) -> RuleOutput {
    vec![
        RuleBlock::base(
            Declarations::new()
                .set("display", "flex")
                .set("flex-wrap", "wrap")
                .set("gap", "var(--gutter, 1rem)"),
        ),
        RuleBlock::derived(
            child(ctx, "> :first-child"),
            Declarations::new()
                .set("flex-basis", "var(--sidebar-target-width, 20rem)")
                .set("flex-grow", "1"),
        ),
        RuleBlock::derived(
            child(ctx, "> :last-child"),
            Declarations::new()
                .set("flex-basis", "0")
                .set("flex-grow", "999")
                .set("min-width", "var(--sidebar-content-min-width, 50%)"),
        ),
    ]
    .into()
}

fn repel(_: &RuleMatch<'_>, ctx: &RuleContext<'_>) -> RuleOutput {
    vec![
        RuleBlock::base(
            Declarations::new()
                .set("display", "flex")
                .set("flex-wrap", "wrap")
                .set("justify-content", "space-between")
                .set("align-items", "var(--repel-vertical-alignment, center)")
                .set("gap", "var(--gutter, 1rem)"),
        ),
        RuleBlock::derived(
            ctx.transform(|base| format!("{}[data-nowrap]", base)),
            Declarations::new().set("flex-wrap", "nowrap"),
        ),
    ]
    .into()
}

fn grid(_: &RuleMatch<'_>, ctx: &RuleContext<'_>) -> RuleOutput {
    // Layout variants only reassign the variables the base rule reads
    vec![
        RuleBlock::base(
            Declarations::new()
                .set("display", "grid")
                .set(
                    "grid-template-columns",
                    "repeat(var(--grid-placement, auto-fill), minmax(var(--grid-min-item-size, 16rem), 1fr))",
                )
                .set("gap", "var(--gutter, var(--space-s-l))"),
        ),
        RuleBlock::derived(
            ctx.transform(|base| format!("{}[data-layout=\"50-50\"]", base)),
            Declarations::new()
                .set("--grid-placement", "auto-fit")
                .set("--grid-min-item-size", "clamp(16rem, 50vw, 33rem)"),
        ),
        RuleBlock::derived(
            ctx.transform(|base| format!("{}[data-layout=\"thirds\"]", base)),
            Declarations::new()
                .set("--grid-placement", "auto-fit")
                .set("--grid-min-item-size", "clamp(16rem, 33%, 20rem)"),
        ),
    ]
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::is_identifier_fragment;
    use crate::types::{Fragment, Layer};

    fn dispatch(token: &str) -> Vec<Fragment> {
        default_rule_table()
            .unwrap()
            .dispatch(token)
            .map(|d| d.fragments)
            .unwrap_or_default()
    }

    #[test]
    fn test_built_in_names_match_table() {
        let table = default_rule_table().unwrap();
        let names: Vec<&str> = table.rules().map(|info| info.name).collect();
        assert_eq!(names, BUILT_IN_RULES);
    }

    #[test]
    fn test_flow_targets_adjacent_children() {
        let fragments = dispatch("flow");
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].selector, ".flow > * + *");
        assert_eq!(
            fragments[0].declarations.get("margin-block-start"),
            Some("var(--flow-space, 1em)")
        );
    }

    #[test]
    fn test_cluster() {
        let fragments = dispatch("cluster");
        assert_eq!(fragments.len(), 1);
        let decls = &fragments[0].declarations;
        assert_eq!(decls.get("display"), Some("flex"));
        assert_eq!(decls.get("flex-wrap"), Some("wrap"));
        assert_eq!(decls.get("gap"), Some("var(--gutter, 1rem)"));
    }

    #[test]
    fn test_wrapper() {
        let decls = &dispatch("wrapper")[0].declarations;
        assert_eq!(
            decls.get("max-width"),
            Some("clamp(16rem, var(--wrapper-max-width, 100vw), 80rem)")
        );
        assert_eq!(decls.get("padding-left"), decls.get("padding-right"));
        assert_eq!(decls.get("margin-inline"), Some("auto"));
    }

    #[test]
    fn test_region_falls_back_to_spacing_token() {
        let decls = &dispatch("region")[0].declarations;
        assert_eq!(
            decls.get("padding-block"),
            Some("var(--region-space, var(--space-xl-2xl))")
        );
    }

    #[test]
    fn test_visually_hidden() {
        let decls = &dispatch("visually-hidden")[0].declarations;
        assert_eq!(decls.len(), 9);
        assert_eq!(decls.get("position"), Some("absolute"));
        assert_eq!(decls.get("width"), Some("1px"));
        assert_eq!(decls.get("white-space"), Some("nowrap"));
        assert_eq!(decls.get("clip"), Some("rect(0 0 0 0)"));
    }

    #[test]
    fn test_switcher_three_fragments() {
        let fragments = dispatch("switcher");
        let selectors: Vec<&str> = fragments.iter().map(|f| f.selector.as_str()).collect();
        assert_eq!(
            selectors,
            vec![".switcher", ".switcher > *", ".switcher > :nth-child(n+3)"]
        );
        assert_eq!(fragments[0].declarations.get("flex-wrap"), Some("wrap"));
        assert_eq!(fragments[1].declarations.get("flex-grow"), Some("1"));
        assert!(
            fragments[1]
                .declarations
                .get("flex-basis")
                .unwrap()
                .ends_with("* 999)")
        );
        assert_eq!(fragments[2].declarations.get("flex-basis"), Some("100%"));
    }

    #[test]
    fn test_sidebar() {
        let fragments = dispatch("sidebar");
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[1].selector, ".sidebar > :first-child");
        assert_eq!(fragments[2].selector, ".sidebar > :last-child");
        assert_eq!(fragments[2].declarations.get("flex-grow"), Some("999"));
        assert!(fragments[2].declarations.get("min-width").is_some());
    }

    #[test]
    fn test_repel_nowrap_variant() {
        let fragments = dispatch("repel");
        assert_eq!(fragments.len(), 2);
        assert_eq!(
            fragments[0].declarations.get("justify-content"),
            Some("space-between")
        );
        assert_eq!(fragments[1].selector, ".repel[data-nowrap]");
        assert_eq!(fragments[1].declarations.get("flex-wrap"), Some("nowrap"));
    }

    #[test]
    fn test_grid_variants_reassign_variables() {
        let fragments = dispatch("grid");
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[1].selector, ".grid[data-layout=\"50-50\"]");
        assert_eq!(fragments[2].selector, ".grid[data-layout=\"thirds\"]");
        for variant in &fragments[1..] {
            let names: Vec<&str> = variant.declarations.iter().map(|(p, _)| p).collect();
            assert_eq!(names, vec!["--grid-placement", "--grid-min-item-size"]);
        }
    }

    #[test]
    fn test_spacing_families() {
        for (token, property, value) in [
            ("flow-space-m", "--flow-space", "var(--space-m)"),
            ("region-space-xl-2xl", "--region-space", "var(--space-xl-2xl)"),
            ("gutter-2xs", "--gutter", "var(--space-2xs)"),
        ] {
            let fragments = dispatch(token);
            assert_eq!(fragments.len(), 1, "{token}");
            assert_eq!(fragments[0].selector, format!(".{}", token));
            assert_eq!(fragments[0].declarations.get(property), Some(value));
            assert_eq!(fragments[0].layer, Layer::Components);
        }
    }

    #[test]
    fn test_family_requires_suffix() {
        assert!(dispatch("flow-space").is_empty());
        assert!(dispatch("flow-space-").is_empty());
    }

    #[test]
    fn test_family_rejects_non_identifier_suffix() {
        let table = default_rule_table().unwrap();
        for token in [
            "gutter-m)",
            "flow-space-(x)",
            "gutter-1/2",
            "region-space-[l]",
            "gutter-50%",
            "gutter-#a",
            "gutter-m);}body{display:none",
        ] {
            assert!(table.dispatch(token).is_none(), "{token}");
        }
        assert!(is_identifier_fragment("xl-2xl"));
    }

    #[test]
    fn test_every_primitive_targets_components() {
        for name in &BUILT_IN_RULES[..9] {
            assert!(dispatch(name).iter().all(|f| f.layer == Layer::Components));
        }
    }
}
