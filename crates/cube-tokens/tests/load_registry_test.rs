//! Integration tests for loading a token directory into a theme registry.

use std::fs;
use std::path::Path;

use cube_css::{StyleCompiler, StyleConfig, TokenValue};
use cube_tokens::{GroupSource, TokenError, TokenSources, load_registry};

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn token_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "viewports.json", r#"{ "min": 320, "max": 1350 }"#);
    write(
        dir.path(),
        "colors.json",
        r##"{
            "title": "Colors",
            "items": [
                { "name": "Dark", "value": "#1b1b1b" },
                { "name": "Light Shade", "value": "#f3f3f3" }
            ]
        }"##,
    );
    write(
        dir.path(),
        "spacing.json",
        r#"{
            "items": [
                { "name": "3XS", "min": 4, "max": 4 },
                { "name": "S", "min": 16, "max": 18 }
            ]
        }"#,
    );
    dir
}

fn sources(dir: &Path) -> TokenSources {
    TokenSources {
        dir: dir.to_path_buf(),
        viewports: Some("viewports.json".into()),
        groups: vec![
            GroupSource::new("colors", "colors.json"),
            GroupSource::new("fontFamily", "fonts.json"),
            GroupSource::new("spacing", "spacing.json").fluid(),
        ],
    }
}

#[test]
fn loads_present_groups_and_skips_missing_files() {
    let dir = token_dir();
    let registry = load_registry(&sources(dir.path())).unwrap();

    let names: Vec<&str> = registry.group_names().collect();
    assert_eq!(names, vec!["colors", "spacing"]);

    let colors = registry.lookup("colors").unwrap();
    assert_eq!(
        colors.get("light-shade"),
        Some(&TokenValue::Scalar("#f3f3f3".to_string()))
    );

    let spacing = registry.lookup("spacing").unwrap();
    assert_eq!(spacing.get("3xs").unwrap().to_css(), "0.25rem");
    assert!(spacing.get("s").unwrap().to_css().starts_with("clamp(1rem, "));
}

#[test]
fn loaded_registry_feeds_the_compiler() {
    let dir = token_dir();
    let registry = load_registry(&sources(dir.path())).unwrap();
    let config = StyleConfig::default();
    let rules = config.rule_table().unwrap();

    let sheet = StyleCompiler::new(&registry, &rules, &config).compile(["gutter-3xs"]);
    assert!(sheet.css.contains("--color-dark: #1b1b1b;"));
    assert!(sheet.css.contains("--space-3xs: 0.25rem;"));
    assert!(sheet.css.contains("--gutter: var(--space-3xs);"));
    assert!(!sheet.css.contains("--font-"));
}

#[test]
fn malformed_file_is_an_error() {
    let dir = token_dir();
    write(dir.path(), "colors.json", "{ \"items\": [ { \"value\": 1 } ] }");
    let err = load_registry(&sources(dir.path())).unwrap_err();
    assert!(matches!(err, TokenError::Json { .. }));
}

#[test]
fn fluid_group_without_bounds_is_an_error() {
    let dir = token_dir();
    write(
        dir.path(),
        "spacing.json",
        r#"{ "items": [ { "name": "S", "value": "1rem" } ] }"#,
    );
    let err = load_registry(&sources(dir.path())).unwrap_err();
    assert!(matches!(err, TokenError::MissingBounds { .. }));
}

#[test]
fn invalid_viewports_are_rejected() {
    let dir = token_dir();
    write(dir.path(), "viewports.json", r#"{ "min": 1350, "max": 320 }"#);
    let err = load_registry(&sources(dir.path())).unwrap_err();
    assert!(matches!(err, TokenError::InvalidViewports { .. }));
}
