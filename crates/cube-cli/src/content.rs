//! Content scanning for class tokens.
//!
//! Copyright (c) 2025 Posit, PBC

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cube_css::extract_tokens;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Content files under `paths` with one of `extensions`, sorted.
///
/// A path may name a single file, which is used regardless of extension.
pub fn content_files(paths: &[PathBuf], extensions: &[String]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        if !path.exists() {
            warn!(path = %path.display(), "content path not found");
            continue;
        }
        files.extend(
            WalkDir::new(path)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .filter(|entry| has_extension(entry.path(), extensions))
                .map(|entry| entry.path().to_path_buf()),
        );
    }
    files.sort();
    files.dedup();
    files
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// Every candidate class token in the given files.
pub fn scan_tokens(files: &[PathBuf]) -> Result<BTreeSet<String>> {
    let mut tokens = BTreeSet::new();
    for file in files {
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read content file {}", file.display()))?;
        tokens.extend(extract_tokens(&text));
    }
    debug!(files = files.len(), tokens = tokens.len(), "scanned content");
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn extensions() -> Vec<String> {
        vec!["html".to_string(), "astro".to_string()]
    }

    #[test]
    fn test_content_files_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("pages/nested")).unwrap();
        fs::write(dir.path().join("pages/index.html"), "").unwrap();
        fs::write(dir.path().join("pages/nested/card.astro"), "").unwrap();
        fs::write(dir.path().join("pages/notes.txt"), "").unwrap();

        let files = content_files(&[dir.path().join("pages")], &extensions());
        assert_eq!(
            files,
            vec![
                dir.path().join("pages/index.html"),
                dir.path().join("pages/nested/card.astro"),
            ]
        );
    }

    #[test]
    fn test_explicit_file_and_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let notes = dir.path().join("notes.txt");
        fs::write(&notes, "").unwrap();

        let files = content_files(&[notes.clone(), dir.path().join("missing")], &extensions());
        assert_eq!(files, vec![notes]);
    }

    #[test]
    fn test_scan_tokens_unions_files() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.html");
        let b = dir.path().join("b.html");
        fs::write(&a, r#"<div class="flow cluster">"#).unwrap();
        fs::write(&b, r#"<div class="cluster gutter-s">"#).unwrap();

        let tokens = scan_tokens(&[a, b]).unwrap();
        assert!(tokens.contains("flow"));
        assert!(tokens.contains("cluster"));
        assert!(tokens.contains("gutter-s"));
    }
}
