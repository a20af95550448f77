// src/audit/walk.rs
// =============================================================================
// Finds every HTML document under the site root.
//
// We use the `walkdir` crate which recursively walks a directory tree.
// Entries are sorted by file name so two runs over the same tree always
// visit documents in the same order.
// =============================================================================

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// File extensions treated as markup documents
const MARKUP_EXTENSIONS: &[&str] = &["html", "htm"];

// Collects all markup documents under `root`, in stable traversal order
pub fn find_documents(root: &Path) -> Vec<PathBuf> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && is_markup(entry.path()) {
            documents.push(entry.into_path());
        }
    }

    documents
}

fn is_markup(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| MARKUP_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_finds_nested_markup_in_stable_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("blog/2024")).unwrap();
        fs::write(root.join("index.html"), "").unwrap();
        fs::write(root.join("about.HTM"), "").unwrap();
        fs::write(root.join("style.css"), "").unwrap();
        fs::write(root.join("blog/2024/post.html"), "").unwrap();

        let docs = find_documents(root);
        assert_eq!(
            docs,
            vec![
                root.join("about.HTM"),
                root.join("blog/2024/post.html"),
                root.join("index.html"),
            ]
        );
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        assert!(find_documents(Path::new("/nonexistent/site/root")).is_empty());
    }
}
