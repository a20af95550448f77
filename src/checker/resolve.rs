// src/checker/resolve.rs
// =============================================================================
// This module turns an href/src string into something we can check on disk.
//
// How a reference is classified:
// - "http..."   -> External (trusted, never fetched)
// - "#..."      -> Anchor   (same-page jump, trusted)
// - "mailto:..." -> Mailto  (trusted)
// - "/a/b.html" -> Local, joined onto the site root
// - "b.html"    -> Local, joined onto the referencing page's directory
//
// For Local references we strip the #fragment, normalize "." and ".."
// and test whether the target exists. The same resolved value feeds both
// the broken-link check and the orphan-page check, so they can't disagree.
// =============================================================================

use std::path::{Component, Path, PathBuf};

/// What kind of reference we are looking at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedReference {
    External,
    Anchor,
    Mailto,
    Local {
        /// Normalized absolute target, fragment stripped
        target: PathBuf,
        /// The path that actually exists on disk (target itself or its
        /// %20-decoded variant), None if neither exists
        found: Option<PathBuf>,
    },
}

impl ResolvedReference {
    /// True for local references whose target is missing
    pub fn is_broken(&self) -> bool {
        matches!(self, ResolvedReference::Local { found: None, .. })
    }

    /// The existing file this reference points at, if it is local
    pub fn existing_target(&self) -> Option<&Path> {
        match self {
            ResolvedReference::Local { found, .. } => found.as_deref(),
            _ => None,
        }
    }
}

// Resolves a raw reference found in `document` against the site `root`
//
// Parameters:
//   reference: the href or src value exactly as written
//   document: absolute path of the page containing the reference
//   root: absolute path of the site root
//
// Callers are expected to handle empty references themselves; an empty
// string resolves to the page's own directory, which is rarely useful.
pub fn resolve_reference(reference: &str, document: &Path, root: &Path) -> ResolvedReference {
    if reference.starts_with("http") {
        return ResolvedReference::External;
    }
    if reference.starts_with('#') {
        return ResolvedReference::Anchor;
    }
    if reference.starts_with("mailto:") {
        return ResolvedReference::Mailto;
    }

    let joined = match reference.strip_prefix('/') {
        Some(from_root) => root.join(from_root.trim_start_matches('/')),
        None => document.parent().unwrap_or(root).join(reference),
    };

    let target = normalize(&strip_fragment(&joined));
    let found = find_existing(&target);

    ResolvedReference::Local { target, found }
}

// Drops everything from the first '#' onwards
fn strip_fragment(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match raw.split_once('#') {
        Some((before, _)) => PathBuf::from(before),
        None => path.to_path_buf(),
    }
}

// Lexical normalization, like a browser would do with "../" in a URL.
// Does not touch the file system and does not follow symlinks.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // Can't climb above the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

// Looks for the literal target first, then the "%20" -> " " variant
fn find_existing(target: &Path) -> Option<PathBuf> {
    if exists(target) {
        return Some(target.to_path_buf());
    }

    let raw = target.to_string_lossy();
    if raw.contains("%20") {
        let decoded = PathBuf::from(raw.replace("%20", " "));
        if exists(&decoded) {
            return Some(decoded);
        }
    }

    None
}

// Permission errors and races count as "not there"
fn exists(path: &Path) -> bool {
    path.try_exists().unwrap_or(false)
}
