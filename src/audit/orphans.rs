// src/audit/orphans.rs
// =============================================================================
// Orphan page detection.
//
// A page is reachable if at least one audited page links to it, or if it is
// one of the fixed entry points (index.html and 404.html at the site root).
// This is a plain set union, not a crawl from the home page: order of
// insertion does not matter, so per-page results can be merged in any order.
// =============================================================================

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Pages that are always reachable, relative to the site root
pub const ENTRY_POINTS: [&str; 2] = ["index.html", "404.html"];

/// Every absolute path some page links to, plus the entry points
#[derive(Debug, Clone)]
pub struct ReachabilitySet {
    reachable: HashSet<PathBuf>,
}

impl ReachabilitySet {
    /// Starts with just the entry points of `root`
    pub fn new(root: &Path) -> Self {
        let reachable = ENTRY_POINTS.iter().map(|entry| root.join(entry)).collect();
        ReachabilitySet { reachable }
    }

    /// Adds existing link targets found on one page
    pub fn extend<I>(&mut self, targets: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.reachable.extend(targets);
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.reachable.contains(path)
    }

    // Returns the documents nobody links to, keeping the input order
    pub fn orphans<'a>(&self, documents: &'a [PathBuf]) -> Vec<&'a Path> {
        documents
            .iter()
            .map(PathBuf::as_path)
            .filter(|doc| !self.contains(doc))
            .collect()
    }
}
