// src/audit/mod.rs
// =============================================================================
// This module drives a full audit of one site.
//
// How it works:
// 1. Canonicalize the site root and find every HTML document under it
// 2. For each document (in parallel with rayon):
//    read it, extract facts, run the rule catalog
// 3. Merge the per-document results in traversal order
// 4. Union every existing link target into the reachability set and
//    report the documents nothing links to
//
// Each document is evaluated on its own and returns an immutable result,
// so there is no shared mutable state between rayon workers.
// =============================================================================

mod orphans;
mod walk;

pub use orphans::ReachabilitySet;
pub use walk::find_documents;

use crate::checker::{self, Category, Finding, PageContext, PageEvaluation};
use crate::error::{AuditError, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Short per-document summary, included in JSON output
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub path: String,
    pub links: usize,
    /// Links without a title attribute
    pub untitled_links: usize,
    pub images: usize,
    pub headings: usize,
    /// href of <link rel="canonical">, if the page declares one
    pub canonical: Option<String>,
    pub responsive: bool,
}

/// Everything one run produces
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub root: PathBuf,
    /// Every markup file found, readable or not
    pub documents_scanned: usize,
    pub documents: Vec<DocumentSummary>,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub orphans: Vec<String>,
}

impl AuditReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

// What one document contributes to the report
struct DocumentResult {
    summary: Option<DocumentSummary>,
    evaluation: PageEvaluation,
}

// Audits every HTML document under `root`
//
// Returns: Err only when the run itself can't start (root missing);
// problems inside documents always become findings instead
pub fn audit_site(root: &Path) -> Result<AuditReport> {
    if !root.is_dir() {
        return Err(AuditError::RootNotDirectory(root.to_path_buf()));
    }
    let root = fs::canonicalize(root)?;

    let documents = find_documents(&root);
    info!("Found {} document(s) under {}", documents.len(), root.display());

    // par_iter + collect keeps the input order, so the report is the
    // same as a sequential run would produce
    let results: Vec<DocumentResult> = documents
        .par_iter()
        .map(|path| audit_document(path, &root))
        .collect();

    let mut reachable = ReachabilitySet::new(&root);
    let mut summaries = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for result in results {
        summaries.extend(result.summary);
        reachable.extend(result.evaluation.linked_targets);
        let (errs, warns): (Vec<Finding>, Vec<Finding>) =
            result.evaluation.findings.into_iter().partition(Finding::is_error);
        errors.extend(errs);
        warnings.extend(warns);
    }

    let orphans: Vec<String> = reachable
        .orphans(&documents)
        .into_iter()
        .map(|doc| relative_path(doc, &root))
        .collect();

    info!(
        "Audit finished: {} error(s), {} warning(s), {} orphan page(s)",
        errors.len(),
        warnings.len(),
        orphans.len()
    );

    Ok(AuditReport {
        root,
        documents_scanned: documents.len(),
        documents: summaries,
        errors,
        warnings,
        orphans,
    })
}

// Reads, extracts and evaluates a single document
fn audit_document(path: &Path, root: &Path) -> DocumentResult {
    let rel_path = relative_path(path, root);

    let content = match read_markup(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Could not read {}: {}", rel_path, e);
            return DocumentResult {
                summary: None,
                evaluation: PageEvaluation {
                    findings: vec![Finding::new(
                        Category::UnreadableDocument,
                        &rel_path,
                        Some(e.to_string()),
                    )],
                    linked_targets: Vec::new(),
                },
            };
        }
    };

    let facts = checker::extract_facts(&content);
    let canonical = facts.canonical().and_then(|tag| tag.href.clone());
    debug!(
        "{}: {} link(s) ({} untitled), {} image(s), {} heading(s), canonical {:?}",
        rel_path,
        facts.links.len(),
        facts.untitled_links(),
        facts.images.len(),
        facts.headings.len(),
        canonical
    );

    let page = PageContext {
        path,
        rel_path: &rel_path,
        root,
    };
    let evaluation = checker::evaluate(&facts, page);

    DocumentResult {
        summary: Some(DocumentSummary {
            path: rel_path.clone(),
            links: facts.links.len(),
            untitled_links: facts.untitled_links(),
            images: facts.images.len(),
            headings: facts.headings.len(),
            canonical,
            responsive: facts.has_responsive_classes,
        }),
        evaluation,
    }
}

// Reads the file as UTF-8 text; invalid UTF-8 is an io::Error of kind InvalidData
fn read_markup(path: &Path) -> std::io::Result<String> {
    let bytes = fs::read(path)?;
    String::from_utf8(bytes)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

// Root-relative path with '/' separators on every platform
fn relative_path(path: &Path, root: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
