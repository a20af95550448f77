// src/checker/mod.rs
// =============================================================================
// This module contains all per-page checking logic.
//
// Submodules:
// - html: Extracts links, images, meta tags and headings from a page
// - resolve: Maps an href/src onto the file system and tests existence
// - rules: Runs the SEO rule catalog over one page
// - finding: The Finding / Severity / Category output types
//
// Nothing in here walks directories or prints anything; that is the job of
// the audit module and report.rs.
// =============================================================================

mod finding;
mod html;
mod resolve;
mod rules;

// Re-export public items from submodules
// This lets callers write `checker::evaluate()` instead of
// `checker::rules::evaluate()`
pub use finding::{Category, Finding};
pub use html::extract_facts;
pub use rules::{evaluate, PageContext, PageEvaluation};
