// src/error.rs
// =============================================================================
// Error types for the auditor.
//
// Most problems found during an audit are NOT errors in this sense - they
// are findings (see checker/finding.rs). AuditError is only for things that
// stop the run itself, like a site root that doesn't exist.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Shorthand used across the crate
pub type Result<T> = std::result::Result<T, AuditError>;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Site root is not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
