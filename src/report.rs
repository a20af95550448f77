// src/report.rs
// =============================================================================
// Prints an AuditReport, either as plain text sections or as JSON.
//
// Text layout:
//   --- 24-Point Technical SEO & Site Health Audit ---
//
//   [Critical Errors]
//   [Broken Link] In index.html: nope.html not found
//
//   [Warnings]
//   ...
//
//   [Orphan Pages]
//   old/landing.html
//
// An empty section prints an explicit "None" line instead of nothing.
// =============================================================================

use crate::audit::AuditReport;
use crate::error::Result;
use std::fmt::Write;

const HEADER: &str = "--- 24-Point Technical SEO & Site Health Audit ---";

// Prints the report either as JSON or as human-readable sections
pub fn print_report(report: &AuditReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print!("{}", render_text(report));
    }
    Ok(())
}

// Builds the text report as one String so it can be tested
pub fn render_text(report: &AuditReport) -> String {
    let mut out = String::new();
    // Writing into a String can't fail
    let _ = writeln!(out, "{}\n", HEADER);

    section(&mut out, "Critical Errors", "None (Good Job!)", &report.errors);
    section(&mut out, "Warnings", "None", &report.warnings);
    section(&mut out, "Orphan Pages", "None", &report.orphans);

    out
}

fn section<T: std::fmt::Display>(out: &mut String, title: &str, empty: &str, lines: &[T]) {
    let _ = writeln!(out, "\n[{}]", title);
    if lines.is_empty() {
        let _ = writeln!(out, "{}", empty);
    }
    for line in lines {
        let _ = writeln!(out, "{}", line);
    }
}
