// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing) on stderr
// 3. Run the audit and print the report
// 4. Exit with proper code (0 = clean, 1 = critical errors found, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod audit;    // src/audit/ - walks the site, merges results, finds orphans
mod checker;  // src/checker/ - per-page extraction, resolution and rules
mod cli;      // src/cli.rs - command-line parsing
mod error;    // src/error.rs - AuditError
mod report;   // src/report.rs - text and JSON output

use clap::Parser; // Parser trait enables the parse() method
use cli::{Cli, Commands};

use anyhow::Result;
use std::path::Path;
use tracing::Level;

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = no critical errors (warnings and orphans don't fail the run)
//   Ok(1) = at least one critical error
//   Err = the audit couldn't run at all
fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit { root, json, verbose } => {
            init_logging(verbose);
            handle_audit(&root, json)
        }
    }
}

// Logs go to stderr so --json output on stdout stays machine-readable
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_audit(root: &Path, json: bool) -> Result<i32> {
    let report = audit::audit_site(root)?;

    report::print_report(&report, json)?;

    if report.has_errors() {
        Ok(1)
    } else {
        Ok(0)
    }
}
