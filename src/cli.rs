// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "site-auditor",
    version = "0.1.0",
    about = "A CLI tool to audit static HTML sites for technical SEO problems",
    long_about = "site-auditor walks a static site on disk and reports broken links and images, \
                  missing metadata, heading problems and pages nothing links to. \
                  It never touches the network, so it's safe to run in CI before deploying."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Audit every HTML file under a site root
    ///
    /// Example: site-auditor audit ./public --json
    Audit {
        /// Directory containing the built site (index.html lives here)
        root: PathBuf,

        /// Output results in JSON format instead of text sections
        #[arg(long)]
        json: bool,

        /// Log per-document details to stderr
        #[arg(short, long)]
        verbose: bool,
    },
}
