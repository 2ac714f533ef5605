// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Usage:
//   github-tree-reader                      # mode from config, default 'tree'
//   github-tree-reader tree --owner rust-lang --repo log --branch master
//   github-tree-reader readme --output-dir /tmp
//   github-tree-reader all --config ./github-tree-reader.toml
//
// Every option is optional: anything not given here falls back to the
// config file, then to the built-in defaults (see config.rs).
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Mode;

#[derive(Parser, Debug)]
#[command(
    name = "github-tree-reader",
    version,
    about = "List every file and directory of a GitHub branch, or download its README",
    long_about = "github-tree-reader resolves a branch to its commit tree through the GitHub REST API \
                  and prints every directory and file (with sizes). The 'readme' command instead lists \
                  the repository root and saves the README as github-api-downloaded-<name>."
)]
pub struct Cli {
    // None means "use the mode from the config file"
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a TOML config file (default: github-tree-reader.toml, searched upwards)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Repository owner (user or organization)
    #[arg(long, global = true)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// Branch to read
    #[arg(long, global = true)]
    pub branch: Option<String>,

    /// Base URL of the REST API (e.g. a GitHub Enterprise /api/v3 URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Directory the README copy is written to
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the tree listing as JSON instead of text lines
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Print every directory and file in the branch, with file sizes
    Tree,

    /// List the repository root and download the README
    Readme,

    /// Do both
    All,
}

impl Commands {
    pub fn mode(self) -> Mode {
        match self {
            Commands::Tree => Mode::Tree,
            Commands::Readme => Mode::Readme,
            Commands::All => Mode::All,
        }
    }
}
