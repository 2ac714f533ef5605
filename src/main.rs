// src/main.rs
// =============================================================================
// Entry point of the github-tree-reader CLI.
//
// What happens here:
// 1. Set up logging (to stderr, so stdout only carries the report)
// 2. Parse command-line arguments and merge them with the config file
// 3. Run the requested flow:
//      tree   - branch -> tree URL -> recursive file/directory listing
//      readme - root directory listing -> README download
//      all    - both, side by side
// 4. Exit 0 on success, 1 if anything failed
// =============================================================================

mod cli;
mod config;
mod error;
mod github;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::Cli;
use config::{Config, Mode};
use github::{ReadmeReport, TreeEntry};

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG overrides the default; RUST_LOG=github_tree_reader=debug echoes
// every raw API response
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("github_tree_reader=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli)?;

    tracing::info!(repo = %config.repo, mode = ?config.mode, "starting");

    let fetcher = github::HttpFetcher::new(config.timeout, &config.user_agent)
        .context("failed to build HTTP client")?;

    match config.mode {
        Mode::Tree => {
            let entries = list_tree(&fetcher, &config).await?;
            print_tree(&entries, config.json)?;
        }
        Mode::Readme => {
            let report = fetch_readme(&fetcher, &config).await?;
            print_readme(&report);
        }
        Mode::All => {
            // The two flows don't depend on each other, so run them together
            let (entries, report) = futures::try_join!(
                list_tree(&fetcher, &config),
                fetch_readme(&fetcher, &config),
            )?;
            print_tree(&entries, config.json)?;
            println!();
            print_readme(&report);
        }
    }

    Ok(())
}

async fn list_tree(fetcher: &github::HttpFetcher, config: &Config) -> Result<Vec<TreeEntry>> {
    github::walk_branch(fetcher, &config.api_base, &config.repo)
        .await
        .with_context(|| format!("failed to list the file tree of {}", config.repo))
}

async fn fetch_readme(fetcher: &github::HttpFetcher, config: &Config) -> Result<ReadmeReport> {
    github::download_readme(fetcher, &config.api_base, &config.repo, &config.output_dir)
        .await
        .with_context(|| format!("failed to download the README of {}", config.repo))
}

// Prints the tree either as report lines or as JSON
fn print_tree(entries: &[TreeEntry], json: bool) -> Result<()> {
    // Logged for both output formats
    let (directories, files) = github::count_kinds(entries);
    tracing::info!(directories, files, "tree listing complete");

    if json {
        println!("{}", serde_json::to_string_pretty(entries)?);
        return Ok(());
    }

    println!("Directory & files list :");
    for entry in entries {
        println!("{}", entry);
    }
    Ok(())
}

fn print_readme(report: &ReadmeReport) {
    for entry in &report.entries {
        println!(
            "File Name = {} | Download URL = {}",
            entry.name,
            entry.download_url.as_deref().unwrap_or("null")
        );
    }

    match &report.download {
        Some(download) => {
            println!(
                "\nfileContent = <FILE CONTENT START>\n{}\n<FILE CONTENT END>\n",
                String::from_utf8_lossy(&download.body)
            );
            println!("Saved {} to {}", download.entry.name, download.path.display());
        }
        None => println!("\nNo README found, nothing downloaded"),
    }
}
