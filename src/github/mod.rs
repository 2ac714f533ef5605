// src/github/mod.rs
// =============================================================================
// Everything that talks to the GitHub REST API.
//
// Submodules:
// - fetch:    the Fetcher trait and its reqwest-backed implementation
// - resolve:  walking key paths through parsed JSON
// - repo:     RepoRef and the endpoint URLs built from it
// - branch:   branch lookup -> tree URL (first hop)
// - tree:     recursive tree listing and classification (second hop)
// - contents: directory listing and README download (alternate flow)
// =============================================================================

mod branch;
mod contents;
mod fetch;
mod repo;
mod resolve;
mod tree;

#[cfg(test)]
mod stub;

pub use branch::walk_branch;
pub use contents::{download_readme, ReadmeReport};
pub use fetch::HttpFetcher;
pub use repo::RepoRef;
pub use tree::{count_kinds, TreeEntry};
