// src/github/branch.rs
// =============================================================================
// First hop of the tree listing: ask the branches endpoint about the branch
// and pull the tree API URL out of its latest commit.
//
// Response shape (only the parts we read):
//
//   {
//     "name": "main",
//     "commit": {
//       "sha": "...",
//       "commit": {
//         "tree": { "sha": "...", "url": "https://api.github.com/.../git/trees/<sha>" }
//       }
//     }
//   }
//
// Nothing is recovered locally: a failed fetch or a missing field goes
// straight back to the caller.
// =============================================================================

use crate::error::Result;

use super::fetch::Fetcher;
use super::repo::RepoRef;
use super::resolve::resolve_field;
use super::tree::{list_tree_recursive, TreeEntry};

/// Where the tree URL lives inside a branch document
pub const TREE_URL_PATH: [&str; 4] = ["commit", "commit", "tree", "url"];

// Looks up the branch and returns the URL of its commit's tree
pub async fn resolve_tree_url<F>(fetcher: &F, api_base: &str, repo: &RepoRef) -> Result<String>
where
    F: Fetcher + ?Sized,
{
    let url = repo.branch_url(api_base)?;
    tracing::info!(%repo, url = %url, "fetching branch metadata");

    let doc = fetcher.fetch_json(url.as_str()).await?;
    let tree_url = resolve_field(&doc, &TREE_URL_PATH)?;

    tracing::info!(tree_url = %tree_url, "resolved tree API URL");
    Ok(tree_url)
}

// Both hops in order: branch lookup, then the recursive tree listing.
// The tree request is only made once the branch lookup has succeeded.
pub async fn walk_branch<F>(fetcher: &F, api_base: &str, repo: &RepoRef) -> Result<Vec<TreeEntry>>
where
    F: Fetcher + ?Sized,
{
    let tree_url = resolve_tree_url(fetcher, api_base, repo).await?;
    list_tree_recursive(fetcher, &tree_url).await
}
