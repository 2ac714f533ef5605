// src/github/repo.rs
// =============================================================================
// Identifies the repository branch we're reading and builds the REST URLs
// for it.
//
// Endpoints:
//   {api_base}/repos/{owner}/{repo}/branches/{branch}
//   {api_base}/repos/{owner}/{repo}/contents?ref={branch}
//
// The url crate does the joining, so owner/repo/branch values are
// percent-encoded as path segments instead of being pasted in raw.
// =============================================================================

use std::fmt;
use url::Url;

use crate::error::{ApiError, Result};

/// Which branch of which repository to read. Fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, branch: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    /// Branch metadata endpoint
    pub fn branch_url(&self, api_base: &str) -> Result<Url> {
        self.repo_endpoint(api_base, &["branches", &self.branch])
    }

    /// Root directory listing at this branch
    pub fn contents_url(&self, api_base: &str) -> Result<Url> {
        let mut url = self.repo_endpoint(api_base, &["contents"])?;
        url.query_pairs_mut().append_pair("ref", &self.branch);
        Ok(url)
    }

    // {api_base}/repos/{owner}/{repo}/{tail...}
    fn repo_endpoint(&self, api_base: &str, tail: &[&str]) -> Result<Url> {
        let mut url = Url::parse(api_base)
            .map_err(|e| ApiError::transport(api_base, format!("invalid API base URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| ApiError::transport(api_base, "API base URL cannot have a path"))?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.repo.as_str()])
            .extend(tail);

        Ok(url)
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.owner, self.repo, self.branch)
    }
}
