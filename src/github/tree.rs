// src/github/tree.rs
// =============================================================================
// Second hop of the tree listing: fetch the commit's tree recursively and
// classify every entry as a directory or a file.
//
// The tree API returns one flat array for the whole branch:
//
//   { "sha": "...", "truncated": false, "tree": [
//       { "path": "src",         "type": "tree", "sha": "...", "url": "..." },
//       { "path": "src/main.rs", "type": "blob", "size": 120, "sha": "...", "url": "..." }
//   ] }
//
// Rules:
// - type "tree" is a directory and has no size upstream
// - every other type is a file; its size is copied when upstream sends one
//   (submodules, type "commit", come without a size and are still listed)
// - the array order is kept as-is (GitHub sorts it by path, depth-first)
// - paths are reproduced verbatim, no filtering or normalization
// =============================================================================

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use url::Url;

use crate::error::{ApiError, Result};

use super::fetch::Fetcher;
use super::resolve::{resolve_array, resolve_field, resolve_value, under};

// Directory or file, in the tree API's vocabulary "tree" or "blob"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

// One line of the recursive listing
//
// Directories never carry a size. Files carry the upstream size, or None when
// the API left it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    pub path: String,
    pub kind: EntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    pub sha: String,
    pub url: String,
}

impl TreeEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

// The report line for this entry:
//   Directory = src
//   File = src/main.rs | Size = 120 Bytes
impl fmt::Display for TreeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.size) {
            (EntryKind::Directory, _) => write!(f, "Directory = {}", self.path),
            (EntryKind::File, Some(size)) => {
                write!(f, "File = {} | Size = {} Bytes", self.path, size)
            }
            (EntryKind::File, None) => write!(f, "File = {} | Size = null Bytes", self.path),
        }
    }
}

/// (directories, files) in a listing
pub fn count_kinds(entries: &[TreeEntry]) -> (usize, usize) {
    let directories = entries.iter().filter(|e| e.is_dir()).count();
    (directories, entries.len() - directories)
}

// Fetches `{tree_url}?recursive=1` and maps every element of `tree`
pub async fn list_tree_recursive<F>(fetcher: &F, tree_url: &str) -> Result<Vec<TreeEntry>>
where
    F: Fetcher + ?Sized,
{
    let url = recursive_url(tree_url)?;
    tracing::info!(url = %url, "fetching recursive tree");

    let doc = fetcher.fetch_json(url.as_str()).await?;
    parse_tree(&doc)
}

// Adds the recursive=1 query parameter to the tree URL
fn recursive_url(tree_url: &str) -> Result<Url> {
    let mut url = Url::parse(tree_url)
        .map_err(|e| ApiError::transport(tree_url, format!("invalid tree URL: {}", e)))?;
    url.query_pairs_mut().append_pair("recursive", "1");
    Ok(url)
}

// Maps a tree API document into entries, in array order
pub fn parse_tree(doc: &Value) -> Result<Vec<TreeEntry>> {
    let elements = resolve_array(doc, &["tree"])?;

    if doc.get("truncated").and_then(Value::as_bool) == Some(true) {
        tracing::warn!(
            entries = elements.len(),
            "tree listing was truncated by the API, some entries are missing"
        );
    }

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            parse_entry(element).map_err(|e| under(&format!("tree[{}]", index), e))
        })
        .collect()
}

fn parse_entry(element: &Value) -> Result<TreeEntry> {
    let path = string_field(element, "path")?;
    let entry_type = string_field(element, "type")?;

    // Directories have no size field upstream, so only files read it
    let (kind, size) = if entry_type == "tree" {
        (EntryKind::Directory, None)
    } else {
        (EntryKind::File, file_size(element, &path, &entry_type)?)
    };

    Ok(TreeEntry {
        path,
        kind,
        size,
        sha: optional_string(element, "sha"),
        url: optional_string(element, "url"),
    })
}

// Missing or null size is reported as unknown; anything else must be a u64
fn file_size(element: &Value, path: &str, entry_type: &str) -> Result<Option<u64>> {
    match element.get("size") {
        None | Some(Value::Null) => {
            tracing::warn!(path, entry_type, "tree entry has no size");
            Ok(None)
        }
        Some(_) => resolve_value(element, &["size"])?
            .as_u64()
            .map(Some)
            .ok_or_else(|| ApiError::TypeMismatch {
                path: "size".to_string(),
                expected: "a non-negative integer",
            }),
    }
}

fn string_field(element: &Value, key: &str) -> Result<String> {
    resolve_field(element, &[key])
}

// sha and url are informational; submodule entries, for one, have no url
fn optional_string(element: &Value, key: &str) -> String {
    element
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
