// src/github/contents.rs
// =============================================================================
// The alternate flow: list the repository's root directory at a branch, find
// the README and save a copy next to us.
//
// Strategy:
// - GET /repos/{owner}/{repo}/contents?ref={branch} (a JSON array)
// - Pick the first entry whose download_url contains "README"
//   (case-sensitive substring, so readme.md is NOT picked up)
// - Download the raw body once; the same bytes are printed and saved
// - Save as github-api-downloaded-<name> through a temp file that is renamed
//   into place, so a failed download never leaves half a file behind
//
// Finding no README is not an error. Nothing gets written in that case.
// =============================================================================

use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::error::{ApiError, Result};

use super::fetch::Fetcher;
use super::repo::RepoRef;
use super::resolve::{resolve_array, resolve_field, under};

/// Prefix of the local copy's file name
pub const DOWNLOAD_PREFIX: &str = "github-api-downloaded-";

/// What a download URL has to contain for the entry to count as the README
pub const README_MARKER: &str = "README";

// One entry of a directory listing
//
// Sub-directories have no download_url (it's null upstream)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEntry {
    pub name: String,
    pub download_url: Option<String>,
    pub kind: String,
}

// A README that was fetched and saved
#[derive(Debug, Clone)]
pub struct Download {
    pub entry: ContentEntry,
    pub path: PathBuf,
    pub body: Vec<u8>,
}

// Everything the readme flow found: the full listing plus the download, if any
#[derive(Debug, Clone)]
pub struct ReadmeReport {
    pub entries: Vec<ContentEntry>,
    pub download: Option<Download>,
}

// Fetches the root directory listing at the branch
pub async fn list_contents<F>(fetcher: &F, api_base: &str, repo: &RepoRef) -> Result<Vec<ContentEntry>>
where
    F: Fetcher + ?Sized,
{
    let url = repo.contents_url(api_base)?;
    tracing::info!(%repo, url = %url, "fetching directory contents");

    let doc = fetcher.fetch_json(url.as_str()).await?;
    parse_contents(&doc)
}

// Lists the contents, then downloads the README into `output_dir`
pub async fn download_readme<F>(
    fetcher: &F,
    api_base: &str,
    repo: &RepoRef,
    output_dir: &Path,
) -> Result<ReadmeReport>
where
    F: Fetcher + ?Sized,
{
    let entries = list_contents(fetcher, api_base, repo).await?;

    let Some(entry) = select_readme(&entries).cloned() else {
        tracing::info!(entries = entries.len(), "no README found in directory listing");
        return Ok(ReadmeReport {
            entries,
            download: None,
        });
    };

    // select_readme only returns entries that have a download URL
    let url = entry.download_url.as_deref().unwrap_or_default();
    tracing::info!(name = %entry.name, url, "downloading README");

    let body = fetcher.fetch_bytes(url).await?;
    let path = output_dir.join(local_file_name(&entry.name));
    write_atomically(&path, &body)?;

    tracing::info!(path = %path.display(), bytes = body.len(), "saved README");

    Ok(ReadmeReport {
        entries,
        download: Some(Download { entry, path, body }),
    })
}

// First entry whose download URL contains "README"
pub fn select_readme(entries: &[ContentEntry]) -> Option<&ContentEntry> {
    entries.iter().find(|entry| {
        entry
            .download_url
            .as_deref()
            .is_some_and(|url| url.contains(README_MARKER))
    })
}

/// `github-api-downloaded-<name>`
pub fn local_file_name(name: &str) -> String {
    format!("{}{}", DOWNLOAD_PREFIX, name)
}

// Maps a contents API document (a top-level array) into entries
pub fn parse_contents(doc: &Value) -> Result<Vec<ContentEntry>> {
    resolve_array(doc, &[])?
        .iter()
        .enumerate()
        .map(|(index, element)| parse_entry(element).map_err(|e| under(&format!("[{}]", index), e)))
        .collect()
}

fn parse_entry(element: &Value) -> Result<ContentEntry> {
    let name = resolve_field(element, &["name"])?;
    let kind = resolve_field(element, &["type"])?;

    // Missing and null both mean "no download URL"
    let download_url = match element.get("download_url") {
        None | Some(Value::Null) => None,
        Some(_) => Some(resolve_field(element, &["download_url"])?),
    };

    Ok(ContentEntry {
        name,
        download_url,
        kind,
    })
}

// Writes `bytes` to a temp file in the destination's directory, then renames
// it over `dest`. Either the whole file appears or nothing does.
fn write_atomically(dest: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let io_error = |source: std::io::Error| ApiError::Io {
        path: dest.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_error)?;
    tmp.write_all(bytes).map_err(io_error)?;
    tmp.as_file().sync_all().map_err(io_error)?;
    tmp.persist(dest).map_err(|e| io_error(e.error))?;

    Ok(())
}
