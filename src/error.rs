// src/error.rs
// =============================================================================
// Error types for talking to the GitHub REST API.
//
// Every failure in the github/ module is one of these variants:
// - Transport:     the request never produced a 2xx response
// - Parse:         the body came back but is not valid JSON
// - PathNotFound:  the JSON is fine but an expected key is missing
// - TypeMismatch:  the key is there but holds the wrong kind of value
// - Io:            writing the downloaded file to disk failed
//
// main.rs wraps these in anyhow::Error, so the ? operator works across the
// boundary without any manual conversion.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection failure, timeout, or non-2xx status
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// Response body is not valid JSON
    #[error("response from {url} is not valid JSON: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// An expected key or array is missing from the document
    #[error("field `{path}` not found in response")]
    PathNotFound { path: String },

    /// A value exists but has the wrong shape
    #[error("field `{path}` is not {expected}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
    },

    /// Local file could not be written
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    pub fn transport(url: &str, reason: impl ToString) -> Self {
        ApiError::Transport {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_message_names_url() {
        let err = ApiError::transport("https://api.github.com/x", "HTTP 404 Not Found");
        assert_eq!(
            err.to_string(),
            "request to https://api.github.com/x failed: HTTP 404 Not Found"
        );
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = ApiError::TypeMismatch {
            path: "commit.commit".to_string(),
            expected: "an object",
        };
        assert_eq!(err.to_string(), "field `commit.commit` is not an object");
    }
}
