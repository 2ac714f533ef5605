// src/github/fetch.rs
// =============================================================================
// This module makes the HTTP GET requests to the GitHub REST API.
//
// Strategy:
// - One GET per call, no retries
// - Anything other than a 2xx status is a transport error
// - JSON bodies are parsed into serde_json::Value (a typed JSON tree)
// - Raw bodies are logged at debug level so failures are easy to diagnose
//
// The Fetcher trait is the seam between the flows (branch, tree, contents)
// and the network. The real implementation is HttpFetcher; the tests use an
// in-memory fake so they never touch the network.
//
// Rust concepts:
// - Traits: An interface the flows are generic over
// - async_trait: Lets a trait have async methods
// - map_err: Converting one error type into another
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::error::{ApiError, Result};

// Anything that can GET a URL and hand back JSON or raw bytes
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` and parse the body as JSON
    async fn fetch_json(&self, url: &str) -> Result<Value>;

    /// GET `url` and return the body untouched
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

// The real fetcher, backed by a reqwest client
//
// The client is built once and reused for every request (connection pooling)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the client with the headers GitHub expects
    //
    // Parameters:
    //   timeout: per-request timeout (connect + read)
    //   user_agent: GitHub rejects requests that don't send one
    pub fn new(timeout: Duration, user_agent: &str) -> reqwest::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    // Performs the GET and returns the body bytes of a 2xx response
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::transport(url, describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            // Keep the body around in the log, GitHub explains most failures there
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(url, %status, body = %body, "error response");
            return Err(ApiError::transport(url, format!("HTTP {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(url, describe(&e)))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        let body = self.get(url).await?;
        tracing::debug!(url, body = %String::from_utf8_lossy(&body), "response body");
        parse_json(url, &body)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.get(url).await
    }
}

// Parses a response body into a JSON tree
//
// `url` is only carried along for the error message
pub fn parse_json(url: &str, body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body).map_err(|source| ApiError::Parse {
        url: url.to_string(),
        source,
    })
}

// Turns a reqwest error into a short human-readable reason
fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error)
    } else {
        error.to_string()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait instead of calling reqwest directly?
//    - The flows only need "give me JSON for this URL"
//    - Tests can hand them a fake that returns canned documents
//    - The real HTTP code stays in one place
//
// 2. Why Send + Sync on the trait?
//    - async_trait futures are Send by default
//    - In 'all' mode both flows borrow the same fetcher at the same time
//
// 3. What is serde_json::Value?
//    - An enum: Null, Bool, Number, String, Array, Object
//    - Every JSON document fits in it, so we don't need one struct per endpoint
// -----------------------------------------------------------------------------
