// src/github/stub.rs
// =============================================================================
// In-memory Fetcher used by the tests, so no test touches the network.
//
// How it works:
// - Responses are canned per exact URL (JSON, raw body, or a failure)
// - Any URL without a canned response answers like a 404
// - Every requested URL is recorded, in order, so tests can check which
//   calls were made (and which were not)
//
// Rust concepts:
// - Builder methods taking `mut self`: StubFetcher::new().with_json(..)
// - Mutex: Recording requests through &self
// =============================================================================

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

use super::fetch::{parse_json, Fetcher};
use crate::error::{ApiError, Result};

enum Canned {
    Json(Value),
    Body(Vec<u8>),
    Fail(String),
}

#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, Canned>,
    requested: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, url: &str, value: Value) -> Self {
        self.responses.insert(url.to_string(), Canned::Json(value));
        self
    }

    pub fn with_body(mut self, url: &str, body: &[u8]) -> Self {
        self.responses.insert(url.to_string(), Canned::Body(body.to_vec()));
        self
    }

    pub fn with_failure(mut self, url: &str, reason: &str) -> Self {
        self.responses.insert(url.to_string(), Canned::Fail(reason.to_string()));
        self
    }

    /// URLs requested so far, in order
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    fn record(&self, url: &str) -> Result<&Canned> {
        self.requested.lock().unwrap().push(url.to_string());
        match self.responses.get(url) {
            Some(Canned::Fail(reason)) => Err(ApiError::transport(url, reason)),
            Some(canned) => Ok(canned),
            None => Err(ApiError::transport(url, "HTTP 404 Not Found")),
        }
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value> {
        match self.record(url)? {
            Canned::Json(value) => Ok(value.clone()),
            Canned::Body(body) => parse_json(url, body),
            Canned::Fail(_) => unreachable!(),
        }
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        match self.record(url)? {
            Canned::Json(value) => Ok(value.to_string().into_bytes()),
            Canned::Body(body) => Ok(body.clone()),
            Canned::Fail(_) => unreachable!(),
        }
    }
}
