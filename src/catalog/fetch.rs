//! HTTP fetching for remote catalogs.
//!
//! Thin wrapper over a blocking reqwest client that attaches the GitHub
//! token (when one is configured) to every request.

use anyhow::{bail, Context, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Fetches catalog listings and files over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    token: Option<String>,
}

impl HttpFetcher {
    /// Create a fetcher with the default 30-second timeout.
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_timeout(token, Duration::from_secs(30))
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("graft/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            timeout,
            token,
        })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether requests are authenticated.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Fetch and decode a JSON document.
    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(url)?;
        response
            .json()
            .with_context(|| format!("Invalid JSON from {}", url))
    }

    /// Fetch a UTF-8 document.
    pub fn get_text(&self, url: &str) -> Result<String> {
        let response = self.send(url)?;
        response
            .text()
            .with_context(|| format!("Failed to read response from {}", url))
    }

    /// Fetch raw bytes.
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.send(url)?;
        let bytes = response
            .bytes()
            .with_context(|| format!("Failed to read response from {}", url))?;
        Ok(bytes.to_vec())
    }

    fn request(&self, url: &str) -> RequestBuilder {
        let request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");

        match &self.token {
            Some(token) => request.header("Authorization", format!("token {}", token)),
            None => request,
        }
    }

    fn send(&self, url: &str) -> Result<Response> {
        tracing::debug!("GET {}", url);
        let response = self
            .request(url)
            .send()
            .with_context(|| format!("Failed to fetch {}", url))?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        Ok(response)
    }
}
