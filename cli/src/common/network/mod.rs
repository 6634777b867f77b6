//! # rootgen Network Utilities Module (`common::network`)
//!
//! File: cli/src/common/network/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/rootgen
//!
//! ## Overview
//!
//! Retrieval of remote resources referenced by `[[fetch]]` entries in a
//! template-root descriptor. The generator only sees the `Fetcher` trait, so
//! it never talks to the network directly and tests can hand it an in-memory
//! implementation.
//!
//! `HttpFetcher` is the production implementation. It uses a blocking
//! `reqwest` client because generation is a sequential walk with no other
//! concurrent work to overlap with.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::network::{Fetcher, HttpFetcher};
//!
//! # fn run_example() -> crate::core::error::Result<()> {
//! let fetcher = HttpFetcher::new()?;
//! let body = fetcher.fetch("https://example.com/lib.js")?;
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{Result, RootgenError};
use anyhow::Context;
use std::time::Duration;
use tracing::debug;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can turn a URL into text content.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP(S) fetcher.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("rootgen/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("Failed to GET {}", url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!(RootgenError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        response
            .text()
            .with_context(|| format!("Failed to read response body from {}", url))
    }
}
