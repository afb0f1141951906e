//! Metadata fetchers
//!
//! Design: the site builder only needs "give me preview metadata for this
//! URL". [`MetadataFetcher`] is that seam; [`HttpFetcher`] is the real
//! network implementation and tests plug in their own.

mod http;

pub use http::HttpFetcher;

use crate::error::FetchError;
use crate::extract::PreviewMetadata;
use async_trait::async_trait;
use std::time::Duration;

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Default Accept-Language header, Korean first
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7";

/// Default whole-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);

/// Maximum number of body bytes read from a target page (2 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 2 << 20;

/// Source of preview metadata for a target URL
#[async_trait]
pub trait MetadataFetcher: Send + Sync {
    /// Identifier for logging
    fn name(&self) -> &'static str;

    /// Fetch `url` and extract its preview metadata
    ///
    /// Errors are per-route: callers are expected to fall back to defaults
    /// rather than abort.
    async fn fetch_metadata(&self, url: &str) -> Result<PreviewMetadata, FetchError>;
}

/// Options for [`HttpFetcher`]
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// User-Agent header
    pub user_agent: String,
    /// Accept-Language header
    pub accept_language: String,
    /// Whole-request timeout (connect, headers and body)
    pub timeout: Duration,
    /// Body bytes beyond this limit are silently dropped
    pub max_body_bytes: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}
