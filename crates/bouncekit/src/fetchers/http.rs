//! HTTP metadata fetcher
//!
//! One GET per target with a bounded timeout and a bounded body. The status
//! code is not inspected: whatever body the server sends is parsed.

use super::{FetchOptions, MetadataFetcher};
use crate::error::FetchError;
use crate::extract::{extract_with_policy, DuplicatePolicy, PreviewMetadata};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

/// Fetches target pages over HTTP(S) and extracts their preview metadata
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    options: FetchOptions,
    policy: DuplicatePolicy,
}

impl HttpFetcher {
    /// Create a fetcher with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fetcher with custom options
    pub fn with_options(options: FetchOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Set the duplicate-tag policy used during extraction
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Options this fetcher was built with
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Fetch the (capped) raw body of `url`
    pub async fn fetch_body(&self, url: &str) -> Result<Bytes, FetchError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(FetchError::InvalidUrlScheme);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.options.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(super::DEFAULT_USER_AGENT)),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("text/html"));
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&self.options.accept_language)
                .unwrap_or_else(|_| HeaderValue::from_static(super::DEFAULT_ACCEPT_LANGUAGE)),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.options.timeout)
            .build()
            .map_err(FetchError::ClientBuildError)?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        tracing::debug!(url, status = response.status().as_u16(), "Received response");

        read_capped_body(response, self.options.max_body_bytes).await
    }
}

#[async_trait]
impl MetadataFetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_metadata(&self, url: &str) -> Result<PreviewMetadata, FetchError> {
        let body = self.fetch_body(url).await?;
        Ok(extract_with_policy(&body, self.policy))
    }
}

/// Read at most `limit` bytes of the body; the rest is never pulled
async fn read_capped_body(response: reqwest::Response, limit: usize) -> Result<Bytes, FetchError> {
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) if e.is_timeout() => return Err(FetchError::Timeout),
            Err(e) => return Err(FetchError::BodyError(e.to_string())),
        };

        let remaining = limit - body.len();
        if chunk.len() >= remaining {
            body.extend_from_slice(&chunk[..remaining]);
            if chunk.len() > remaining {
                tracing::debug!(limit, "Body limit reached, truncating");
            }
            break;
        }
        body.extend_from_slice(&chunk);
    }

    Ok(Bytes::from(body))
}
