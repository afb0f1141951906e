//! Error types for BounceKit
//!
//! Errors are split by blast radius: [`FetchError`] and [`ResolveError`] only
//! degrade a single route, while [`BuildError`] aborts the whole run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching a route's target page
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request did not complete within the client timeout
    #[error("Request timed out")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Failed while reading the response body
    #[error("Failed to read response body: {0}")]
    BodyError(String),

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),
}

impl FetchError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::ConnectError(err)
        } else {
            FetchError::RequestError(err.to_string())
        }
    }
}

/// Errors that can occur while resolving a resource reference
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The reference itself is not a valid URL or relative reference
    #[error("Invalid reference {reference:?}: {source}")]
    InvalidReference {
        reference: String,
        #[source]
        source: url::ParseError,
    },

    /// The base URL could not be parsed
    #[error("Invalid base URL {base:?}: {source}")]
    InvalidBase {
        base: String,
        #[source]
        source: url::ParseError,
    },
}

/// Fatal errors that stop a site build
#[derive(Debug, Error)]
pub enum BuildError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for the expected shape
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Config parsed but violates an invariant
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Output file or directory could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FetchError::InvalidUrlScheme.to_string(),
            "Invalid URL: must start with http:// or https://"
        );
        assert_eq!(FetchError::Timeout.to_string(), "Request timed out");
        assert_eq!(
            FetchError::BodyError("reset".to_string()).to_string(),
            "Failed to read response body: reset"
        );
        assert_eq!(
            BuildError::InvalidConfig("bad route".to_string()).to_string(),
            "Invalid config: bad route"
        );
    }

    #[test]
    fn test_write_error_names_path() {
        let err = BuildError::Write {
            path: PathBuf::from("out/a/index.html"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to write out/a/index.html: denied");
    }

    #[test]
    fn test_resolve_error_message() {
        let err = ResolveError::InvalidBase {
            base: "not a url".to_string(),
            source: url::ParseError::RelativeUrlWithoutBase,
        };
        assert_eq!(
            err.to_string(),
            "Invalid base URL \"not a url\": relative URL without a base"
        );
    }
}
