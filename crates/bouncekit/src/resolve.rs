//! Resource URL resolution
//!
//! Turns a possibly-relative reference (as found in an `og:image` tag) into an
//! absolute URL using the page it was scraped from as the base.

use crate::error::ResolveError;
use url::{ParseError, Url};

/// Resolve `reference` against `base`, reporting why resolution failed.
///
/// - An empty reference is returned unchanged.
/// - An absolute reference is returned in its normalized form; the base is
///   not consulted.
/// - A protocol-relative reference (`//host/path`) takes the base's scheme.
/// - Anything else is resolved with RFC 3986 relative-reference rules.
pub fn try_resolve(reference: &str, base: &str) -> Result<String, ResolveError> {
    if reference.is_empty() {
        return Ok(String::new());
    }

    match Url::parse(reference) {
        Ok(absolute) => Ok(absolute.into()),
        Err(ParseError::RelativeUrlWithoutBase) => {
            let base_url = Url::parse(base).map_err(|source| ResolveError::InvalidBase {
                base: base.to_string(),
                source,
            })?;
            base_url
                .join(reference)
                .map(String::from)
                .map_err(|source| ResolveError::InvalidReference {
                    reference: reference.to_string(),
                    source,
                })
        }
        Err(source) => Err(ResolveError::InvalidReference {
            reference: reference.to_string(),
            source,
        }),
    }
}

/// Best-effort variant of [`try_resolve`]: on failure the reference is
/// returned as-is.
pub fn resolve(reference: &str, base: &str) -> String {
    try_resolve(reference, base).unwrap_or_else(|err| {
        tracing::debug!(reference, base, error = %err, "Keeping unresolved reference");
        reference.to_string()
    })
}

/// Returns true if `value` is an absolute http(s) URL with a host
pub fn is_absolute_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}
