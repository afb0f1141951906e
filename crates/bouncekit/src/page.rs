//! Route pages: path normalization and the fallback policy
//!
//! [`ResolvedPage`] is the fully-defaulted input to the renderer. It is built
//! from whatever the fetcher produced (possibly nothing) plus the site
//! defaults, and is consumed immediately by [`crate::render`].

use crate::config::SiteOptions;
use crate::error::FetchError;
use crate::extract::PreviewMetadata;
use crate::resolve::try_resolve;

/// Logical path of the catch-all page
pub const NOT_FOUND_PATH: &str = "/404";

/// Everything the renderer needs for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPage {
    /// Normalized logical path, e.g. `/event/spring`
    pub logical_path: String,
    /// Redirect destination
    pub target_url: String,
    pub title: String,
    pub description: String,
    /// Absolute image URL, or empty when no image is known
    pub image_url: String,
    /// Site origin + logical path
    pub canonical_url: String,
}

impl ResolvedPage {
    /// Apply the fallback policy to the outcome of a metadata fetch
    ///
    /// A failed fetch is treated as empty metadata. Order:
    /// 1. empty image takes the global fallback image, verbatim
    /// 2. empty title takes the site name
    /// 3. empty description takes the site description
    /// 4. a scraped image is resolved against `target_url`; if that fails the
    ///    raw value is kept
    pub fn from_fetch(
        logical_path: &str,
        target_url: &str,
        fetched: Result<PreviewMetadata, FetchError>,
        global_fallback_image: &str,
        site: &SiteOptions,
    ) -> Self {
        let metadata = fetched.unwrap_or_default();

        let image_url = if metadata.image.is_empty() {
            global_fallback_image.to_string()
        } else {
            try_resolve(&metadata.image, target_url).unwrap_or_else(|err| {
                tracing::debug!(image = %metadata.image, error = %err, "Keeping unresolved image");
                metadata.image.clone()
            })
        };

        Self {
            logical_path: logical_path.to_string(),
            target_url: target_url.to_string(),
            title: non_empty_or(metadata.title, &site.name),
            description: non_empty_or(metadata.description, &site.description),
            image_url,
            canonical_url: site.canonical_url(logical_path),
        }
    }

    /// The catch-all page redirecting to the default target
    pub fn not_found(default_redirect: &str, global_fallback_image: &str, site: &SiteOptions) -> Self {
        Self {
            logical_path: NOT_FOUND_PATH.to_string(),
            target_url: default_redirect.to_string(),
            title: site.name.clone(),
            description: site.not_found_description.clone(),
            image_url: global_fallback_image.to_string(),
            canonical_url: site.canonical_url(NOT_FOUND_PATH),
        }
    }
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// Normalize a raw route key into a logical path
///
/// The result always starts with `/` and never ends with `/`, except for the
/// root path which is exactly `/`. Empty and `.` segments are dropped, so
/// keys naming the same output directory normalize to the same path.
pub fn normalize_route_path(raw: &str) -> String {
    let segments: Vec<&str> = raw
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect();
    format!("/{}", segments.join("/"))
}
