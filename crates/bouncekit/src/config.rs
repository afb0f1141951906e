//! Route configuration
//!
//! Loaded from a JSON file such as:
//!
//! ```json
//! {
//!   "cname": "go.example.com",
//!   "globalOG": "https://example.com/og.png",
//!   "defaultRedirect": "https://example.com",
//!   "routes": { "/spring": "https://example.com/event/spring" }
//! }
//! ```
//!
//! Every field is optional. An optional `site` object overrides the origin
//! used for canonical URLs and the default title/description texts.

use crate::error::BuildError;
use crate::output::{CNAME_FILE, NOT_FOUND_FILE};
use crate::page::normalize_route_path;
use crate::resolve::is_absolute_http_url;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Origin the generated pages are served from
pub const DEFAULT_SITE_ORIGIN: &str = "https://shop.unigoods.im";

/// Title used when a target has no `og:title`
pub const DEFAULT_SITE_NAME: &str = "UniGoods";

/// Description used when a target has no `og:description`
pub const DEFAULT_DESCRIPTION: &str = "UniGoods link";

/// Description of the catch-all 404 page
pub const DEFAULT_NOT_FOUND_DESCRIPTION: &str = "유니굿즈 숍으로 이동합니다.";

/// Parsed `routes.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RouteConfig {
    /// Hostname written to the `CNAME` file
    #[serde(default)]
    pub cname: String,

    /// Image used when a target page has no `og:image`; must be absolute
    #[serde(default, rename = "globalOG")]
    pub global_fallback_image: String,

    /// Destination of the catch-all 404 page
    #[serde(default, rename = "defaultRedirect")]
    pub default_redirect: String,

    /// Raw route key -> target URL
    #[serde(default)]
    pub routes: BTreeMap<String, String>,

    #[serde(default)]
    pub site: SiteOptions,
}

/// Site-wide constants baked into every page
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteOptions {
    /// Scheme and host the pages are served from, without trailing slash
    pub origin: String,
    /// Default title
    pub name: String,
    /// Default description
    pub description: String,
    /// Description of the 404 page
    pub not_found_description: String,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            origin: DEFAULT_SITE_ORIGIN.to_string(),
            name: DEFAULT_SITE_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            not_found_description: DEFAULT_NOT_FOUND_DESCRIPTION.to_string(),
        }
    }
}

impl SiteOptions {
    /// Canonical URL of the page served at `logical_path`
    pub fn canonical_url(&self, logical_path: &str) -> String {
        format!("{}{}", self.origin, logical_path)
    }
}

impl RouteConfig {
    /// Read, parse and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BuildError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| BuildError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate config JSON
    pub fn from_json(raw: &str) -> Result<Self, BuildError> {
        let config: RouteConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants the site builder relies on
    pub fn validate(&self) -> Result<(), BuildError> {
        if !self.global_fallback_image.is_empty()
            && !is_absolute_http_url(&self.global_fallback_image)
        {
            return Err(BuildError::InvalidConfig(format!(
                "globalOG must be an absolute http(s) URL, got {:?}",
                self.global_fallback_image
            )));
        }

        if self.site.origin.is_empty() || self.site.origin.ends_with('/') {
            return Err(BuildError::InvalidConfig(format!(
                "site origin must be non-empty without a trailing slash, got {:?}",
                self.site.origin
            )));
        }

        let mut seen: BTreeMap<String, &str> = BTreeMap::new();
        for raw in self.routes.keys() {
            if raw.contains('\\') || raw.split('/').any(|segment| segment == "..") {
                return Err(BuildError::InvalidConfig(format!(
                    "route {:?} escapes the output directory",
                    raw
                )));
            }

            let path = normalize_route_path(raw);
            let top = path.trim_start_matches('/').split('/').next().unwrap_or("");
            if [CNAME_FILE, NOT_FOUND_FILE]
                .iter()
                .any(|reserved| top.eq_ignore_ascii_case(reserved))
            {
                return Err(BuildError::InvalidConfig(format!(
                    "route {:?} collides with the generated {} file",
                    raw, top
                )));
            }

            if let Some(previous) = seen.insert(path.clone(), raw.as_str()) {
                return Err(BuildError::InvalidConfig(format!(
                    "routes {:?} and {:?} both map to {}",
                    previous, raw, path
                )));
            }
        }

        Ok(())
    }

    /// Routes as (normalized path, target URL), ordered by raw key
    pub fn normalized_routes(&self) -> impl Iterator<Item = (String, &str)> {
        self.routes
            .iter()
            .map(|(raw, target)| (normalize_route_path(raw), target.as_str()))
    }
}
