//! BounceKit - static social-preview redirect pages
//!
//! For every configured route, BounceKit fetches the target page, scrapes its
//! Open Graph preview (`og:title`, `og:description`, `og:image`) and writes a
//! tiny HTML page that carries that preview and immediately redirects the
//! browser to the target. Link unfurlers see the target's preview under your
//! own domain; people land on the target.
//!
//! ## Pipeline
//!
//! 1. [`HttpFetcher`] performs one bounded GET (12s timeout, 2 MiB body cap)
//! 2. [`extract()`] reads the preview properties from the (possibly broken) HTML
//! 3. [`ResolvedPage::from_fetch`] fills gaps with site defaults and
//!    absolutizes the image URL via [`resolve()`]
//! 4. [`render()`] produces the escaped HTML document
//! 5. [`OutputDir`] writes it atomically
//!
//! [`SiteBuilder`] runs this for a whole [`RouteConfig`]. A failed fetch
//! never stops the run: that route simply gets a page built from defaults.

pub mod config;
mod error;
pub mod extract;
pub mod fetchers;
pub mod output;
pub mod page;
pub mod render;
pub mod resolve;
pub mod site;

pub use config::{RouteConfig, SiteOptions};
pub use error::{BuildError, FetchError, ResolveError};
pub use extract::{extract, extract_with_policy, DuplicatePolicy, PreviewMetadata};
pub use fetchers::{FetchOptions, HttpFetcher, MetadataFetcher};
pub use output::OutputDir;
pub use page::{normalize_route_path, ResolvedPage};
pub use render::render;
pub use resolve::{resolve, try_resolve};
pub use site::{BuildReport, SiteBuilder};
