//! Site generation
//!
//! Drives the whole pipeline for a [`RouteConfig`]: fetch each route's
//! target, apply fallbacks, render, and write the result. A failed fetch only
//! degrades that route's page; write failures abort the run.

use crate::config::RouteConfig;
use crate::error::BuildError;
use crate::fetchers::MetadataFetcher;
use crate::output::OutputDir;
use crate::page::ResolvedPage;
use crate::render::render;
use futures::stream::{self, StreamExt};

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Route pages written
    pub pages_written: usize,
    /// Routes whose target could not be fetched (pages written with fallbacks)
    pub fetch_failures: usize,
    pub cname_written: bool,
    pub not_found_written: bool,
}

/// Generates bounce pages for every configured route
pub struct SiteBuilder {
    config: RouteConfig,
    fetcher: Box<dyn MetadataFetcher>,
    concurrency: usize,
}

impl SiteBuilder {
    /// Create a builder that processes routes one at a time
    pub fn new(config: RouteConfig, fetcher: impl MetadataFetcher + 'static) -> Self {
        Self {
            config,
            fetcher: Box::new(fetcher),
            concurrency: 1,
        }
    }

    /// Allow up to `limit` route fetches in flight (minimum 1)
    pub fn concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.max(1);
        self
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Fetch and default a single route; never fails
    ///
    /// The boolean is true if the fetch failed and fallbacks were used.
    pub async fn resolve_route(&self, logical_path: &str, target_url: &str) -> (ResolvedPage, bool) {
        tracing::info!(
            fetcher = self.fetcher.name(),
            path = logical_path,
            target = target_url,
            "Fetching preview"
        );

        let fetched = self.fetcher.fetch_metadata(target_url).await;
        let failed = match &fetched {
            Ok(_) => false,
            Err(err) => {
                tracing::warn!(url = target_url, error = %err, "Preview fetch failed, using fallbacks");
                true
            }
        };

        let page = ResolvedPage::from_fetch(
            logical_path,
            target_url,
            fetched,
            &self.config.global_fallback_image,
            &self.config.site,
        );
        (page, failed)
    }

    /// Resolve every route, in config order
    pub async fn build_pages(&self) -> Vec<ResolvedPage> {
        self.route_stream()
            .map(|(page, _)| page)
            .collect()
            .await
    }

    /// The catch-all page, if a default redirect is configured
    pub fn not_found_page(&self) -> Option<ResolvedPage> {
        let target = self.config.default_redirect.trim();
        if target.is_empty() {
            return None;
        }
        Some(ResolvedPage::not_found(
            target,
            &self.config.global_fallback_image,
            &self.config.site,
        ))
    }

    /// Run the full pipeline into `out`
    pub async fn generate(&self, out: &OutputDir) -> Result<BuildReport, BuildError> {
        let mut report = BuildReport {
            cname_written: out.write_cname(&self.config.cname)?.is_some(),
            ..Default::default()
        };

        let mut pages = Box::pin(self.route_stream());
        while let Some((page, failed)) = pages.next().await {
            let path = out.write_page(&page.logical_path, &render(&page))?;
            tracing::debug!(path = %path.display(), "Wrote page");
            report.pages_written += 1;
            if failed {
                report.fetch_failures += 1;
            }
        }

        if let Some(page) = self.not_found_page() {
            out.write_not_found(&render(&page))?;
            report.not_found_written = true;
        }

        tracing::info!(
            pages = report.pages_written,
            fetch_failures = report.fetch_failures,
            "Done"
        );
        Ok(report)
    }

    /// Resolved routes with bounded concurrency; output keeps config order
    fn route_stream(&self) -> impl futures::Stream<Item = (ResolvedPage, bool)> + '_ {
        stream::iter(self.config.normalized_routes())
            .map(move |(path, target)| async move { self.resolve_route(&path, target).await })
            .buffered(self.concurrency)
    }
}
