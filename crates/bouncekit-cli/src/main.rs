//! BounceKit CLI - generate social-preview redirect pages from routes.json

use bouncekit::{FetchOptions, HttpFetcher, OutputDir, RouteConfig, SiteBuilder};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// BounceKit - static redirect pages carrying the target's link preview
#[derive(Parser, Debug)]
#[command(name = "bouncekit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to routes.json
    #[arg(long, default_value = "routes.json")]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Maximum number of targets fetched at once
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Custom User-Agent
    #[arg(long)]
    user_agent: Option<String>,

    /// Per-target request timeout in seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
}

impl Cli {
    fn fetch_options(&self) -> FetchOptions {
        let mut options = FetchOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            ..Default::default()
        };
        if let Some(ref ua) = self.user_agent {
            options.user_agent = ua.clone();
        }
        options
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<(), bouncekit::BuildError> {
    let config = RouteConfig::load(&cli.config)?;
    tracing::info!(
        config = %cli.config.display(),
        routes = config.routes.len(),
        "Loaded config"
    );

    let fetcher = HttpFetcher::with_options(cli.fetch_options());
    let report = SiteBuilder::new(config, fetcher)
        .concurrency(cli.concurrency)
        .generate(&OutputDir::new(&cli.out))
        .await?;

    if report.fetch_failures > 0 {
        tracing::warn!(
            failures = report.fetch_failures,
            "Some previews could not be fetched; their pages use fallbacks"
        );
    }
    Ok(())
}
