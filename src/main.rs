// src/main.rs

use clap::Parser;
use tracing::info;

use stockshift::config::{self, RunConfig};
use stockshift::inventory::run;
use stockshift::shopify::AdminClient;

#[derive(Parser)]
#[command(name = "stockshift")]
#[command(
    about = "Migrate Shopify variant inventory to a single canonical location",
    long_about = None
)]
struct Cli {
    /// Shopify store domain (e.g. example.myshopify.com)
    #[arg(long, env = "SHOPIFY_STORE_DOMAIN")]
    store_domain: String,

    /// Private app or custom app access token
    #[arg(long, env = "SHOPIFY_ACCESS_TOKEN", hide_env_values = true)]
    access_token: String,

    /// Shopify Admin API version
    #[arg(long, env = "SHOPIFY_API_VERSION", default_value = config::API_VERSION_DEFAULT)]
    api_version: String,

    /// Product query string selecting the products to migrate
    #[arg(long, env = "STOCKSHIFT_PRODUCT_QUERY", default_value = config::DEFAULT_PRODUCT_QUERY)]
    product_query: String,

    /// Target location name to assign inventory to
    #[arg(long, env = "STOCKSHIFT_TARGET_LOCATION", default_value = config::DEFAULT_TARGET_LOCATION)]
    target_location: String,

    /// Comma-separated list of source location names to migrate from
    #[arg(long, env = "STOCKSHIFT_SOURCE_LOCATIONS", default_value = config::DEFAULT_SOURCE_LOCATIONS)]
    source_locations: String,

    /// Products fetched per catalog page
    #[arg(long, default_value_t = 50)]
    page_size: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    request_timeout: u64,

    /// Log planned changes without modifying Shopify data
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Logging level (e.g. info, debug)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before clap resolves env-backed defaults.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level: tracing::Level = cli.log_level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = RunConfig {
        store_domain: cli.store_domain,
        access_token: cli.access_token,
        api_version: cli.api_version,
        product_query: cli.product_query,
        target_location: cli.target_location,
        source_locations: config::parse_source_locations(&cli.source_locations),
        page_size: cli.page_size,
        request_timeout_secs: cli.request_timeout,
        dry_run: cli.dry_run,
    };

    info!("Starting inventory migration for {}", config.store_domain);
    info!("Target location: {}", config.target_location);
    if config.dry_run {
        info!("Dry-run mode: no mutations will be issued");
    }

    let client = AdminClient::new(&config)?;
    run::run(&config, &client).await?;

    Ok(())
}
