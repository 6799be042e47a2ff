use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Use the library instead of redeclaring modules
use globe_tv::{
    catalog::CatalogStore, config::Config, proxy, services::CatalogService, web::WebServer,
};

#[derive(Parser)]
#[command(name = "globe-tv")]
#[command(version = "0.1.0")]
#[command(about = "A world TV directory service with channel classification and stream relaying")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging with specified level
    let log_filter = format!("globe_tv={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting globe-tv v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from specified file
    std::env::set_var("CONFIG_FILE", &cli.config);
    let mut config = Config::load()?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    info!("Public base URL: {}", config.web.base_url);

    let store = CatalogStore::load()?;
    info!(
        "Catalog loaded: {} countries, {} channels",
        store.country_count(),
        store.channel_count()
    );

    if config.proxy.api_key.is_some() {
        info!("Stream relay access key is enabled");
    }

    let catalog = CatalogService::new(Arc::new(store));
    let http_client = proxy::build_client()?;

    let web_server = WebServer::new(config, catalog, http_client)?;

    info!(
        "Starting web server on {}:{}",
        web_server.host(),
        web_server.port()
    );
    web_server.serve().await?;

    Ok(())
}
