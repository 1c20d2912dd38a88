use config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str =
    "api_server=debug,application=info,domain=info,infrastructure=info,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment
    let config = Config::from_env()?;

    // Initialize tracing, RUST_LOG wins over the default filter
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Artist Catalog API Server");
    info!("Storage: {:?} ({})", config.storage, config.database_path);
    info!("Name validation: {}", if config.require_artist_name { "required" } else { "lenient" });

    api_server::run(config).await
}
