use color_eyre::eyre::Result;
use dotenv::dotenv;
use whenmeet_api::{build_store, config::ApiConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Open the configured store (creates the schema for postgres)
    let store = build_store(&config).await?;

    // Start API server
    whenmeet_api::start_server(config, store).await?;

    Ok(())
}
