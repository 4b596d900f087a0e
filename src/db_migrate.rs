use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use tracing::info;
use whenmeet_db::schema::initialize_database;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    tracing_subscriber::fmt().with_target(false).init();

    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| eyre!("DATABASE_URL environment variable must be set"))?;

    info!("Connecting to database");
    let db_pool = whenmeet_db::create_pool(&database_url).await?;

    info!("Initializing database schema");
    initialize_database(&db_pool).await?;
    info!("Database schema initialized");

    Ok(())
}
