//! # whenmeet API
//!
//! HTTP surface for the whenmeet scheduling poll. Every handler loads a full
//! meeting snapshot from the configured [`MeetingStore`], runs one core
//! operation on it and, for writes, persists the full snapshot back.
//!
//! ## Architecture
//!
//! - **Routes**: URL structure
//! - **Handlers**: request processing over the core operations
//! - **Middleware**: error mapping
//! - **Config**: environment configuration and store selection

/// Configuration module for API settings
pub mod config;
/// Request handlers
pub mod handlers;
/// Error handling
pub mod middleware;
/// Route definitions
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use whenmeet_core::store::MeetingStore;

use crate::config::{ApiConfig, StoreBackend};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// Backend holding meeting records
    pub store: Arc<dyn MeetingStore>,
}

impl ApiState {
    pub fn new(store: Arc<dyn MeetingStore>) -> Arc<Self> {
        Arc::new(Self { store })
    }
}

/// Builds the application router with all routes attached to `state`.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Meeting and vote endpoints
        .merge(routes::meeting::routes())
        // Aggregated availability endpoints
        .merge(routes::availability::routes())
        .with_state(state)
}

/// Opens the store selected by `config`.
///
/// The PostgreSQL backend also makes sure the schema exists.
pub async fn build_store(config: &ApiConfig) -> Result<Arc<dyn MeetingStore>> {
    let store: Arc<dyn MeetingStore> = match &config.store_backend {
        StoreBackend::Postgres { database_url } => {
            let pool = whenmeet_db::create_pool(database_url).await?;
            whenmeet_db::schema::initialize_database(&pool).await?;
            Arc::new(whenmeet_db::PgMeetingStore::new(pool))
        }
        StoreBackend::File { path } => Arc::new(whenmeet_db::FileMeetingStore::new(path)),
        StoreBackend::Memory => Arc::new(whenmeet_db::MemoryMeetingStore::new()),
    };

    info!("Using {} meeting store", config.store_backend.name());
    Ok(store)
}

/// Starts the API server with the provided configuration and store
///
/// # Example
///
/// ```ignore
/// let config = ApiConfig::from_env()?;
/// let store = build_store(&config).await?;
/// start_server(config, store).await?;
/// ```
pub async fn start_server(config: ApiConfig, store: Arc<dyn MeetingStore>) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let app = router(ApiState::new(store));

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let origins = origins
            .iter()
            .map(|origin| origin.parse())
            .collect::<Result<Vec<axum::http::HeaderValue>, _>>()?;
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(origins);

        app.layer(cors)
    } else {
        app
    };

    // Request tracing and timeout
    let app = app.layer(
        tower::ServiceBuilder::new()
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .layer(tower_http::timeout::TimeoutLayer::new(
                std::time::Duration::from_secs(config.request_timeout),
            )),
    );

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
