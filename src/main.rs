use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_db_sync::config::Config;
use auth_db_sync::directory::HttpDirectory;
use auth_db_sync::store::PgUserStore;
use auth_db_sync::{routes, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting auth-db-sync service");

    // Initialize components
    let store = PgUserStore::from_config(&config.database)?;
    let directory = HttpDirectory::new(&config.directory.base_url);

    match &config.directory.pool_id {
        Some(pool_id) => tracing::info!("Syncing from directory pool {}", pool_id),
        None => tracing::warn!("No directory pool configured; full sync triggers will fail"),
    }

    let state = Arc::new(AppState {
        config: config.clone(),
        store: Arc::new(store),
        directory: Arc::new(directory),
    });

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::invoke::router(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
