mod config;
mod document;
mod errors;
mod handlers;
mod lookup;
mod models;
mod providers;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::lookup::LookupService;

/// Main entry point for the application.
///
/// Initializes logging, loads configuration, builds the lookup pipeline,
/// and starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_cnpj_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Build the lookup pipeline
    let lookup = match LookupService::new(config.clone()) {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("Failed to initialize lookup service: {}", e);
            anyhow::bail!("lookup service initialization failed");
        }
    };
    tracing::info!(
        "Lookup pipeline ready with {} providers",
        config.provider_order.len()
    );

    // Build application state
    let app_state = Arc::new(handlers::AppState {
        config: config.clone(),
        lookup,
    });

    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/cnpj/:cnpj", get(handlers::lookup_cnpj))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
