use crate::config::Config;
use crate::document;
use crate::errors::AppError;
use crate::lookup::LookupService;
use crate::models::CompanyRecord;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// The lookup pipeline.
    pub lookup: LookupService,
}

/// Health check endpoint.
///
/// # Returns
///
/// * `(StatusCode, Json<serde_json::Value>)` - HTTP 200 OK with health status JSON.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "rust-cnpj-api",
            "version": "0.1.0"
        })),
    )
}

/// GET /api/v1/cnpj/:cnpj
///
/// Runs the full provider fallback pipeline for one identifier. Accepts any
/// punctuation style; anything not reducible to 14 digits is a 400 before
/// any provider is contacted. The record comes back as the pipeline built
/// it — consumers must treat `success` as authoritative.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `cnpj` - The identifier from the URL path.
///
/// # Returns
///
/// * `Result<Json<CompanyRecord>, AppError>` - The company record or a 400.
pub async fn lookup_cnpj(
    State(state): State<Arc<AppState>>,
    Path(cnpj): Path<String>,
) -> Result<Json<CompanyRecord>, AppError> {
    tracing::info!("GET /api/v1/cnpj/{}", cnpj);

    if !document::is_valid_cnpj(&cnpj) {
        return Err(AppError::BadRequest(
            "CNPJ must contain exactly 14 digits".to_string(),
        ));
    }

    let record = state.lookup.lookup(&cnpj).await;
    Ok(Json(record))
}
