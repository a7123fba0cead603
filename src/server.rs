//! HTTP server for outfit recommendations

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::{Recommendation, Recommender, StylistError, UserPreferences};

pub type SharedRecommender = Arc<Mutex<Recommender>>;

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub prompt: String,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    pub item_ids: Vec<String>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: &str, details: impl ToString) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            details: Some(details.to_string()),
        }),
    )
}

/// Recommend handler
async fn recommend_handler(
    State(recommender): State<SharedRecommender>,
    Json(req): Json<RecommendRequest>,
) -> Json<Recommendation> {
    info!("Received recommend request: prompt='{}'", req.prompt);
    let result = recommender.lock().await.recommend(&req.prompt);
    info!(
        "Returning {} outfits for '{}'",
        result.outfits.len(),
        result.occasion
    );
    Json(result)
}

async fn preferences_handler(State(recommender): State<SharedRecommender>) -> Json<UserPreferences> {
    Json(recommender.lock().await.preferences().clone())
}

/// Record an explicitly chosen outfit
async fn confirm_handler(
    State(recommender): State<SharedRecommender>,
    Json(req): Json<ConfirmRequest>,
) -> Result<Json<UserPreferences>, ApiError> {
    info!("Confirming outfit {:?}", req.item_ids);
    if req.item_ids.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "Empty outfit",
            "item_ids must name at least one item",
        ));
    }

    let mut recommender = recommender.lock().await;
    match recommender.confirm(&req.item_ids) {
        Ok(prefs) => Ok(Json(prefs.clone())),
        Err(e @ StylistError::UnknownItem(_)) => {
            Err(api_error(StatusCode::NOT_FOUND, "Unknown item", e))
        }
        Err(e) => {
            error!("Saving preferences failed: {:?}", e);
            Err(api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Saving preferences failed",
                e,
            ))
        }
    }
}

/// Health check handler
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "stylist".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create and configure the HTTP server
pub fn create_router(recommender: SharedRecommender) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/recommend", post(recommend_handler))
        .route("/preferences", get(preferences_handler))
        .route("/preferences/confirm", post(confirm_handler))
        .with_state(recommender)
}

/// Run the HTTP server
pub async fn run_server(recommender: Recommender, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting stylist server on {}", addr);

    let app = create_router(Arc::new(Mutex::new(recommender)));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
