//! Churn Prediction API Server
//!
//! REST front end over the inference core. All model state is loaded once
//! at startup into an immutable `AppState`; if either artifact fails to
//! load the process exits instead of serving, so a live `/health` already
//! implies the model is loaded.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use inference_core::ChurnPredictor;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod config;
mod routes;

pub use config::ServiceConfig;
pub use routes::predict::{CustomerRequest, PredictResponse};

/// Application state shared read-only across handlers
pub struct AppState {
    /// Loaded, immutable inference pipeline
    pub predictor: ChurnPredictor,
    /// Threshold applied when a request supplies none
    pub default_threshold: f64,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create application state around a loaded predictor
    pub fn new(predictor: ChurnPredictor, default_threshold: f64) -> Self {
        Self {
            predictor,
            default_threshold,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/predict", post(routes::predict::predict_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Root handler
async fn home_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Customer Churn Prediction API is running"
    }))
}

/// Liveness/readiness handler. Reachable only after both artifacts
/// loaded, so `model_loaded` is true by construction.
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        model_loaded: true,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server until shutdown
pub async fn run_server(
    config: &ServiceConfig,
    predictor: ChurnPredictor,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new(predictor, config.default_threshold));
    let app = create_router(state);

    info!("Starting churn API server on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
