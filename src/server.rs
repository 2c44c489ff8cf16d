//! HTTP API over one shared [`SequencePredictor`].
//!
//! - `GET  /api/status` - connection check with the current echo count
//! - `POST /api/predict` - predict the next term of `{"sequence": [...]}`
//! - `GET  /api/echoes` - the full echo history
//! - `POST /api/clear` - drop every echo
//! - `POST /api/validate` - validate `{"sequence": [...]}` without storing it
//! - `GET  /api/samples` - the built-in sample sequences
//!
//! Rejected sequences are answered with `200` and a `failure`/`invalid`
//! body, the same shapes the CLI prints with `--json`. Only a request with
//! no sequence at all is a `400`.

use crate::predictor::{PredictionResult, SequencePredictor};
use crate::samples::{standard_cases, SampleCase};
use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Name reported by `GET /api/status`.
pub const TITLE: &str = "Echo Chamber";

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// State shared by every handler.
#[derive(Debug, Default)]
pub struct ServerState {
    pub predictor: RwLock<SequencePredictor>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Where the server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SequenceRequest {
    /// Left loosely typed so element errors carry their position
    #[serde(default)]
    sequence: Option<Value>,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: &'static str,
    title: &'static str,
    echoes: usize,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct PredictResponse {
    #[serde(flatten)]
    result: PredictionResult,
    echo_count: usize,
}

#[derive(Debug, Serialize)]
struct ClearResponse {
    message: String,
    removed: usize,
}

fn missing_sequence() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "error": "a sequence of numbers is required"
        })),
    )
        .into_response()
}

/// GET /api/status
async fn status_handler(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "connected",
        title: TITLE,
        echoes: state.predictor.read().await.count(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /api/predict
async fn predict_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SequenceRequest>,
) -> Response {
    let Some(sequence) = request.sequence else {
        return missing_sequence();
    };

    let mut predictor = state.predictor.write().await;
    let result = predictor.predict_value(&sequence);
    debug!(success = result.is_success(), "prediction request");

    Json(PredictResponse {
        result,
        echo_count: predictor.count(),
    })
    .into_response()
}

/// GET /api/echoes
async fn echoes_handler(State(state): State<Arc<ServerState>>) -> Json<Value> {
    let predictor = state.predictor.read().await;
    Json(serde_json::json!({
        "count": predictor.count(),
        "echoes": predictor.history(),
    }))
}

/// POST /api/clear
async fn clear_handler(State(state): State<Arc<ServerState>>) -> Json<ClearResponse> {
    let removed = state.predictor.write().await.clear();
    info!(removed, "echo history cleared");
    Json(ClearResponse {
        message: format!("Removed {removed} echoes"),
        removed,
    })
}

/// POST /api/validate
async fn validate_handler(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SequenceRequest>,
) -> Response {
    let Some(sequence) = request.sequence else {
        return missing_sequence();
    };

    let result = state.predictor.read().await.validate_value(&sequence);
    Json(result).into_response()
}

/// GET /api/samples
async fn samples_handler() -> Json<Vec<SampleCase>> {
    Json(standard_cases())
}

/// Build the API router around `state`.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/predict", post(predict_handler))
        .route("/api/echoes", get(echoes_handler))
        .route("/api/clear", post(clear_handler))
        .route("/api/validate", post(validate_handler))
        .route("/api/samples", get(samples_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API until Ctrl+C.
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(ServerState::new());

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.host, config.port))?;
    let addr = listener.local_addr()?;
    info!(%addr, "echo chamber listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received Ctrl+C, shutting down");
            }
        })
        .await
        .context("HTTP server failed")?;

    Ok(())
}
