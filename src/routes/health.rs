use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    info!("GET /health - Health check");
    let connected = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("Database ping failed: {}", e);
            false
        }
    };
    let status = if connected { StatusCode::OK } else { StatusCode::INTERNAL_SERVER_ERROR };
    (
        status,
        Json(json!({
            "status": if connected { "ok" } else { "error" },
            "database": if connected { "connected" } else { "disconnected" },
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
}
