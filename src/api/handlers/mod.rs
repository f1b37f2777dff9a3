pub mod boards;
pub mod cards;
pub mod lists;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::api::state::AppState;
use crate::infrastructure::db;

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let db_connected = match state.db.as_ref() {
        Some(pool) => db::ping(pool).await.is_ok(),
        None => false,
    };

    let status = if db_connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if db_connected { "ok" } else { "degraded" },
            "dbConnected": db_connected,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
