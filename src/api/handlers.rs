//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{info, warn};

use crate::{input::TimerForm, state::AppState};
use super::responses::{ApiResponse, StatusResponse, HealthResponse};

/// Handle POST /start - Validate the form and start a countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<TimerForm>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    match state.controller.start(&form).await {
        Ok(snapshot) => {
            state.record_action("start");
            info!("Start endpoint called - timer {:?} running", snapshot.name);
            Ok(Json(ApiResponse::running(
                format!("Timer started for {}s", snapshot.remaining_seconds),
                state.controller.display(),
            )))
        }
        Err(e) => {
            warn!("Rejected start request: {}", e);
            Err((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(e.to_string(), state.controller.display())),
            ))
        }
    }
}

/// Handle POST /stop - Cancel the running countdown
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    state.record_action("stop");

    if state.controller.stop().await {
        info!("Stop endpoint called - timer stopped");
        Json(ApiResponse::stopped(
            "Timer stopped".to_string(),
            state.controller.display(),
        ))
    } else {
        Json(ApiResponse::idle(
            "No timer running".to_string(),
            state.controller.display(),
        ))
    }
}

/// Handle POST /close - Stop the countdown and shut the application down
pub async fn close_handler(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    state.request_close().await;
    Json(ApiResponse::closing(
        "Closing".to_string(),
        state.controller.display(),
    ))
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let snapshot = state.controller.snapshot().await;
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        display: state.controller.display(),
        running: snapshot.running,
        name: snapshot.name,
        remaining_seconds: snapshot.remaining_seconds,
        end_time: snapshot.end_time,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
