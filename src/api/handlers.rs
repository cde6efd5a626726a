//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::{AppState, ControlError, Event, EventKind};
use super::{
    responses::{
        ApiResponse, ConfigResponse, DispatchRequest, HealthResponse, MinutesRequest,
        StatusResponse,
    },
    view::{format_remaining, primary_control, secondary_control, work_input_disabled},
};

/// Handle POST /dispatch - Apply a raw event to the state machine
pub async fn dispatch_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DispatchRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let result = match (request.kind, request.duration) {
        (EventKind::Advance, Some(duration)) => state.dispatch(Event::Advance { duration }),
        (EventKind::Reset, Some(duration)) => state.dispatch(Event::Reset { duration }),
        (kind, _) => state.dispatch_kind(kind),
    };

    match result {
        Ok(timer) => {
            info!("Dispatch endpoint called - {:?} applied", request.kind);
            Ok(Json(ApiResponse::for_state(
                format!("Timer is now {}", timer.phase.as_str()),
                timer,
            )))
        }
        Err(e) => {
            error!("Failed to dispatch {:?}: {}", request.kind, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /primary - Start when idle, reset otherwise
pub async fn primary_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.press_primary() {
        Ok(timer) => {
            let message = if timer.is_playing { "Timer started" } else { "Timer reset" };
            info!("Primary control pressed - {}", message);
            Ok(Json(ApiResponse::for_state(message.to_string(), timer)))
        }
        Err(e) => {
            error!("Failed to apply primary control: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /secondary - Toggle pause, refused while idle
pub async fn secondary_handler(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<ApiResponse>), StatusCode> {
    match state.press_secondary() {
        Ok(timer) => {
            let message = if timer.is_playing { "Timer resumed" } else { "Timer paused" };
            info!("Secondary control pressed - {}", message);
            Ok((StatusCode::OK, Json(ApiResponse::for_state(message.to_string(), timer))))
        }
        Err(ControlError::State(e)) => {
            error!("Failed to apply secondary control: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => {
            warn!("Secondary control refused: {}", e);
            let timer = state.get_timer_state().map_err(|e| {
                error!("Failed to get timer state: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            })?;
            Ok((StatusCode::CONFLICT, Json(ApiResponse::error(e.to_string(), timer))))
        }
    }
}

/// Handle PUT /config/work - Set the work length, locked while the timer runs
pub async fn work_config_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MinutesRequest>,
) -> Result<Json<ConfigResponse>, StatusCode> {
    match state.set_work_minutes_if_stopped(request.minutes) {
        Ok(durations) => Ok(Json(ConfigResponse::updated(
            format!("Work length set to {} minutes", request.minutes),
            durations,
        ))),
        Err(ControlError::State(e)) => {
            error!("Failed to set work length: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
        Err(e) => {
            warn!("Work length change refused: {}", e);
            Err(StatusCode::CONFLICT)
        }
    }
}

/// Handle PUT /config/break - Set the break length, applied on the next break
pub async fn break_config_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MinutesRequest>,
) -> Result<Json<ConfigResponse>, StatusCode> {
    match state.set_break_minutes(request.minutes) {
        Ok(durations) => Ok(Json(ConfigResponse::updated(
            format!("Break length set to {} minutes", request.minutes),
            durations,
        ))),
        Err(e) => {
            error!("Failed to set break length: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return everything needed to render the timer
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let durations = match state.get_durations() {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to get durations: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let remaining_seconds = match state.get_countdown() {
        Ok(progress) => progress.remaining_for(&timer),
        Err(e) => {
            error!("Failed to get countdown progress: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        remaining_seconds,
        remaining: format_remaining(remaining_seconds),
        primary: primary_control(&timer),
        secondary: secondary_control(&timer),
        work_input_disabled: work_input_disabled(&timer),
        timer,
        durations,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
