//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{ConfiguredDurations, EventKind, Minutes, TimerState};
use super::view::ControlView;

/// Body of POST /dispatch. A missing duration is filled from the configured durations.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchRequest {
    pub kind: EventKind,
    pub duration: Option<Minutes>,
}

/// Body of PUT /config/work and PUT /config/break
#[derive(Debug, Clone, Deserialize)]
pub struct MinutesRequest {
    pub minutes: Minutes,
}

/// Response for endpoints that dispatch an event
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerState,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a response reflecting whether the timer runs after the action
    pub fn for_state(message: String, timer: TimerState) -> Self {
        let status = if timer.is_playing { "playing" } else { "stopped" };
        Self::new(status.to_string(), message, timer)
    }

    /// Create an error response carrying the unchanged timer
    pub fn error(message: String, timer: TimerState) -> Self {
        Self::new("error".to_string(), message, timer)
    }
}

/// Response for configuration endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ConfigResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub durations: ConfiguredDurations,
}

impl ConfigResponse {
    pub fn updated(message: String, durations: ConfiguredDurations) -> Self {
        Self {
            status: "updated".to_string(),
            message,
            timestamp: Utc::now(),
            durations,
        }
    }
}

/// Everything needed to render the timer
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timer: TimerState,
    pub remaining_seconds: u64,
    pub remaining: String,
    pub primary: ControlView,
    pub secondary: ControlView,
    pub durations: ConfiguredDurations,
    pub work_input_disabled: bool,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
