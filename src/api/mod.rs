//! HTTP API module
//! 
//! This module contains the HTTP endpoint handlers, request/response structures
//! and the render helpers used by the status endpoint.

pub mod handlers;
pub mod responses;
pub mod view;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/dispatch", post(dispatch_handler))
        .route("/primary", post(primary_handler))
        .route("/secondary", post(secondary_handler))
        .route("/config/work", put(work_config_handler))
        .route("/config/break", put(break_config_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
