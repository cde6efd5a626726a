//! Pomodoro Server - A state-managed HTTP server driving a work/break timer
//! 
//! This is the main entry point for the pomodoro-server application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_server::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::countdown_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_server={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, work={}min, break={}min",
          config.host, config.port, config.work, config.break_minutes);

    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.durations()));

    // Start the countdown engine
    let countdown_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_task(countdown_state).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /primary      - Start when idle, reset otherwise");
    info!("  POST /secondary    - Pause or unpause the running phase");
    info!("  POST /dispatch     - Apply an advance/reset/pause/resume event");
    info!("  PUT  /config/work  - Set work length in minutes");
    info!("  PUT  /config/break - Set break length in minutes");
    info!("  GET  /status       - Current phase, remaining time and controls");
    info!("  GET  /health       - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        signal = shutdown_signal() => {
            info!("Shutdown signal {} received", signal);
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
