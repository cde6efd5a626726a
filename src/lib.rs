//! Pomodoro Server - A state-managed HTTP server driving a work/break timer
//! 
//! The timer is a small state machine (IDLE -> WORK -> BREAK -> IDLE) changed
//! only through dispatched events. A background countdown task advances it when
//! a phase runs out, and the HTTP API exposes the controls and a render view.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{transition, AppState, Event, EventKind, Phase, TimerState};
pub use api::create_router;
pub use tasks::countdown_task;
pub use utils::signals::shutdown_signal;
