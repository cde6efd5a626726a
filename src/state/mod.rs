//! State management module
//! 
//! This module contains the timer state machine, the configured durations
//! and the shared application state that serializes dispatches.

pub mod app_state;
pub mod durations;
pub mod timer_state;

// Re-export main types
pub use app_state::{AppState, ControlError, CountdownProgress};
pub use durations::ConfiguredDurations;
pub use timer_state::{transition, Color, Event, EventKind, Minutes, Phase, RestartToken, TimerState};
