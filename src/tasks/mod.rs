//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod countdown;

// Re-export main items
pub use countdown::{countdown_task, Countdown};
