//! Render helpers: remaining-time text and the two control buttons

use serde::Serialize;

use crate::state::{EventKind, TimerState};

/// Format seconds as `minutes:seconds`
pub fn format_remaining(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// A control as the presentation layer shows it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlView {
    pub label: &'static str,
    pub action: EventKind,
    pub disabled: bool,
}

/// Start while idle, reset otherwise
pub fn primary_control(state: &TimerState) -> ControlView {
    if state.is_idle() {
        ControlView { label: "start", action: EventKind::Advance, disabled: false }
    } else {
        ControlView { label: "reset", action: EventKind::Reset, disabled: false }
    }
}

/// Pause/unpause toggle, disabled while idle
pub fn secondary_control(state: &TimerState) -> ControlView {
    let disabled = state.is_idle();
    if state.is_playing {
        ControlView { label: "pause", action: EventKind::Pause, disabled }
    } else {
        ControlView { label: "unpause", action: EventKind::Resume, disabled }
    }
}

/// The work length input is locked while a countdown runs; break length never is
pub fn work_input_disabled(state: &TimerState) -> bool {
    state.is_playing
}
