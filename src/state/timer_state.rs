//! Timer state machine: phases, events and the transition function

use serde::{Deserialize, Serialize, Serializer};

/// Length of a phase in minutes. Taken as supplied, never validated.
pub type Minutes = f64;

/// Lifecycle stage of the timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Phase {
    Idle,
    Work,
    Break,
}

impl Phase {
    /// Phase entered on ADVANCE: IDLE -> WORK -> BREAK -> IDLE
    pub fn next(self) -> Self {
        match self {
            Phase::Idle => Phase::Work,
            Phase::Work => Phase::Break,
            Phase::Break => Phase::Idle,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "IDLE",
            Phase::Work => "WORK",
            Phase::Break => "BREAK",
        }
    }
}

/// Visual tag for the current phase, only meaningful to renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Unset,
    Work,
    Break,
}

impl Color {
    pub fn as_hex(&self) -> &'static str {
        match self {
            Color::Unset => "",
            Color::Work => "#4EED83",
            Color::Break => "#EDA437",
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_hex())
    }
}

/// Generation counter handed to the countdown engine as its remount key.
///
/// A new value means "discard any progress and count the new duration from full".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct RestartToken(u64);

impl RestartToken {
    pub fn next(self) -> Self {
        RestartToken(self.0.wrapping_add(1))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Event kinds accepted by the state machine, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Advance,
    Reset,
    Pause,
    Resume,
}

/// A dispatched event. Phase-advancing events carry the duration of the phase being entered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Advance { duration: Minutes },
    Reset { duration: Minutes },
    Pause,
    Resume,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Advance { .. } => EventKind::Advance,
            Event::Reset { .. } => EventKind::Reset,
            Event::Pause => EventKind::Pause,
            Event::Resume => EventKind::Resume,
        }
    }
}

/// Snapshot of the timer. Replaced as a whole on every dispatch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerState {
    pub phase: Phase,
    pub is_playing: bool,
    /// Minutes of the phase in effect, captured at transition time
    pub duration: Minutes,
    pub color: Color,
    pub restart_token: RestartToken,
}

impl TimerState {
    /// Initial idle state showing the configured work length
    pub fn new(initial_work_minutes: Minutes) -> Self {
        Self {
            phase: Phase::Idle,
            is_playing: false,
            duration: initial_work_minutes,
            color: Color::Unset,
            restart_token: RestartToken::default(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Duration handed to the countdown engine
    pub fn duration_seconds(&self) -> f64 {
        self.duration * 60.0
    }
}

/// State entered when `phase` completes, with a freshly issued restart token
fn advance_from(phase: Phase, duration: Minutes, restart_token: RestartToken) -> TimerState {
    let (is_playing, color) = match phase {
        Phase::Idle => (true, Color::Work),
        Phase::Work => (true, Color::Break),
        Phase::Break => (false, Color::Work),
    };
    TimerState {
        phase: phase.next(),
        is_playing,
        duration,
        color,
        restart_token,
    }
}

/// Compute the next state from the current one. Total over every phase and event.
///
/// RESET always applies the BREAK completion rule, so every phase returns to an idle
/// baseline. PAUSE and RESUME only touch `is_playing`, which keeps the restart token
/// and lets the countdown freeze instead of restarting.
pub fn transition(current: &TimerState, event: Event) -> TimerState {
    match event {
        Event::Advance { duration } => {
            advance_from(current.phase, duration, current.restart_token.next())
        }
        Event::Reset { duration } => {
            advance_from(Phase::Break, duration, current.restart_token.next())
        }
        Event::Pause => TimerState {
            is_playing: false,
            ..current.clone()
        },
        Event::Resume => TimerState {
            is_playing: true,
            ..current.clone()
        },
    }
}
