//! Main application state management

use std::{
    fmt,
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{
    durations::ConfiguredDurations,
    timer_state::{transition, Event, EventKind, Minutes, RestartToken, TimerState},
};

/// Latest remaining time published by the countdown engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CountdownProgress {
    pub restart_token: RestartToken,
    pub remaining_seconds: u64,
}

impl CountdownProgress {
    /// Remaining seconds for `state`, or the full duration if the engine has not
    /// picked up this run yet
    pub fn remaining_for(&self, state: &TimerState) -> u64 {
        if self.restart_token == state.restart_token {
            self.remaining_seconds
        } else {
            full_seconds(state.duration_seconds())
        }
    }
}

/// Whole seconds shown for a duration, rounded up like a countdown display
pub fn full_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds.ceil() as u64
    } else {
        0
    }
}

/// Why a control press was not dispatched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// Control is unavailable in the current phase
    Disabled(&'static str),
    /// Countdown completion for a run that was already replaced
    Stale(RestartToken),
    /// Shared state could not be accessed
    State(String),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::Disabled(reason) => write!(f, "control disabled: {}", reason),
            ControlError::Stale(token) => write!(f, "run {} was already replaced", token.value()),
            ControlError::State(e) => write!(f, "{}", e),
        }
    }
}

impl From<String> for ControlError {
    fn from(e: String) -> Self {
        ControlError::State(e)
    }
}

/// Main application state: the timer snapshot, configured durations and countdown progress
#[derive(Debug)]
pub struct AppState {
    /// Current timer snapshot, replaced on every dispatch
    pub timer_state: Arc<Mutex<TimerState>>,
    /// Work/break lengths read at dispatch time
    pub durations: Arc<Mutex<ConfiguredDurations>>,
    pub countdown: Arc<Mutex<CountdownProgress>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Channel publishing every new timer snapshot, in dispatch order
    pub timer_update_tx: watch::Sender<TimerState>,
    /// Keep the receiver alive to prevent channel closure
    pub _timer_update_rx: watch::Receiver<TimerState>,
}

impl AppState {
    /// Create a new AppState in the idle phase
    pub fn new(port: u16, host: String, durations: ConfiguredDurations) -> Self {
        let initial = TimerState::new(durations.work_minutes);
        let (timer_update_tx, timer_update_rx) = watch::channel(initial.clone());

        Self {
            timer_state: Arc::new(Mutex::new(initial.clone())),
            durations: Arc::new(Mutex::new(durations)),
            countdown: Arc::new(Mutex::new(CountdownProgress {
                restart_token: initial.restart_token,
                remaining_seconds: full_seconds(initial.duration_seconds()),
            })),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Subscribe to timer snapshots
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Apply an event built from the current snapshot and durations.
    ///
    /// The timer lock is held until the new snapshot is published, so events are
    /// processed one at a time and watchers see them in order.
    fn dispatch_with<F>(&self, build: F) -> Result<TimerState, ControlError>
    where
        F: FnOnce(&TimerState, &ConfiguredDurations) -> Result<Event, ControlError>,
    {
        let durations = self.get_durations()?;

        let mut timer_state = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        let event = build(&timer_state, &durations)?;
        let next = transition(&timer_state, event);
        *timer_state = next.clone();

        if let Err(e) = self.timer_update_tx.send(next.clone()) {
            warn!("Failed to send timer update: {}", e);
        }
        drop(timer_state); // Release the lock once watchers are notified

        info!(
            "Dispatched {:?}: phase={} playing={} duration={}min token={}",
            event.kind(),
            next.phase.as_str(),
            next.is_playing,
            next.duration,
            next.restart_token.value()
        );
        self.record_action(event.kind());

        Ok(next)
    }

    /// Dispatch a fully specified event as given
    pub fn dispatch(&self, event: Event) -> Result<TimerState, String> {
        self.dispatch_with(|_, _| Ok(event))
            .map_err(|e| e.to_string())
    }

    /// Dispatch `kind` with the duration taken from the configured durations
    pub fn dispatch_kind(&self, kind: EventKind) -> Result<TimerState, String> {
        self.dispatch_with(|current, durations| Ok(durations.event_for(kind, current.phase)))
            .map_err(|e| e.to_string())
    }

    /// Primary control: start when idle, reset otherwise
    pub fn press_primary(&self) -> Result<TimerState, String> {
        self.dispatch_with(|current, durations| {
            let kind = if current.is_idle() { EventKind::Advance } else { EventKind::Reset };
            Ok(durations.event_for(kind, current.phase))
        })
        .map_err(|e| e.to_string())
    }

    /// Secondary control: toggle pause, unavailable while idle
    pub fn press_secondary(&self) -> Result<TimerState, ControlError> {
        self.dispatch_with(|current, _| {
            if current.is_idle() {
                return Err(ControlError::Disabled("timer is idle"));
            }
            Ok(if current.is_playing { Event::Pause } else { Event::Resume })
        })
    }

    /// Countdown engine completion for the run keyed by `restart_token`.
    ///
    /// Advances like the user would, unless a reset or another completion already
    /// replaced that run, in which case nothing happens.
    pub fn complete_run(&self, restart_token: RestartToken) -> Result<Option<TimerState>, String> {
        let result = self.dispatch_with(|current, durations| {
            if current.restart_token != restart_token {
                return Err(ControlError::Stale(restart_token));
            }
            Ok(durations.event_for(EventKind::Advance, current.phase))
        });

        match result {
            Ok(state) => Ok(Some(state)),
            Err(ControlError::State(e)) => Err(e),
            Err(e) => {
                debug!("Ignoring countdown completion: {}", e);
                Ok(None)
            }
        }
    }

    /// Set the configured work length
    pub fn set_work_minutes(&self, minutes: Minutes) -> Result<ConfiguredDurations, String> {
        let mut durations = self.durations.lock()
            .map_err(|e| format!("Failed to lock durations: {}", e))?;

        durations.set_work_minutes(minutes);
        info!("Work length set to {} minutes", minutes);
        Ok(*durations)
    }

    /// Set the work length unless a countdown is running.
    ///
    /// The timer lock is held across the check and the write, so a start cannot
    /// slip in between.
    pub fn set_work_minutes_if_stopped(&self, minutes: Minutes) -> Result<ConfiguredDurations, ControlError> {
        let timer_state = self.timer_state.lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;

        if timer_state.is_playing {
            return Err(ControlError::Disabled("work length is locked while the timer runs"));
        }

        let durations = self.set_work_minutes(minutes)?;
        drop(timer_state);
        Ok(durations)
    }

    /// Set the configured break length
    pub fn set_break_minutes(&self, minutes: Minutes) -> Result<ConfiguredDurations, String> {
        let mut durations = self.durations.lock()
            .map_err(|e| format!("Failed to lock durations: {}", e))?;

        durations.set_break_minutes(minutes);
        info!("Break length set to {} minutes", minutes);
        Ok(*durations)
    }

    /// Get current timer snapshot
    pub fn get_timer_state(&self) -> Result<TimerState, String> {
        self.timer_state.lock()
            .map(|state| state.clone())
            .map_err(|e| format!("Failed to lock timer state: {}", e))
    }

    /// Get configured durations
    pub fn get_durations(&self) -> Result<ConfiguredDurations, String> {
        self.durations.lock()
            .map(|durations| *durations)
            .map_err(|e| format!("Failed to lock durations: {}", e))
    }

    /// Get the latest countdown progress
    pub fn get_countdown(&self) -> Result<CountdownProgress, String> {
        self.countdown.lock()
            .map(|progress| *progress)
            .map_err(|e| format!("Failed to lock countdown progress: {}", e))
    }

    /// Record remaining time for the run identified by `restart_token`
    pub fn update_countdown(&self, restart_token: RestartToken, remaining_seconds: u64) -> Result<(), String> {
        let mut progress = self.countdown.lock()
            .map_err(|e| format!("Failed to lock countdown progress: {}", e))?;

        *progress = CountdownProgress {
            restart_token,
            remaining_seconds,
        };
        Ok(())
    }

    fn record_action(&self, kind: EventKind) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(format!("{:?}", kind).to_lowercase());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
