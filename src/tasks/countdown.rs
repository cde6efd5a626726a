//! Countdown engine background task

use std::{future, sync::Arc, time::Duration};
use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::state::{AppState, RestartToken, TimerState};

/// Progress of a single countdown run, keyed by the timer's restart token.
///
/// Pure bookkeeping: every method takes the current instant, so the task decides
/// when to look at the clock.
#[derive(Debug, Clone)]
pub struct Countdown {
    restart_token: RestartToken,
    total: Duration,
    /// Time left as of `resumed_at`, or the frozen value while paused
    remaining: Duration,
    resumed_at: Option<Instant>,
    completed: bool,
}

impl Countdown {
    /// Fresh run at the full duration of `state`
    pub fn new(state: &TimerState, now: Instant) -> Self {
        // Negative, NaN or overflowing durations count as an empty run
        let total = Duration::try_from_secs_f64(state.duration_seconds()).unwrap_or(Duration::ZERO);
        Self {
            restart_token: state.restart_token,
            total,
            remaining: total,
            resumed_at: state.is_playing.then_some(now),
            completed: false,
        }
    }

    /// Follow a new timer snapshot. Returns true if a new run was started.
    pub fn sync(&mut self, state: &TimerState, now: Instant) -> bool {
        if state.restart_token != self.restart_token {
            *self = Self::new(state, now);
            return true;
        }

        match (state.is_playing, self.resumed_at) {
            (true, None) => self.resumed_at = Some(now),
            (false, Some(since)) => {
                self.remaining = self.remaining.saturating_sub(now.saturating_duration_since(since));
                self.resumed_at = None;
            }
            _ => {}
        }
        false
    }

    pub fn restart_token(&self) -> RestartToken {
        self.restart_token
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn is_running(&self) -> bool {
        self.resumed_at.is_some() && !self.completed
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        match self.resumed_at {
            Some(since) => self.remaining.saturating_sub(now.saturating_duration_since(since)),
            None => self.remaining,
        }
    }

    /// Remaining time rounded up to whole seconds
    pub fn remaining_seconds(&self, now: Instant) -> u64 {
        let remaining = self.remaining(now);
        remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0)
    }

    /// When the run reaches zero, if it is running and the instant is representable
    pub fn deadline(&self) -> Option<Instant> {
        if self.completed {
            return None;
        }
        self.resumed_at.and_then(|since| since.checked_add(self.remaining))
    }

    /// True exactly once per run, the first time it is observed at zero while running
    pub fn take_completion(&mut self, now: Instant) -> bool {
        if self.is_running() && self.remaining(now).is_zero() {
            self.completed = true;
            return true;
        }
        false
    }
}

async fn until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => future::pending().await,
    }
}

/// Background task that counts down the current phase and advances the timer on completion
pub async fn countdown_task(state: Arc<AppState>) {
    info!("Starting countdown task");

    let mut timer_rx = state.subscribe();
    let snapshot = timer_rx.borrow_and_update().clone();
    let mut countdown = Countdown::new(&snapshot, Instant::now());

    // Display refresh while running
    let mut ticker = interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let now = Instant::now();
        let remaining = countdown.remaining_seconds(now);
        if let Err(e) = state.update_countdown(countdown.restart_token(), remaining) {
            error!("Failed to update countdown progress: {}", e);
        }

        tokio::select! {
            changed = timer_rx.changed() => {
                if changed.is_err() {
                    warn!("Timer update channel closed, stopping countdown task");
                    break;
                }
                let snapshot = timer_rx.borrow_and_update().clone();
                if countdown.sync(&snapshot, Instant::now()) {
                    info!("Counting down {} for {}s",
                          snapshot.phase.as_str(), countdown.total().as_secs());
                } else {
                    debug!("Countdown {}", if snapshot.is_playing { "resumed" } else { "paused" });
                }
            }

            _ = until(countdown.deadline()) => {}

            _ = ticker.tick(), if countdown.is_running() => {
                debug!("Countdown tick: {}s remaining", remaining);
            }
        }

        if countdown.take_completion(Instant::now()) {
            info!("Countdown finished, advancing timer");
            if let Err(e) = state.complete_run(countdown.restart_token()) {
                error!("Failed to advance timer after countdown: {}", e);
            }
        }
    }
}
