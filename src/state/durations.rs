//! Configured work/break lengths, owned outside the state machine

use serde::{Deserialize, Serialize};

use super::timer_state::{Event, EventKind, Minutes, Phase};

pub const DEFAULT_WORK_MINUTES: Minutes = 20.0;
pub const DEFAULT_BREAK_MINUTES: Minutes = 5.0;

/// User-editable durations. Read at dispatch time, so edits only affect the
/// next transition into the matching phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfiguredDurations {
    pub work_minutes: Minutes,
    pub break_minutes: Minutes,
}

impl ConfiguredDurations {
    pub fn new(work_minutes: Minutes, break_minutes: Minutes) -> Self {
        Self {
            work_minutes,
            break_minutes,
        }
    }

    /// Minutes to apply when entering `phase`. IDLE shows the upcoming work length.
    pub fn minutes_for(&self, phase: Phase) -> Minutes {
        match phase {
            Phase::Idle | Phase::Work => self.work_minutes,
            Phase::Break => self.break_minutes,
        }
    }

    /// Build the event for `kind` dispatched while the timer is in `current`.
    ///
    /// ADVANCE carries the length of the phase it enters; RESET always lands on IDLE.
    pub fn event_for(&self, kind: EventKind, current: Phase) -> Event {
        match kind {
            EventKind::Advance => Event::Advance {
                duration: self.minutes_for(current.next()),
            },
            EventKind::Reset => Event::Reset {
                duration: self.minutes_for(Phase::Idle),
            },
            EventKind::Pause => Event::Pause,
            EventKind::Resume => Event::Resume,
        }
    }

    pub fn set_work_minutes(&mut self, minutes: Minutes) {
        self.work_minutes = minutes;
    }

    pub fn set_break_minutes(&mut self, minutes: Minutes) {
        self.break_minutes = minutes;
    }
}

impl Default for ConfiguredDurations {
    fn default() -> Self {
        Self::new(DEFAULT_WORK_MINUTES, DEFAULT_BREAK_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_idle_uses_work_length() {
        let durations = ConfiguredDurations::new(25.0, 5.0);
        assert_eq!(durations.minutes_for(Phase::Idle), 25.0);
        assert_eq!(durations.minutes_for(Phase::Work), 25.0);
        assert_eq!(durations.minutes_for(Phase::Break), 5.0);
    }

    #[test]
    fn advance_reads_length_of_the_phase_being_entered() {
        let durations = ConfiguredDurations::new(25.0, 5.0);
        assert_eq!(
            durations.event_for(EventKind::Advance, Phase::Idle),
            Event::Advance { duration: 25.0 }
        );
        assert_eq!(
            durations.event_for(EventKind::Advance, Phase::Work),
            Event::Advance { duration: 5.0 }
        );
        assert_eq!(
            durations.event_for(EventKind::Advance, Phase::Break),
            Event::Advance { duration: 25.0 }
        );
        assert_eq!(
            durations.event_for(EventKind::Reset, Phase::Work),
            Event::Reset { duration: 25.0 }
        );
        assert_eq!(durations.event_for(EventKind::Pause, Phase::Work), Event::Pause);
    }

    #[test]
    fn setters_assign_without_validation() {
        let mut durations = ConfiguredDurations::default();
        durations.set_work_minutes(0.0);
        durations.set_break_minutes(-1.5);
        assert_eq!(durations, ConfiguredDurations::new(0.0, -1.5));
    }
}
