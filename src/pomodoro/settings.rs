use serde::Deserialize;

use super::error::{PomodoroError, PomodoroResult};
use super::model::Phase;

/// Durations are whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PomodoroSettings {
    pub work_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
    /// Every n-th completed work session is followed by a long break.
    pub long_break_interval: u32,
    pub auto_start_breaks: bool,
    pub auto_start_work: bool,
    pub notifications: bool,
}

impl Default for PomodoroSettings {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
            long_break_interval: 4,
            auto_start_breaks: true,
            auto_start_work: false,
            notifications: true,
        }
    }
}

impl PomodoroSettings {
    pub fn validate(&self) -> PomodoroResult<()> {
        let fields = [
            ("work_minutes", self.work_minutes),
            ("short_break_minutes", self.short_break_minutes),
            ("long_break_minutes", self.long_break_minutes),
            ("long_break_interval", self.long_break_interval),
        ];
        match fields.into_iter().find(|(_, value)| *value == 0) {
            Some((field, value)) => Err(PomodoroError::InvalidSettings { field, value }),
            None => Ok(()),
        }
    }

    pub const fn duration_secs(&self, phase: Phase) -> u64 {
        let minutes = match phase {
            Phase::Work => self.work_minutes,
            Phase::ShortBreak => self.short_break_minutes,
            Phase::LongBreak => self.long_break_minutes,
        };
        minutes as u64 * 60
    }

    pub const fn auto_starts(&self, phase: Phase) -> bool {
        match phase {
            Phase::Work => self.auto_start_work,
            Phase::ShortBreak | Phase::LongBreak => self.auto_start_breaks,
        }
    }

    /// Phase that follows `finished`, given the completed work count after
    /// it was updated.
    pub const fn next_phase(&self, finished: Phase, completed_work: u32) -> Phase {
        match finished {
            Phase::Work if completed_work % self.long_break_interval == 0 => Phase::LongBreak,
            Phase::Work => Phase::ShortBreak,
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        }
    }
}
