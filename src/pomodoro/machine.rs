use super::error::{PomodoroError, PomodoroResult};
use super::event::{PomodoroEvent, Transition};
use super::hook::CompletionHook;
use super::model::{format_clock, Phase, Status};
use super::settings::PomodoroSettings;
use super::timer::{TickHandle, TickSource, TimerTick, TICK_PERIOD};

/// Countdown state machine. Owns at most one repeating timer, which is
/// running exactly while the status is [`Status::Running`].
#[derive(Debug)]
pub struct PomodoroTimer<S: TickSource, H: CompletionHook> {
    settings: PomodoroSettings,
    status: Status,
    phase: Phase,
    remaining_secs: u64,
    completed_work: u32,
    total_work_secs: u64,
    source: S,
    hook: H,
    timer: Option<TickHandle>,
    transition_history: Vec<Transition>,
}

impl<S: TickSource, H: CompletionHook> PomodoroTimer<S, H> {
    pub fn new(settings: PomodoroSettings, source: S, hook: H) -> PomodoroResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            status: Status::Idle,
            phase: Phase::Work,
            remaining_secs: settings.duration_secs(Phase::Work),
            completed_work: 0,
            total_work_secs: 0,
            source,
            hook,
            timer: None,
            transition_history: Vec::new(),
        })
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.completed_work
    }

    /// Seconds ticked away while in a work phase.
    pub fn total_work_secs(&self) -> u64 {
        self.total_work_secs
    }

    pub fn history(&self) -> &[Transition] {
        &self.transition_history
    }

    pub fn active_timer(&self) -> Option<u64> {
        self.timer.as_ref().map(TickHandle::id)
    }

    pub fn display(&self) -> String {
        format_clock(self.remaining_secs)
    }

    /// Elapsed share of the current phase, 0.0 to 100.0.
    pub fn progress_percent(&self) -> f64 {
        let total = self.settings.duration_secs(self.phase);
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.remaining_secs);
        elapsed as f64 / total as f64 * 100.0
    }

    pub fn can_transition(&self, event: PomodoroEvent) -> bool {
        self.next_status(event).is_some()
    }

    pub fn next_status(&self, event: PomodoroEvent) -> Option<Status> {
        use PomodoroEvent::*;
        match (self.status, event) {
            (Status::Idle | Status::Paused, Start) => Some(Status::Running),
            (Status::Running, Pause) => Some(Status::Paused),
            (Status::Running, Tick) if self.remaining_secs <= 1 => Some(Status::Finished),
            (Status::Running, Tick) => Some(Status::Running),
            (Status::Finished, Advance) if self.settings.auto_starts(self.phase) => {
                Some(Status::Running)
            }
            (Status::Finished, Advance) => Some(Status::Idle),
            (Status::Finished, _) => None,
            (_, Reset | Skip | Select(_)) => Some(Status::Idle),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: PomodoroEvent) -> PomodoroResult<Status> {
        tracing::debug!(from = ?self.status, event = ?event, "request pomodoro transition");
        let next = self.next_status(event).ok_or_else(|| {
            let from = self.status;
            tracing::warn!(from = ?from, event = ?event, "invalid pomodoro transition requested");
            PomodoroError::InvalidTransition { from, event }
        })?;

        let from = self.status;
        match event {
            PomodoroEvent::Tick => {
                if self.phase == Phase::Work {
                    self.total_work_secs += 1;
                }
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
            }
            PomodoroEvent::Reset => self.load_phase(self.phase),
            PomodoroEvent::Skip => {
                let next_phase = self.count_finished_phase();
                self.load_phase(next_phase);
            }
            PomodoroEvent::Select(phase) => self.load_phase(phase),
            PomodoroEvent::Start | PomodoroEvent::Pause | PomodoroEvent::Advance => {}
        }

        self.status = next;
        if next == Status::Running {
            self.ensure_timer();
        } else {
            self.timer = None;
        }
        if !(event == PomodoroEvent::Tick && next == Status::Running) {
            self.transition_history
                .push(Transition::new(from, event, next, self.phase));
        }

        if next == Status::Finished {
            self.complete()?;
        }
        Ok(self.status)
    }

    /// Feeds a tick from the tick source. Ticks from a timer that has since
    /// been cancelled are ignored and yield `None`.
    pub fn deliver(&mut self, tick: TimerTick) -> PomodoroResult<Option<Status>> {
        if self.active_timer() != Some(tick.timer) {
            tracing::debug!(timer = tick.timer, "ignoring stale tick");
            return Ok(None);
        }
        self.transition(PomodoroEvent::Tick).map(Some)
    }

    /// Replaces the settings and resets the current phase.
    pub fn apply_settings(&mut self, settings: PomodoroSettings) -> PomodoroResult<Status> {
        settings.validate()?;
        self.settings = settings;
        self.transition(PomodoroEvent::Reset)
    }

    fn complete(&mut self) -> PomodoroResult<()> {
        let finished = self.phase;
        let next_phase = self.count_finished_phase();
        if self.settings.notifications {
            self.hook.phase_completed(finished, next_phase);
        }
        tracing::debug!(?finished, next = ?next_phase, sessions = self.completed_work, "phase completed");
        self.load_phase(next_phase);
        self.transition(PomodoroEvent::Advance)?;
        Ok(())
    }

    /// Counts the current phase as done and returns the phase after it.
    fn count_finished_phase(&mut self) -> Phase {
        if self.phase == Phase::Work {
            self.completed_work += 1;
        }
        self.settings.next_phase(self.phase, self.completed_work)
    }

    fn load_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.remaining_secs = self.settings.duration_secs(phase);
    }

    fn ensure_timer(&mut self) {
        if self.timer.is_none() {
            self.timer = Some(self.source.start(TICK_PERIOD));
        }
    }
}
