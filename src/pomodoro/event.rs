use super::model::{Phase, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroEvent {
    Start,
    Pause,
    Reset,
    Tick,
    Skip,
    /// Jump to a phase and stop the clock.
    Select(Phase),
    /// Follow-up to a completion: load the next phase.
    Advance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Status,
    pub event: PomodoroEvent,
    pub to: Status,
    /// Phase in effect once the transition has been applied.
    pub phase: Phase,
}

impl Transition {
    pub const fn new(from: Status, event: PomodoroEvent, to: Status, phase: Phase) -> Self {
        Self {
            from,
            event,
            to,
            phase,
        }
    }
}
