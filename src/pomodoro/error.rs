use super::event::PomodoroEvent;
use super::model::Status;
use thiserror::Error;

pub type PomodoroResult<T> = std::result::Result<T, PomodoroError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PomodoroError {
    #[error("invalid pomodoro transition: from {from:?} using event {event:?}")]
    InvalidTransition { from: Status, event: PomodoroEvent },
    #[error("{field} must be at least 1, got {value}")]
    InvalidSettings { field: &'static str, value: u32 },
}
