pub mod error;
pub mod event;
pub mod hook;
pub mod machine;
pub mod model;
pub mod settings;
pub mod timer;

pub use error::{PomodoroError, PomodoroResult};
pub use event::{PomodoroEvent, Transition};
pub use hook::{completion_message, CompletionHook, DesktopNotifier};
pub use machine::PomodoroTimer;
pub use model::{format_clock, Phase, Status};
pub use settings::PomodoroSettings;
pub use timer::{ThreadTickSource, TickHandle, TickSource, TimerTick, TICK_PERIOD};
