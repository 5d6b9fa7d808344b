use super::model::Phase;
use crate::notification;

/// Side effect run when a phase counts down to zero.
pub trait CompletionHook {
    fn phase_completed(&mut self, finished: Phase, next: Phase);
}

impl<F> CompletionHook for F
where
    F: FnMut(Phase, Phase),
{
    fn phase_completed(&mut self, finished: Phase, next: Phase) {
        self(finished, next);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DesktopNotifier;

impl CompletionHook for DesktopNotifier {
    fn phase_completed(&mut self, finished: Phase, _next: Phase) {
        let (summary, body) = completion_message(finished);
        notification::send(summary, body);
    }
}

pub const fn completion_message(finished: Phase) -> (&'static str, &'static str) {
    if finished.is_break() {
        ("Break finished", "Time to get back to work!")
    } else {
        ("Work session finished", "Time for a break.")
    }
}
