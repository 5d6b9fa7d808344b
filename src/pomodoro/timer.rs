use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One period elapsed on the timer identified by `timer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTick {
    pub timer: u64,
}

/// Handle to a running repeating timer. Dropping it cancels the timer; the
/// worker behind it notices on its next wake-up and exits without posting.
#[derive(Debug)]
pub struct TickHandle {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl TickHandle {
    pub fn new(id: u64, cancelled: Arc<AtomicBool>) -> Self {
        Self { id, cancelled }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Something that can start a repeating timer.
pub trait TickSource {
    fn start(&mut self, period: Duration) -> TickHandle;
}

/// Sleeps on a background thread and posts a [`TimerTick`] every period.
#[derive(Debug)]
pub struct ThreadTickSource {
    sender: mpsc::Sender<TimerTick>,
    next_id: AtomicU64,
}

impl ThreadTickSource {
    pub fn channel() -> (Self, mpsc::Receiver<TimerTick>) {
        let (sender, receiver) = mpsc::channel();
        (
            Self {
                sender,
                next_id: AtomicU64::new(1),
            },
            receiver,
        )
    }
}

impl TickSource for ThreadTickSource {
    fn start(&mut self, period: Duration) -> TickHandle {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let sender = self.sender.clone();

        std::thread::spawn(move || loop {
            std::thread::sleep(period);
            if flag.load(Ordering::SeqCst) {
                break;
            }
            if sender.send(TimerTick { timer: id }).is_err() {
                break;
            }
        });
        tracing::debug!(timer = id, ?period, "tick timer started");
        TickHandle::new(id, cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_source_delivers_ticks_until_cancelled() {
        let (mut source, receiver) = ThreadTickSource::channel();
        let handle = source.start(Duration::from_millis(5));
        let first = receiver
            .recv_timeout(Duration::from_secs(2))
            .expect("tick arrives");
        assert_eq!(first.timer, handle.id());

        drop(handle);
        // Drain anything posted before the flag was observed.
        std::thread::sleep(Duration::from_millis(30));
        while receiver.try_recv().is_ok() {}
        assert!(receiver.recv_timeout(Duration::from_millis(50)).is_err());
    }

    #[test]
    fn every_timer_gets_a_fresh_id() {
        let (mut source, _receiver) = ThreadTickSource::channel();
        let first = source.start(Duration::from_secs(60));
        let second = source.start(Duration::from_secs(60));
        assert_ne!(first.id(), second.id());
        first.cancel();
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }
}
