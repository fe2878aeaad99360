//! Stop Signal
//!
//! Stop request shared between the supervisor and a thread-backed render
//! loop. The loop waits on it for one cadence, and draws while holding its
//! lock, so once [`StopSignal::stop`] has returned no new frame can start.

use std::time::Duration;

use parking_lot::{Condvar, Mutex};

/// One-way stop flag with a wakeup
#[derive(Debug, Default)]
pub struct StopSignal {
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl StopSignal {
    /// Create a signal in the running state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop and wake the waiting loop.
    ///
    /// Blocks while a frame is being drawn.
    pub fn stop(&self) {
        let mut stopped = self.stopped.lock();
        *stopped = true;
        self.wake.notify_all();
    }

    /// Whether a stop has been requested
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        *self.stopped.lock()
    }

    /// Guard that requests a stop when dropped, including during unwinding
    #[must_use]
    pub fn stop_on_drop(&self) -> StopOnDrop<'_> {
        StopOnDrop(self)
    }

    /// Wait up to `cadence` for a stop request.
    ///
    /// Returns `None` if a stop was requested. Otherwise runs `draw` with the
    /// lock still held and returns its result.
    pub fn tick<T>(&self, cadence: Duration, draw: impl FnOnce() -> T) -> Option<T> {
        let mut stopped = self.stopped.lock();
        if !*stopped {
            self.wake
                .wait_while_for(&mut stopped, |stopped| !*stopped, cadence);
        }
        if *stopped {
            return None;
        }
        Some(draw())
    }
}

/// Requests a stop on drop. See [`StopSignal::stop_on_drop`].
#[derive(Debug)]
pub struct StopOnDrop<'a>(&'a StopSignal);

impl Drop for StopOnDrop<'_> {
    fn drop(&mut self) {
        self.0.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn test_tick_draws_until_stopped() {
        let signal = StopSignal::new();
        assert_eq!(signal.tick(Duration::from_millis(1), || 7), Some(7));
        signal.stop();
        assert!(signal.is_stopped());
        assert_eq!(signal.tick(Duration::from_millis(1), || 7), None);
    }

    #[test]
    fn test_stop_wakes_waiting_tick() {
        let signal = Arc::new(StopSignal::new());
        let waiter = {
            let signal = Arc::clone(&signal);
            std::thread::spawn(move || {
                let started = Instant::now();
                let drawn = signal.tick(Duration::from_secs(30), || ());
                (drawn, started.elapsed())
            })
        };
        std::thread::sleep(Duration::from_millis(20));
        signal.stop();
        let (drawn, waited) = waiter.join().unwrap();
        assert_eq!(drawn, None);
        assert!(waited < Duration::from_secs(10));
    }

    #[test]
    fn test_guard_stops_on_drop() {
        let signal = StopSignal::new();
        {
            let _guard = signal.stop_on_drop();
            assert!(!signal.is_stopped());
        }
        assert!(signal.is_stopped());
    }

    #[test]
    fn test_guard_stops_on_panic() {
        let signal = StopSignal::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = signal.stop_on_drop();
            panic!("work failed");
        }));
        assert!(result.is_err());
        assert!(signal.is_stopped());
    }
}
