//! One-tick-per-second countdown owned by a verification flow.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;

/// Scoped countdown timer
///
/// `start` spawns a tokio task that decrements once per second, clamps at
/// zero, and stops ticking when zero is reached. At most one tick task is
/// alive per `Countdown`; starting again cancels the previous task. The
/// task is aborted when the owner is dropped, so no ticks outlive the flow
/// that started them.
#[derive(Debug)]
pub struct Countdown {
    rx: watch::Receiver<u64>,
    handle: Option<JoinHandle<()>>,
}

impl Countdown {
    /// An idle countdown with zero seconds remaining
    pub fn idle() -> Self {
        let (_tx, rx) = watch::channel(0);
        Self { rx, handle: None }
    }

    /// Begin a fresh countdown, cancelling any previous one
    ///
    /// Must be called within a tokio runtime. The tick epoch is the call
    /// instant, not the instant the spawned task is first polled.
    pub fn start(&mut self, seconds: u64) {
        self.stop();
        let (tx, rx) = watch::channel(seconds);
        self.rx = rx;
        // default missed-tick behavior (burst) keeps the schedule anchored at
        // the start instant, so remaining time tracks the wall clock even if
        // the task is polled late
        let mut ticker = interval(Duration::from_secs(1));
        let handle = tokio::spawn(async move {
            // the first tick of an interval completes immediately; consume it
            // so the initial value is visible for a full second
            ticker.tick().await;
            let mut remaining = seconds;
            while remaining > 0 {
                ticker.tick().await;
                remaining = remaining.saturating_sub(1);
                if tx.send(remaining).is_err() {
                    break;
                }
            }
        });
        self.handle = Some(handle);
    }

    /// Cancel any pending tick; the remaining value is left as-is
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Cancel any pending tick and return to the idle (zero) state
    pub fn reset(&mut self) {
        self.stop();
        let (_tx, rx) = watch::channel(0);
        self.rx = rx;
    }

    /// Seconds left in the window
    pub fn remaining(&self) -> u64 {
        *self.rx.borrow()
    }

    /// The window has run out (or was never started)
    pub fn is_expired(&self) -> bool {
        self.remaining() == 0
    }

    /// A tick task is alive and the window has not run out
    pub fn is_running(&self) -> bool {
        matches!(&self.handle, Some(handle) if !handle.is_finished()) && self.remaining() > 0
    }

    /// Observe the remaining seconds as they change
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.rx.clone()
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::idle()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.stop();
    }
}
