//! Countdown timer with a running/stopped lifecycle

use std::{sync::Arc, time::Duration};
use chrono::{DateTime, Local};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::Clock;

/// Longest span a timer accepts; longer requests are clamped
pub const MAX_DURATION: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// A single countdown.
///
/// The end time is fixed when the timer starts and remaining time is always
/// `end_time - now` against the injected clock. Stopping the timer cancels the
/// token handed out by [`Timer::cancellation`], so anything waiting on it wakes
/// up immediately instead of at its next poll.
pub struct Timer {
    duration: Duration,
    clock: Arc<dyn Clock>,
    inner: Mutex<TimerInner>,
}

#[derive(Debug)]
struct TimerInner {
    running: bool,
    end_time: Option<DateTime<Local>>,
    cancel: CancellationToken,
}

impl Timer {
    /// Create a stopped timer for the given span
    pub fn new(duration: Duration, clock: Arc<dyn Clock>) -> Self {
        // A stopped timer hands out an already-cancelled token
        let cancel = CancellationToken::new();
        cancel.cancel();

        Self {
            duration: duration.min(MAX_DURATION),
            clock,
            inner: Mutex::new(TimerInner {
                running: false,
                end_time: None,
                cancel,
            }),
        }
    }

    /// Start the countdown. Returns false if it was already running.
    pub fn start(&self) -> bool {
        let mut inner = self.inner.lock();
        if inner.running {
            return false;
        }

        let end_time = self.clock.now() + span(self.duration);
        inner.end_time = Some(end_time);
        inner.cancel = CancellationToken::new();
        inner.running = true;
        debug!("Timer started: duration={:?}, end_time={}", self.duration, end_time);
        true
    }

    /// Stop the countdown. Returns false if it was already stopped.
    ///
    /// Concurrent callers race on the inner lock; exactly one of them observes `true`.
    pub fn stop(&self) -> bool {
        let mut inner = self.inner.lock();
        if !inner.running {
            return false;
        }

        inner.running = false;
        inner.cancel.cancel();
        debug!("Timer stopped");
        true
    }

    /// Time left until the end time, or zero when stopped. May be negative.
    pub fn remaining(&self) -> chrono::Duration {
        let inner = self.inner.lock();
        match (inner.running, inner.end_time) {
            (true, Some(end_time)) => end_time - self.clock.now(),
            _ => chrono::Duration::zero(),
        }
    }

    /// End time computed by the last start, even if the timer has since stopped
    pub fn end_time(&self) -> Option<DateTime<Local>> {
        self.inner.lock().end_time
    }

    /// Whether the countdown is currently running
    pub fn is_running(&self) -> bool {
        self.inner.lock().running
    }

    /// Requested span of the countdown
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Token that is cancelled when the current run stops
    pub fn cancellation(&self) -> CancellationToken {
        self.inner.lock().cancel.clone()
    }
}

impl std::fmt::Debug for Timer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Timer")
            .field("duration", &self.duration)
            .field("running", &inner.running)
            .field("end_time", &inner.end_time)
            .finish()
    }
}

fn span(duration: Duration) -> chrono::Duration {
    chrono::Duration::seconds(duration.as_secs() as i64)
        + chrono::Duration::nanoseconds(i64::from(duration.subsec_nanos()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::clock::testing::TokioClock;

    fn timer(duration: Duration) -> Timer {
        Timer::new(duration, Arc::new(TokioClock::new(Local::now())))
    }

    #[tokio::test(start_paused = true)]
    async fn start_sets_end_time_and_remaining() {
        let timer = timer(Duration::from_secs(300));
        assert!(!timer.is_running());
        assert_eq!(timer.end_time(), None);

        assert!(timer.start());
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), chrono::Duration::seconds(300));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(timer.remaining(), chrono::Duration::seconds(240));
    }

    #[tokio::test(start_paused = true)]
    async fn start_is_idempotent_while_running() {
        let timer = timer(Duration::from_secs(600));
        assert!(timer.start());
        let end_time = timer.end_time();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert!(!timer.start());
        assert_eq!(timer.end_time(), end_time);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_zeroes_remaining_and_keeps_stale_end_time() {
        let timer = timer(Duration::from_secs(600));
        assert_eq!(timer.remaining(), chrono::Duration::zero());

        timer.start();
        let end_time = timer.end_time();
        tokio::time::sleep(Duration::from_secs(3)).await;

        assert!(timer.stop());
        assert!(!timer.stop());
        assert_eq!(timer.remaining(), chrono::Duration::zero());
        assert_eq!(timer.end_time(), end_time);
    }

    #[tokio::test(start_paused = true)]
    async fn remaining_goes_negative_past_end() {
        let timer = timer(Duration::from_secs(1));
        timer.start();
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(timer.remaining(), chrono::Duration::seconds(-2));
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_token_and_restart_arms_a_new_one() {
        let timer = timer(Duration::from_secs(60));
        assert!(timer.cancellation().is_cancelled());

        timer.start();
        let first = timer.cancellation();
        assert!(!first.is_cancelled());

        timer.stop();
        assert!(first.is_cancelled());

        timer.start();
        assert!(!timer.cancellation().is_cancelled());
        assert!(first.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_stop_has_one_winner() {
        let timer = Arc::new(timer(Duration::from_secs(60)));
        timer.start();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let timer = Arc::clone(&timer);
                tokio::spawn(async move { timer.stop() })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }

    #[test]
    fn oversized_duration_is_clamped() {
        let timer = Timer::new(Duration::MAX, Arc::new(crate::timer::SystemClock));
        assert_eq!(timer.duration(), MAX_DURATION);
    }
}
