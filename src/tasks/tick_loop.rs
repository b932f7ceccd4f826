//! Per-second countdown task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, timeout, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::{
    services::ExpiryNotifier,
    state::display::{Display, DisplayHandle},
    timer::Timer,
};

/// How often the countdown is refreshed
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Longest the expiry action may run before it is reported as failed
pub const EXPIRY_ACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Background task that refreshes the display while `timer` runs.
///
/// Exits as soon as the timer's cancellation token fires. When the countdown
/// reaches zero the task stops the timer itself; only if that stop wins does it
/// reset the display and fire the expiry notifier. The notifier runs detached,
/// so a slow or hung action never keeps this loop alive.
pub async fn tick_loop(
    timer: Arc<Timer>,
    name: String,
    display: DisplayHandle,
    notifier: Arc<dyn ExpiryNotifier>,
) {
    let cancelled = timer.cancellation();
    let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    debug!("Tick loop started for {:?}", name);

    loop {
        tokio::select! {
            biased;

            _ = cancelled.cancelled() => {
                debug!("Tick loop cancelled");
                return;
            }

            _ = interval.tick() => {
                let remaining = timer.remaining();
                if remaining > chrono::Duration::zero() {
                    if let Some(end_time) = timer.end_time() {
                        let update = Display::running(&name, remaining, end_time);
                        debug!("Countdown {} (ends {})", update.countdown, update.end_time);
                        display.publish(update);
                    }
                    continue;
                }

                if timer.stop() {
                    info!("Timer {:?} expired", name);
                    display.reset();
                    tokio::spawn(run_expiry_action(notifier));
                }
                return;
            }
        }
    }
}

/// Fire the expiry notifier, logging failures and timeouts
async fn run_expiry_action(notifier: Arc<dyn ExpiryNotifier>) {
    match timeout(EXPIRY_ACTION_TIMEOUT, notifier.notify_expiry()).await {
        Ok(Ok(())) => debug!("Expiry action finished"),
        Ok(Err(e)) => error!("Failed to run expiry action: {}", e),
        Err(_) => error!("Expiry action timed out after {:?}", EXPIRY_ACTION_TIMEOUT),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::*;
    use crate::{
        services::notifier::testing::{CountingNotifier, HangingNotifier},
        timer::clock::testing::TokioClock,
    };

    /// Let detached expiry actions run
    async fn settle() {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    fn started(secs: u64) -> Arc<Timer> {
        let timer = Arc::new(Timer::new(
            Duration::from_secs(secs),
            Arc::new(TokioClock::new(Local::now())),
        ));
        timer.start();
        timer
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_countdown_every_tick() {
        let timer = started(10);
        let display = DisplayHandle::new();
        let notifier = Arc::new(CountingNotifier::default());
        let task = tokio::spawn(tick_loop(Arc::clone(&timer), "tea".to_string(), display.clone(), notifier.clone()));

        tokio::time::sleep(Duration::from_millis(3500)).await;
        let current = display.current();
        assert_eq!(current.name, "tea");
        assert_eq!(current.countdown, "00:00:07");
        assert!(current.controls.stop_enabled);

        timer.stop();
        task.await.unwrap();
        assert_eq!(notifier.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn natural_expiry_stops_resets_and_notifies_once() {
        let timer = started(3);
        let display = DisplayHandle::new();
        let notifier = Arc::new(CountingNotifier::default());
        let task = tokio::spawn(tick_loop(Arc::clone(&timer), "x".to_string(), display.clone(), notifier.clone()));

        task.await.unwrap();
        assert!(!timer.is_running());
        assert!(display.current().is_idle());

        settle().await;
        assert_eq!(notifier.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_exits_between_ticks() {
        let timer = started(60);
        let display = DisplayHandle::new();
        let notifier = Arc::new(CountingNotifier::default());
        let task = tokio::spawn(tick_loop(Arc::clone(&timer), "x".to_string(), display.clone(), notifier.clone()));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        let before = Instant::now();
        timer.stop();
        task.await.unwrap();

        assert_eq!(Instant::now(), before);
        assert_eq!(notifier.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn loop_on_stopped_timer_exits_immediately() {
        let timer = Arc::new(Timer::new(Duration::from_secs(5), Arc::new(TokioClock::new(Local::now()))));
        let notifier = Arc::new(CountingNotifier::default());
        tick_loop(timer, String::new(), DisplayHandle::new(), notifier.clone()).await;
        assert_eq!(notifier.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn notifier_failure_does_not_affect_timer_state() {
        let timer = started(1);
        let display = DisplayHandle::new();
        let notifier = Arc::new(CountingNotifier::failing());
        tick_loop(Arc::clone(&timer), "x".to_string(), display.clone(), notifier.clone()).await;
        settle().await;

        assert_eq!(notifier.calls(), 1);
        assert!(!timer.is_running());
        assert!(display.current().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn hung_expiry_action_does_not_keep_loop_alive() {
        let timer = started(1);
        let display = DisplayHandle::new();
        let notifier = Arc::new(HangingNotifier::default());
        let task = tokio::spawn(tick_loop(Arc::clone(&timer), "x".to_string(), display.clone(), notifier.clone()));

        timeout(Duration::from_secs(5), task)
            .await
            .expect("tick loop waited on the expiry action")
            .unwrap();
        settle().await;
        assert_eq!(notifier.calls(), 1);
        assert!(display.current().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn hung_expiry_action_times_out() {
        let notifier = Arc::new(HangingNotifier::default());
        let start = Instant::now();
        run_expiry_action(notifier.clone()).await;

        assert_eq!(Instant::now() - start, EXPIRY_ACTION_TIMEOUT);
        assert_eq!(notifier.calls(), 1);
    }
}
