//! Timer controller: input → timer → tick loop → display

use std::{sync::Arc, time::Duration};
use chrono::{DateTime, Local};
use serde::Serialize;
use tokio::{sync::{watch, Mutex}, task::JoinHandle};
use tracing::{debug, error, info};

use super::display::{Display, DisplayHandle};
use crate::{
    input::{InputError, TimerForm},
    services::ExpiryNotifier,
    tasks::tick_loop,
    timer::{Clock, Timer},
};

/// Point-in-time view of the current timer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub running: bool,
    pub name: String,
    pub duration_seconds: f64,
    pub remaining_seconds: i64,
    pub end_time: Option<DateTime<Local>>,
}

/// The run the controller currently owns
struct ActiveRun {
    timer: Arc<Timer>,
    name: String,
    tick: Option<JoinHandle<()>>,
}

impl ActiveRun {
    fn inert(clock: Arc<dyn Clock>) -> Self {
        Self {
            timer: Arc::new(Timer::new(Duration::ZERO, clock)),
            name: String::new(),
            tick: None,
        }
    }

    /// Stop the timer and wait for its tick loop to exit.
    ///
    /// Returns whether this call stopped a running timer.
    async fn retire(&mut self) -> bool {
        let stopped = self.timer.stop();
        // Keep the handle until the loop has exited so a cancelled caller
        // leaves it for the next one to wait on
        if let Some(tick) = self.tick.as_mut() {
            if let Err(e) = tick.await {
                error!("Tick loop ended abnormally: {}", e);
            }
            self.tick = None;
        }
        stopped
    }

    fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            running: self.timer.is_running(),
            name: self.name.clone(),
            duration_seconds: self.timer.duration().as_secs_f64(),
            remaining_seconds: self.timer.remaining().num_seconds(),
            end_time: self.timer.end_time(),
        }
    }
}

/// Owns at most one timer and its tick loop.
///
/// Start and stop are serialized on the run slot. A new run is only spawned
/// after the previous tick loop has exited, so two loops never write to the
/// display at the same time.
pub struct Controller {
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn ExpiryNotifier>,
    display: DisplayHandle,
    run: Mutex<ActiveRun>,
}

impl Controller {
    /// Create an idle controller holding an inert timer
    pub fn new(clock: Arc<dyn Clock>, notifier: Arc<dyn ExpiryNotifier>) -> Self {
        Self {
            run: Mutex::new(ActiveRun::inert(Arc::clone(&clock))),
            clock,
            notifier,
            display: DisplayHandle::new(),
        }
    }

    /// Validate the form and start a fresh timer, replacing any current one
    pub async fn start(&self, form: &TimerForm) -> Result<TimerSnapshot, InputError> {
        let validated = form.duration_from(&self.clock.now())?;
        let name = form.name.trim().to_string();

        let mut run = self.run.lock().await;
        if run.retire().await {
            info!("Replacing running timer {:?}", run.name);
        }

        // Resolve again now that the previous run is gone; clock targets
        // must not drift by however long that took
        let duration = form.duration_from(&self.clock.now()).unwrap_or(validated);

        let timer = Arc::new(Timer::new(duration, Arc::clone(&self.clock)));
        timer.start();

        if let Some(end_time) = timer.end_time() {
            self.display.publish(Display::running(&name, timer.remaining(), end_time));
            info!("Timer {:?} started for {:?}, ends at {}", name, duration, end_time.format("%H:%M:%S"));
        }

        let tick = tokio::spawn(tick_loop(
            Arc::clone(&timer),
            name.clone(),
            self.display.clone(),
            Arc::clone(&self.notifier),
        ));

        *run = ActiveRun {
            timer,
            name,
            tick: Some(tick),
        };
        Ok(run.snapshot())
    }

    /// Cancel the current timer without firing the expiry action.
    ///
    /// Returns false when nothing was running.
    pub async fn stop(&self) -> bool {
        let mut run = self.run.lock().await;
        let stopped = run.retire().await;
        if stopped {
            self.display.reset();
            info!("Timer {:?} stopped", run.name);
        } else {
            debug!("Stop requested with no running timer");
        }
        stopped
    }

    /// Current timer state
    pub async fn snapshot(&self) -> TimerSnapshot {
        self.run.lock().await.snapshot()
    }

    /// Last published display
    pub fn display(&self) -> Display {
        self.display.current()
    }

    /// Receiver for display updates
    pub fn subscribe(&self) -> watch::Receiver<Display> {
        self.display.subscribe()
    }
}
