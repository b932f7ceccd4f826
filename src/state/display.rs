//! Display model pushed to frontends

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Countdown text shown while idle
pub const IDLE_COUNTDOWN: &str = "00:00:00";
/// End-time text shown while idle
pub const IDLE_END_TIME: &str = "--:--";

/// Enabled state of the start/stop controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub start_enabled: bool,
    pub stop_enabled: bool,
}

/// Everything a frontend needs to render the timer window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Display {
    pub name: String,
    pub countdown: String,
    pub end_time: String,
    pub controls: Controls,
}

impl Display {
    /// Idle display with placeholders and the start control enabled
    pub fn idle() -> Self {
        Self {
            name: String::new(),
            countdown: IDLE_COUNTDOWN.to_string(),
            end_time: IDLE_END_TIME.to_string(),
            controls: Controls {
                start_enabled: true,
                stop_enabled: false,
            },
        }
    }

    /// Running display for the given remaining time and end time
    pub fn running(name: &str, remaining: chrono::Duration, end_time: DateTime<Local>) -> Self {
        Self {
            name: name.to_string(),
            countdown: format_countdown(remaining),
            end_time: format_end_time(&end_time),
            controls: Controls {
                start_enabled: false,
                stop_enabled: true,
            },
        }
    }

    /// Whether the display is in its idle state
    pub fn is_idle(&self) -> bool {
        self.controls.start_enabled
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::idle()
    }
}

/// Format a span as `HH:MM:SS`; hours are not wrapped at 24 and negative spans show as zero
pub fn format_countdown(remaining: chrono::Duration) -> String {
    let total = remaining.num_seconds().max(0);
    format!("{:02}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

/// Format the wall-clock end time as `HH:MM`
pub fn format_end_time(end_time: &DateTime<Local>) -> String {
    end_time.format("%H:%M").to_string()
}

/// The single writer side of the display channel.
///
/// Cloned into the tick loop; every display mutation goes through here so
/// frontends only ever observe whole snapshots.
#[derive(Debug, Clone)]
pub struct DisplayHandle {
    tx: watch::Sender<Display>,
}

impl DisplayHandle {
    /// Create a handle holding the idle display
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Display::idle());
        Self { tx }
    }

    /// Replace the current display
    pub fn publish(&self, display: Display) {
        // send_replace keeps the value even when no frontend is subscribed
        self.tx.send_replace(display);
    }

    /// Return the display to idle
    pub fn reset(&self) {
        self.publish(Display::idle());
    }

    /// Copy of the current display
    pub fn current(&self) -> Display {
        self.tx.borrow().clone()
    }

    /// Receiver that observes every published display
    pub fn subscribe(&self) -> watch::Receiver<Display> {
        self.tx.subscribe()
    }
}

impl Default for DisplayHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn countdown_is_zero_padded_and_unwrapped() {
        assert_eq!(format_countdown(chrono::Duration::seconds(5)), "00:00:05");
        assert_eq!(format_countdown(chrono::Duration::seconds(3 * 3600 + 7 * 60 + 9)), "03:07:09");
        assert_eq!(format_countdown(chrono::Duration::hours(30)), "30:00:00");
        assert_eq!(format_countdown(chrono::Duration::hours(100) + chrono::Duration::minutes(1)), "100:01:00");
    }

    #[test]
    fn countdown_truncates_fractional_seconds() {
        assert_eq!(format_countdown(chrono::Duration::milliseconds(59_999)), "00:00:59");
        assert_eq!(format_countdown(chrono::Duration::seconds(-4)), IDLE_COUNTDOWN);
    }

    #[test]
    fn end_time_is_hours_and_minutes() {
        let end_time = Local.with_ymd_and_hms(2024, 1, 2, 7, 5, 59).unwrap();
        assert_eq!(format_end_time(&end_time), "07:05");
    }

    #[test]
    fn idle_and_running_controls_are_exclusive() {
        let idle = Display::idle();
        assert!(idle.is_idle());
        assert!(!idle.controls.stop_enabled);
        assert_eq!(idle.countdown, "00:00:00");
        assert_eq!(idle.end_time, "--:--");

        let end_time = Local.with_ymd_and_hms(2024, 1, 2, 23, 45, 0).unwrap();
        let running = Display::running("tea", chrono::Duration::seconds(61), end_time);
        assert!(!running.is_idle());
        assert!(running.controls.stop_enabled);
        assert_eq!(running.countdown, "00:01:01");
        assert_eq!(running.end_time, "23:45");
    }

    #[test]
    fn handle_publishes_to_subscribers() {
        let handle = DisplayHandle::new();
        let mut rx = handle.subscribe();
        assert!(rx.borrow_and_update().is_idle());

        let end_time = Local.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap();
        handle.publish(Display::running("x", chrono::Duration::seconds(10), end_time));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().countdown, "00:00:10");

        handle.reset();
        assert!(handle.current().is_idle());
    }
}
