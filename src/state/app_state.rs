//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::Notify;
use tracing::info;

use super::Controller;
use crate::{services::ExpiryNotifier, timer::Clock};

/// Main application state shared by the HTTP handlers
pub struct AppState {
    /// The timer controller
    pub controller: Controller,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Signalled when the window is asked to close
    close_requested: Notify,
}

impl AppState {
    /// Create a new AppState around a fresh controller
    pub fn new(
        port: u16,
        host: String,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn ExpiryNotifier>,
    ) -> Self {
        Self {
            controller: Controller::new(clock, notifier),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            close_requested: Notify::new(),
        }
    }

    /// Remember the most recent user action
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Stop any running timer and ask the application to shut down
    pub async fn request_close(&self) {
        info!("Close requested");
        self.record_action("close");
        self.controller.stop().await;
        self.close_requested.notify_one();
    }

    /// Resolves once [`AppState::request_close`] has been called
    pub async fn closed(&self) {
        self.close_requested.notified().await;
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
