//! API response structures

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::state::Display;

/// API response structure for timer actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub display: Display,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, display: Display) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            display,
        }
    }

    /// Create a running response
    pub fn running(message: String, display: Display) -> Self {
        Self::new("running".to_string(), message, display)
    }

    /// Create a stopped response
    pub fn stopped(message: String, display: Display) -> Self {
        Self::new("stopped".to_string(), message, display)
    }

    /// Create an idle response
    pub fn idle(message: String, display: Display) -> Self {
        Self::new("idle".to_string(), message, display)
    }

    /// Create a closing response
    pub fn closing(message: String, display: Display) -> Self {
        Self::new("closing".to_string(), message, display)
    }

    /// Create an error response
    pub fn error(message: String, display: Display) -> Self {
        Self::new("error".to_string(), message, display)
    }
}

/// Status response with the current timer and display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub display: Display,
    pub running: bool,
    pub name: String,
    pub remaining_seconds: i64,
    pub end_time: Option<DateTime<Local>>,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
