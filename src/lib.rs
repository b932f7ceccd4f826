//! Hourglass - A countdown timer that minimizes all windows when time runs out
//! 
//! This library provides the timer, the controller that drives it from user
//! input, and the HTTP control surface used by frontends.

pub mod config;
pub mod input;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod timer;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use input::{InputError, TimerForm};
pub use state::{AppState, Controller};
pub use api::create_router;
pub use timer::Timer;
pub use utils::signals::shutdown_signal;
