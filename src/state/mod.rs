//! State management module
//! 
//! This module contains the display model, the timer controller and the
//! application state that wraps them.

pub mod app_state;
pub mod controller;
pub mod display;

// Re-export main types
pub use app_state::AppState;
pub use controller::{Controller, TimerSnapshot};
pub use display::{Display, DisplayHandle};
