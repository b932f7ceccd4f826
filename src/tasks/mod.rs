//! Background tasks module
//! 
//! This module contains the countdown tick loop and the console frontend.

pub mod console;
pub mod tick_loop;

// Re-export main functions
pub use console::console_display_task;
pub use tick_loop::tick_loop;
