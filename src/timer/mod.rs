//! Countdown timer module
//! 
//! This module contains the timer abstraction and the clock it reads.

pub mod clock;
pub mod countdown;

// Re-export main types
pub use clock::{Clock, SystemClock};
pub use countdown::Timer;
