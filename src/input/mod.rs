//! User input module
//! 
//! This module turns the free-text form fields into a countdown span.

pub mod form;

// Re-export main types
pub use form::{InputError, TimerForm};
