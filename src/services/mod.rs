//! External side effects module
//! 
//! This module contains the OS command runner and the expiry collaborators
//! built on top of it.

pub mod notifier;
pub mod system;

// Re-export main types
pub use notifier::{ExpiryNotifier, MinimizeWindows, NoopNotifier};
pub use system::{check_program_available, execute_shell_command, ShellCommand};
