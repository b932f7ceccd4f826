//! Collaborators invoked when a countdown runs out on its own

use async_trait::async_trait;
use tracing::info;

use super::system::{execute_shell_command, ShellCommand};

/// Action fired on natural expiry. Failures are reported, never retried.
#[async_trait]
pub trait ExpiryNotifier: Send + Sync {
    async fn notify_expiry(&self) -> Result<(), String>;
}

/// Minimizes every window through an OS command
#[derive(Debug, Clone)]
pub struct MinimizeWindows {
    command: ShellCommand,
}

impl MinimizeWindows {
    /// Notifier running the given command
    pub fn new(command: ShellCommand) -> Self {
        Self { command }
    }

    /// Command run on expiry
    pub fn command(&self) -> &ShellCommand {
        &self.command
    }
}

impl Default for MinimizeWindows {
    fn default() -> Self {
        Self::new(ShellCommand::minimize_all())
    }
}

#[async_trait]
impl ExpiryNotifier for MinimizeWindows {
    async fn notify_expiry(&self) -> Result<(), String> {
        info!("Minimizing all windows");
        execute_shell_command(&self.command).await
    }
}

/// Does nothing on expiry
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl ExpiryNotifier for NoopNotifier {
    async fn notify_expiry(&self) -> Result<(), String> {
        info!("Timer expired, window minimizing is disabled");
        Ok(())
    }
}
