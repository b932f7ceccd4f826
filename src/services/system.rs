//! System operations like minimizing all windows

use tokio::process::Command;
use tracing::{debug, info};

/// A program plus arguments to run through the OS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ShellCommand {
    /// Command from a program name and its arguments
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Platform command that minimizes every application window
    pub fn minimize_all() -> Self {
        if cfg!(target_os = "windows") {
            Self::new(
                "powershell",
                ["-Command", "(New-Object -ComObject Shell.Application).MinimizeAll()"],
            )
        } else if cfg!(target_os = "macos") {
            Self::new(
                "osascript",
                [
                    "-e",
                    "tell application \"System Events\" to set visible of every process whose visible is true and name is not \"Finder\" to false",
                ],
            )
        } else {
            Self::new("wmctrl", ["-k", "on"])
        }
    }
}

impl std::fmt::Display for ShellCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Run the command to completion, failing on a non-zero exit status
pub async fn execute_shell_command(command: &ShellCommand) -> Result<(), String> {
    debug!("Executing {}", command);

    let output = Command::new(&command.program)
        .args(&command.args)
        .output()
        .await
        .map_err(|e| format!("Failed to execute {}: {}", command.program, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("{} failed: {}", command.program, stderr.trim()));
    }

    info!("{} executed", command.program);
    Ok(())
}

/// Check if the program can be spawned on this system
pub async fn check_program_available(program: &str) -> Result<(), String> {
    let probe = if cfg!(target_os = "windows") { "where" } else { "which" };

    let output = Command::new(probe)
        .arg(program)
        .output()
        .await
        .map_err(|e| format!("Failed to look up {}: {}", program, e))?;

    if !output.status.success() {
        return Err(format!("{} is not available on this system", program));
    }

    info!("{} is available", program);
    Ok(())
}
