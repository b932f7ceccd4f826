//! Configuration and CLI argument handling

use clap::Parser;

use crate::{input::TimerForm, services::ShellCommand};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "hourglass")]
#[command(about = "A countdown timer that minimizes all windows when time runs out")]
#[command(version)]
pub struct Config {
    /// Port to bind the control server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not draw the countdown on stdout
    #[arg(long)]
    pub headless: bool,

    /// Do nothing when a countdown expires instead of minimizing windows
    #[arg(long)]
    pub no_minimize: bool,

    /// Program to run on expiry instead of the platform default
    #[arg(long)]
    pub expiry_program: Option<String>,

    /// Argument for --expiry-program (repeatable)
    #[arg(long = "expiry-arg", requires = "expiry_program", allow_hyphen_values = true)]
    pub expiry_args: Vec<String>,

    /// Label for a timer started on launch
    #[arg(long, default_value = "")]
    pub name: String,

    /// Start a timer for this many minutes on launch
    #[arg(short, long, conflicts_with = "at")]
    pub minutes: Option<String>,

    /// Start a timer ending at this clock time (HHMM) on launch
    #[arg(long)]
    pub at: Option<String>,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Command to run on natural expiry, or None when disabled
    pub fn expiry_command(&self) -> Option<ShellCommand> {
        if self.no_minimize {
            return None;
        }
        Some(match &self.expiry_program {
            Some(program) => ShellCommand::new(program.clone(), self.expiry_args.clone()),
            None => ShellCommand::minimize_all(),
        })
    }

    /// Timer requested on the command line, if any
    pub fn initial_form(&self) -> Option<TimerForm> {
        match (&self.minutes, &self.at) {
            (Some(minutes), _) => Some(TimerForm::with_minutes(self.name.clone(), minutes.clone())),
            (None, Some(at)) => Some(TimerForm::with_hour_set(self.name.clone(), at.clone())),
            (None, None) => None,
        }
    }
}
