use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::progress::ProgressConfig;

/// splashload - themed terminal splash screen with simulated loading progress
#[derive(Parser, Debug)]
#[command(name = "splashload")]
#[command(about = "A themed terminal splash screen driven by simulated loading progress")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub progress: ProgressArgs,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Show the interactive splash screen (default)
    Run,
    /// Run the progress controller without a UI and log each update
    Simulate {
        /// Print snapshots as JSON lines on stdout
        #[arg(long)]
        json: bool,
    },
    /// Inspect or change the persisted theme mode
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq)]
pub enum ThemeAction {
    /// Print the active theme mode
    Show,
    /// Switch between light and dark and persist the choice
    Toggle,
}

/// Command line overrides for the progress configuration
#[derive(Args, Debug, Clone, Default)]
pub struct ProgressArgs {
    /// Progress added per tick
    #[arg(long, global = true)]
    pub step: Option<u8>,

    /// Tick interval in milliseconds
    #[arg(long = "interval-ms", global = true)]
    pub interval_ms: Option<u64>,

    /// Delay between reaching the threshold and completing, in milliseconds
    #[arg(long = "delay-ms", global = true)]
    pub delay_ms: Option<u64>,

    /// Progress value at which ticking pauses
    #[arg(long, global = true)]
    pub threshold: Option<u8>,

    /// Wait for an explicit start instead of loading immediately
    #[arg(long, global = true)]
    pub no_auto_start: bool,

    /// Require an explicit done signal instead of completing after the delay
    #[arg(long, global = true)]
    pub manual_done: bool,
}

impl ProgressArgs {
    /// Overlay the flags that were given onto `config`
    pub fn apply(&self, config: &mut ProgressConfig) {
        if let Some(step) = self.step {
            config.increment_step = step;
        }
        if let Some(interval) = self.interval_ms {
            config.tick_interval_ms = interval;
        }
        if let Some(delay) = self.delay_ms {
            config.completion_delay_ms = delay;
        }
        if let Some(threshold) = self.threshold {
            config.initial_threshold = threshold;
        }
        if self.no_auto_start {
            config.auto_start = false;
        }
        if self.manual_done {
            config.auto_complete = false;
        }
    }
}

impl Cli {
    /// Subcommand to run, defaulting to the interactive splash
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_run() {
        let cli = Cli::parse_from(["splashload"]);
        assert_eq!(cli.command(), Commands::Run);
        assert!(!cli.debug);
    }

    #[test]
    fn test_progress_overrides() {
        let cli = Cli::parse_from([
            "splashload",
            "simulate",
            "--json",
            "--step",
            "25",
            "--threshold",
            "50",
            "--manual-done",
        ]);
        assert_eq!(cli.command(), Commands::Simulate { json: true });

        let mut config = ProgressConfig::default();
        cli.progress.apply(&mut config);
        assert_eq!(config.increment_step, 25);
        assert_eq!(config.initial_threshold, 50);
        assert!(!config.auto_complete);
        assert!(config.auto_start);
        assert_eq!(config.tick_interval_ms, 500);
    }

    #[test]
    fn test_theme_subcommand() {
        let cli = Cli::parse_from(["splashload", "--debug", "theme", "toggle"]);
        assert!(cli.debug);
        assert_eq!(
            cli.command(),
            Commands::Theme {
                action: ThemeAction::Toggle
            }
        );
    }
}
