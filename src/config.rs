//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use directories::ProjectDirs;

/// Link used when no share link is given on the command line
pub const DEFAULT_LINK: &str = "https://workout-timer.local/";

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "workout-timer")]
#[command(about = "Plays interval workouts built from a share link or an encoded timer list")]
#[command(version)]
pub struct Config {
    /// Encoded timer list, e.g. "countdown|0,45|||;tabata|0,20|0,10|8|"
    #[arg(short, long)]
    pub workout: Option<String>,

    /// Share link carrying the timer list in its `config` parameter
    #[arg(short, long, conflicts_with = "workout")]
    pub url: Option<String>,

    /// Directory for the saved session and workout history
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Discard any saved session before starting
    #[arg(long)]
    pub fresh: bool,

    /// Seconds between progress log lines
    #[arg(long, default_value = "1")]
    pub status_interval: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Explicit directory, else the platform data dir, else `./.workout-timer`
    pub fn state_dir(&self) -> PathBuf {
        if let Some(dir) = &self.state_dir {
            return dir.clone();
        }
        ProjectDirs::from("", "", "workout-timer")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".workout-timer"))
    }

    pub fn status_period(&self) -> Duration {
        Duration::from_secs(self.status_interval.max(1))
    }

    /// The share link to open, with `--workout` folded into its query
    pub fn link(&self) -> String {
        match (&self.url, &self.workout) {
            (Some(url), _) => url.clone(),
            (None, Some(workout)) => format!(
                "{}?config={}",
                DEFAULT_LINK,
                urlencoding::encode(workout)
            ),
            (None, None) => DEFAULT_LINK.to_string(),
        }
    }
}
