//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::{durations, ConfiguredDurations, Minutes};

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "pomodoro-server")]
#[command(about = "A state-managed HTTP server driving a work/break pomodoro timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial work length in minutes
    #[arg(short, long, default_value_t = durations::DEFAULT_WORK_MINUTES, allow_negative_numbers = true)]
    pub work: Minutes,

    /// Initial break length in minutes
    #[arg(short = 'b', long = "break", default_value_t = durations::DEFAULT_BREAK_MINUTES, allow_negative_numbers = true)]
    pub break_minutes: Minutes,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
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

    /// Initial durations for the timer
    pub fn durations(&self) -> ConfiguredDurations {
        ConfiguredDurations::new(self.work, self.break_minutes)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_durations() {
        let config = Config::try_parse_from(["pomodoro-server"]).unwrap();
        assert_eq!(config.durations(), ConfiguredDurations::default());
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn lengths_are_taken_as_given() {
        let config =
            Config::try_parse_from(["pomodoro-server", "--work", "0.5", "--break", "-1", "-v"]).unwrap();
        assert_eq!(config.durations(), ConfiguredDurations::new(0.5, -1.0));
        assert_eq!(config.log_level(), "debug");
    }
}
