use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kc - small personal helpers for the terminal
#[derive(Parser, Debug)]
#[command(name = "kc")]
#[command(about = "Public ip lookup and a multi-timezone clock")]
#[command(version = "0.1.0")]
pub struct CliArgs {
    /// JSON configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Shows ip and copies it to the clipboard
    Ip,

    /// Shows time with different time zones
    #[command(long_about = "Shows time with different timezones in 24-hour and 12-hour (AM/PM) formats")]
    Now {
        /// Continuously print time until stopped
        #[arg(long)]
        no_stop: bool,
    },
}
