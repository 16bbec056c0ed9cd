mod help_text;

use crate::baseline::DEFAULT_BASELINE_FILENAME;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// File integrity monitor for detecting changes to sensitive files
#[derive(Parser, Debug)]
#[command(
    name = "baseward",
    version,
    about,
    long_about = help_text::ROOT_LONG_ABOUT,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Change to DIRECTORY before doing anything
    #[arg(short = 'C', value_name = "DIRECTORY", global = true)]
    pub directory: Option<PathBuf>,

    /// Baseline file to read and write
    #[arg(
        long,
        value_name = "PATH",
        default_value = DEFAULT_BASELINE_FILENAME,
        global = true
    )]
    pub db: PathBuf,

    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase log verbosity (-v for info, -vv for debug). Takes precedence over RUST_LOG."
    )]
    pub verbose: u8,

    #[arg(
        long,
        value_name = "LEVEL",
        global = true,
        conflicts_with = "verbose",
        help = "Set the log level explicitly. Takes precedence over RUST_LOG."
    )]
    pub log_level: Option<LogLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add files or directories to monitoring
    #[command(long_about = help_text::ADD_LONG_ABOUT)]
    Add {
        /// Files or directories to monitor
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },

    /// Check integrity of all monitored files
    #[command(long_about = help_text::CHECK_LONG_ABOUT)]
    Check {
        /// Also list files that are intact
        #[arg(long)]
        all: bool,

        /// Exit with status 1 if any file is modified, deleted or unreadable
        #[arg(long)]
        exit_code: bool,
    },

    /// List all monitored files
    List,

    /// Remove files from monitoring
    Remove {
        /// Files to stop monitoring
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },

    /// Update baseline for files (all monitored files if none are given)
    #[command(long_about = help_text::UPDATE_LONG_ABOUT)]
    Update {
        /// Files to re-baseline
        #[arg(value_name = "PATH")]
        paths: Vec<PathBuf>,
    },
}

impl Cli {
    pub fn try_parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}
