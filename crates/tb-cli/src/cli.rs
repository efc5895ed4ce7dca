//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveTime;
use clap::{Parser, Subcommand};

use crate::commands::now::parse_clock_time;

/// Time-block finder for NotePlan-style notes.
///
/// Recognizes time blocks such as `2:30-3:45`, `at 5pm` or `2-3PM` in note
/// lines and finds the block that covers the current time.
#[derive(Debug, Parser)]
#[command(name = "tb", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check whether a line contains a time block.
    Check {
        /// The line to check.
        text: String,

        /// Text the line must contain (overrides the configured preference).
        #[arg(long)]
        must_contain: Option<String>,

        /// Use the theme grammar, which needs a list, heading or task marker.
        #[arg(long, conflicts_with = "must_contain")]
        themes: bool,
    },

    /// Print the time block found in a line.
    Extract {
        /// The line to read.
        text: String,

        /// Output as JSON, with the parsed start and end times.
        #[arg(long)]
        json: bool,
    },

    /// List every time block in note files or directories.
    Scan {
        /// Note files, or directories searched for `.md` and `.txt` files.
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Text a line must contain (overrides the configured preference).
        #[arg(long)]
        must_contain: Option<String>,

        /// Output as JSON lines.
        #[arg(long)]
        json: bool,
    },

    /// Show the time block in a note that covers the current time.
    Now {
        /// The note file.
        path: PathBuf,

        /// Use this time (HH:MM) instead of the clock.
        #[arg(long, value_parser = parse_clock_time)]
        at: Option<NaiveTime>,

        /// Skip completed and cancelled lines.
        #[arg(long)]
        exclude_closed: bool,

        /// Print only the block and the remaining task text, tab-separated.
        /// Completed and cancelled lines are always skipped here.
        #[arg(long)]
        details: bool,

        /// Text a line must contain (overrides the configured preference).
        #[arg(long)]
        must_contain: Option<String>,
    },

    /// Print the time-block regular expression.
    Pattern {
        /// Print the theme pattern instead of the app pattern.
        #[arg(long)]
        themes: bool,
    },
}
