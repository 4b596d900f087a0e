use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use uuid::Uuid;
use whenmeet_core::{aggregate::DISPLAY_HOURS, models::TimeSlot};

/// Command-line client for a local whenmeet store.
///
/// Slots are written as `YYYY-MM-DD@HOUR`, e.g. `2024-03-01@14`.
#[derive(Debug, Parser)]
#[command(name = "whenmeet", about = "Find a time when everyone can meet", long_about = None)]
pub struct Cli {
    /// Store file to use instead of `WHENMEET_STORE`
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Print machine-readable JSON where supported
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a meeting over a set of candidate dates
    Create {
        title: String,
        /// Candidate date (repeatable)
        #[arg(long = "date", required = true)]
        dates: Vec<NaiveDate>,
    },
    /// Replace your vote with exactly the given slots
    Vote {
        id: Uuid,
        /// Participant name; defaults to the remembered identity
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "slot")]
        slots: Vec<TimeSlot>,
    },
    /// Flip individual slots of your current vote and resubmit it
    Toggle {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "slot", required = true)]
        slots: Vec<TimeSlot>,
    },
    /// Show the availability heat-map
    Show {
        id: Uuid,
        /// Whose cells to mark; defaults to the remembered identity
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value_t = *DISPLAY_HOURS.start())]
        from_hour: u8,
        #[arg(long, default_value_t = *DISPLAY_HOURS.end())]
        to_hour: u8,
    },
    /// List the most popular slots
    Top {
        id: Uuid,
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
    /// Print the name this device votes under
    Whoami,
}
