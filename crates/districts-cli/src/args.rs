use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for districts-cli
#[derive(Debug, Parser)]
#[command(
    name = "districts",
    version,
    about = "Inspect district features and contacts, and replay map sessions"
)]
pub struct CliArgs {
    /// JSON map config; missing values keep their defaults
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// GeoJSON feature collection (.geojson or .geojson.gz)
    #[arg(short = 'f', long = "features", global = true)]
    pub features: Option<PathBuf>,

    /// Contact spreadsheet export (.csv or .csv.gz)
    #[arg(short = 'k', long = "contacts", global = true)]
    pub contacts: Option<PathBuf>,

    /// Download features from the configured service instead of reading a file.
    /// A `--contacts` value starting with http(s):// is downloaded too.
    #[arg(long = "fetch", global = true)]
    pub fetch: bool,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List district features: id and cleaned name
    Features,

    /// List contact rows
    Contacts,

    /// Show which contact row a polygon name resolves to
    Match {
        /// Polygon name, e.g. "Ely Public School District"
        name: String,
    },

    /// Match every feature against the contacts and print totals
    Report {
        /// Only list districts with this outcome (exact, fuzzy, none)
        #[arg(long)]
        only: Option<String>,
    },

    /// Search districts by name, contact or phone
    Search {
        /// Case-insensitive substring
        query: String,
    },

    /// Run a JSON list of session steps and print the resulting map state
    Replay {
        /// Script file
        script: PathBuf,
    },
}
