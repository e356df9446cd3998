use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "station-stats")]
#[command(about = "Streaming station temperature queries and stack-safe flattening")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        help = "Settings file (TOML, JSON or YAML); STATION_STATS_* variables override it"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Hide the progress spinner")]
    pub no_progress: bool,
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    #[arg(short, long, help = "Readings CSV file (station_id, date, temperature)")]
    pub input: PathBuf,

    #[arg(long, help = "Stop after this many rows")]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DateArgs {
    #[arg(
        long,
        requires = "end",
        allow_negative_numbers = true,
        help = "First date to include (inclusive)"
    )]
    pub start: Option<f64>,

    #[arg(
        long,
        requires = "start",
        allow_negative_numbers = true,
        help = "Last date to include (inclusive)"
    )]
    pub end: Option<f64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Station with the coldest single reading
    Coldest {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Station with the largest total temperature fluctuation
    Fluctuation {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        dates: DateArgs,
    },

    /// Answer every station query in a single pass
    Report {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        dates: DateArgs,

        #[arg(long, help = "Print the report as JSON")]
        json: bool,
    },

    /// Flatten a nested JSON array into a flat one
    ///
    /// Documents nested deeper than 128 arrays or objects are rejected by the
    /// JSON parser before flattening starts.
    Flatten {
        #[arg(short, long, help = "Input JSON file")]
        input: PathBuf,

        #[arg(short, long, help = "Output JSON file [default: stdout]")]
        output: Option<PathBuf>,
    },
}
