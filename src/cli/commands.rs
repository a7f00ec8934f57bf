use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tl", about = concat!("taskline v", env!("CARGO_PKG_VERSION"), " - a small terminal task list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (default: $TASKLINE_DATA_DIR, else the platform data dir)
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Task file, relative to the data directory unless absolute
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print tasks grouped by status
    List(ListArgs),
    /// Show task counts per status
    Stats(StatsArgs),
    /// Print the resolved task file path
    Path,
}

#[derive(Args)]
pub struct ListArgs {
    /// Filter by status (active, done, deleted, all)
    #[arg(long, default_value = "all")]
    pub status: String,
    /// Filter by exact priority
    #[arg(long)]
    pub priority: Option<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct StatsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
