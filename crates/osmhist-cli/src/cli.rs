use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// osmhist - OSM history for land-use raster extents
#[derive(Parser, Debug)]
#[command(name = "osmhist")]
#[command(about = "Fetch OSM history for the extent of land-use rasters", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve raster extents and download every filter's history
    Fetch(FetchArgs),

    /// Resolve raster extents and print the bounding boxes
    Extents(ConfigArgs),

    /// Show runtime settings and where each value came from
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Path to the YAML configuration file
    #[arg(long, short = 'c', default_value = "config.yaml")]
    pub config: PathBuf,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Directory the GeoJSON files are written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// History API endpoint URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Log file, overwritten on every run
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Bounding box to query (defaults to bbox_1_name)
    #[arg(long)]
    pub bbox: Option<String>,

    /// Build and print the requests without sending them
    #[arg(long)]
    pub dry_run: bool,
}
