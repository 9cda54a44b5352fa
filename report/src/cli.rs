use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;
use tsbench_ingest::DEFAULT_INPUT_GLOB;

/// Inputs shared by both binaries
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Benchmark JSON files, directories are searched recursively
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Pattern for file names picked up inside directories
    #[arg(long, default_value = DEFAULT_INPUT_GLOB)]
    pub glob: String,

    /// More output, repeat for trace level
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

/// Generate a Markdown speedup report from benchmark result files
#[derive(Parser, Debug, Clone)]
#[command(name = "speedup-report", version)]
pub struct ReportCli {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file for the report
    #[arg(short = 'o', long, default_value = "speedup_report.md")]
    pub output: PathBuf,
}

/// Draw one bar chart per query from benchmark result files
#[derive(Parser, Debug, Clone)]
#[command(name = "query-plots", version)]
pub struct PlotsCli {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory receiving the charts
    #[arg(short = 'o', long, default_value = "query_plots")]
    pub output: PathBuf,

    /// YAML file with palette and chart settings
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,
}
