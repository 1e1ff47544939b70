use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sitescore",
    version,
    about = "Research-site evaluation scoring and tier classification CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Scoring config to use instead of ./sitescore.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one evaluation sheet
    Score(ScoreCommand),
    /// Classify a bare score against a band table
    Classify(ClassifyCommand),
    /// Rank every site found under a directory
    Benchmark(BenchmarkCommand),
    /// Show score dynamics for one site
    Trend(TrendCommand),
    /// Check a sheet against the criteria without scoring it
    Validate(ValidateCommand),
    /// List the available band tables
    Tables,
}

#[derive(Args)]
pub struct ScoreCommand {
    pub sheet: PathBuf,
    #[arg(long)]
    pub criteria: PathBuf,
    /// Band table to classify with; repeat for several views
    #[arg(short, long = "table", value_name = "NAME")]
    pub tables: Vec<String>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ClassifyCommand {
    #[arg(allow_negative_numbers = true)]
    pub score: f64,
    #[arg(short, long, default_value = "approval")]
    pub table: String,
}

#[derive(Args)]
pub struct BenchmarkCommand {
    pub dir: PathBuf,
    #[arg(long)]
    pub criteria: PathBuf,
    #[arg(short, long, default_value = "approval")]
    pub table: String,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct TrendCommand {
    pub dir: PathBuf,
    #[arg(long)]
    pub criteria: PathBuf,
    #[arg(long)]
    pub site: String,
    #[arg(short, long, default_value = "approval")]
    pub table: String,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ValidateCommand {
    pub sheet: PathBuf,
    #[arg(long)]
    pub criteria: PathBuf,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
