use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "compass",
    version,
    about = "Compliance assessment scoring and vendor matching CLI"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score an assessment against its template and derive gaps and risks
    Score(ScoreCommand),
    /// Rank a vendor catalog against an organization's posture
    Match(MatchCommand),
    /// Check template files for authoring defects
    Lint(LintCommand),
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Template JSON file
    pub template: PathBuf,
    /// Assessment JSON file with the answer set
    pub answers: PathBuf,
    /// Organization profile JSON, for context-sensitive rules
    #[arg(long)]
    pub org: Option<PathBuf>,
    /// Policy TOML overriding the built-in thresholds
    #[arg(long)]
    pub policy: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct MatchCommand {
    /// Vendor catalog JSON file
    pub vendors: PathBuf,
    /// Organization profile JSON
    #[arg(long)]
    pub org: PathBuf,
    /// Open gaps JSON, typically produced by `score`
    #[arg(long)]
    pub gaps: Option<PathBuf>,
    /// Policy TOML overriding the built-in thresholds
    #[arg(long)]
    pub policy: Option<PathBuf>,
    /// Keep only the N best matches
    #[arg(long)]
    pub top_n: Option<usize>,
    /// Drop matches scoring below this total
    #[arg(long)]
    pub min_score: Option<f32>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct LintCommand {
    /// A template file, or a directory of template JSON files
    pub path: PathBuf,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
