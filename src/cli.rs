use crate::config::ExportFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "who5",
    version,
    about = "WHO-5 well-being questionnaire for the terminal"
)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Answer the questionnaire interactively
    Take(TakeArgs),
    /// Score five ratings given on the command line (`-` leaves one unanswered)
    Score(ScoreArgs),
    /// Print the five statements and the rating scale
    Questions(OutputArgs),
    /// Print the active score bands
    Bands(OutputArgs),
    /// Write a default who5.toml in the current directory
    Init,
}

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    /// Write the result document to this file after scoring
    #[arg(long)]
    pub export: Option<PathBuf>,
    /// Document format; defaults to the file extension, then the config
    #[arg(long, value_parser = parse_export_format)]
    pub format: Option<ExportFormat>,
}

#[derive(Debug, Args, Clone)]
pub struct TakeArgs {
    #[command(flatten)]
    pub output: OutputArgs,
    #[command(flatten)]
    pub export: ExportArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    #[arg(value_name = "RATING", required = true)]
    pub ratings: Vec<String>,
    #[command(flatten)]
    pub output: OutputArgs,
    #[command(flatten)]
    pub export: ExportArgs,
}

pub fn parse_export_format(value: &str) -> Result<ExportFormat, String> {
    ExportFormat::parse(value)
        .ok_or_else(|| format!("unknown format '{value}' (expected markdown, text or json)"))
}
