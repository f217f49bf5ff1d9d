//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "advisor")]
#[command(author, version, about = "Hybrid technical-signal and AI-judgment stock advisor")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a symbol and print the recommendation
    Analyze(AnalyzeArgs),
    /// List available strategies
    Strategies,
}

#[derive(clap::Args)]
pub struct AnalyzeArgs {
    /// Symbol name or exchange code (e.g. "005930" or a listed name)
    pub symbol: String,

    /// Strategy to evaluate (defaults to the configured one)
    #[arg(short, long)]
    pub strategy: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}
