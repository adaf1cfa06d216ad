//! Command-line arguments.

use std::path::PathBuf;

use careerlens_embeddings::ProviderKind;
use clap::{ArgAction, Args, Parser, Subcommand};

/// careerlens - match a free-text profile against a catalog of competencies and jobs
#[derive(Parser, Debug)]
#[command(name = "careerlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to ./careerlens.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory holding competencies.json and jobs.json
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Embedding provider: fastembed or hashing
    #[arg(long, global = true, value_name = "PROVIDER")]
    pub embedder: Option<ProviderKind>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank competencies and jobs for a profile
    #[command(alias = "a")]
    Analyze(AnalyzeArgs),

    /// Load, validate and list the catalog
    Catalog {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Profile text (read from --file or stdin when omitted)
    pub text: Option<String>,

    /// Read the profile text from a file
    #[arg(short, long, value_name = "PATH", conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Number of competencies to show
    #[arg(long, value_name = "N")]
    pub top_competencies: Option<usize>,

    /// Number of jobs to show
    #[arg(long, value_name = "N")]
    pub top_jobs: Option<usize>,

    /// Generate a personalised learning plan
    #[arg(long)]
    pub plan: bool,

    /// Generate a short professional bio
    #[arg(long)]
    pub bio: bool,

    /// Print the analysis as JSON
    #[arg(long)]
    pub json: bool,
}
