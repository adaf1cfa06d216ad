//! CareerLens command-line front end.
//!
//! The binary is a thin shell over [`app::run`]; everything it does is
//! reachable from this library so it can be tested without spawning a process.

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod output;

pub use app::{AnalyzeReport, NarrativeOutcome, UsageError, analyze, attach_narratives, run};
pub use cli::{AnalyzeArgs, Cli, Commands};
pub use config::{CareerLensConfig, CatalogSection};
