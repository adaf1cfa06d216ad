//! careerlens - match a free-text profile against competencies and jobs.

use std::process::ExitCode;

use careerlens_cli::{Cli, UsageError, logging};
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // A missing .env is fine; the credential may come from the environment.
    let _ = dotenvy::dotenv();
    logging::init(cli.verbose);

    match careerlens_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.downcast_ref::<UsageError>().is_some() => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
