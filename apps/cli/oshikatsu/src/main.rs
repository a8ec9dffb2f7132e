use oshikatsu::Outcome;
use oshikatsu::cli::Cli;

use std::process::ExitCode;

use clap::Parser;
use log::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    match oshikatsu::run(cli).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            error!("{e}");
            match serde_json::to_string(&e) {
                Ok(report) if json => eprintln!("{report}"),
                _ => eprintln!("{e}"),
            }
            ExitCode::from(Outcome::FAILURE_CODE)
        }
    }
}
