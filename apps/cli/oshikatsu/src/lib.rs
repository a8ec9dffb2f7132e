// Library exports for testing
// The binary (main.rs) imports these as well

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod logger;
pub mod render;

#[cfg(test)]
mod tests;

pub use commands::Outcome;
pub use context::AppContext;

use cli::{Cli, Command, GroupsCommand};
use commands::groups::ListFormat;
use error::OshikatsuError;

use std::io::Write;
use std::path::PathBuf;

use log::info;

const APP_DIR_NAME: &str = "oshikatsu";
const LOG_DIR_NAME: &str = "logs";

/// `<data_local_dir>/oshikatsu/logs`, or the temp directory when the platform has none.
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join(LOG_DIR_NAME)
}

/// Dispatch one command against an already built context.
pub async fn execute(
    ctx: &AppContext,
    command: &Command,
    json: bool,
    out: &mut impl Write,
) -> Result<Outcome, OshikatsuError> {
    let format = ListFormat { json };

    match command {
        Command::Login(args) => commands::auth::login(ctx, args, out).await,
        Command::Register(args) => commands::auth::register(ctx, args, out).await,
        Command::Logout => commands::auth::logout(ctx, out),
        Command::Dashboard => commands::dashboard::show(ctx, out),
        Command::Members => commands::members::show(ctx, out),
        Command::Groups(GroupsCommand::Search(args)) => {
            commands::groups::search(ctx, args, format, out).await
        }
        Command::Groups(GroupsCommand::Create { search, fields }) => {
            commands::groups::create(ctx, search, fields, format, out).await
        }
        Command::Groups(GroupsCommand::Edit { id, search, fields }) => {
            commands::groups::edit(ctx, *id, search, fields, format, out).await
        }
    }
}

/// Initialize logging, load the context, run the command against stdout.
pub async fn run(cli: Cli) -> Result<Outcome, OshikatsuError> {
    let log_dir = cli.log_dir.clone().unwrap_or_else(default_log_dir);
    logger::initialize(&log_dir, cli.verbose)?;

    info!("oshikatsu {} starting", env!("CARGO_PKG_VERSION"));
    info!("Log directory: {}", log_dir.display());

    let ctx = AppContext::load(cli.config_dir.as_deref())?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let outcome = execute(&ctx, &cli.command, cli.json, &mut out).await?;
    out.flush()?;

    info!("Command finished: {:?}", outcome);
    Ok(outcome)
}
