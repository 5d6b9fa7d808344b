pub mod cli;
pub mod clipboard;
pub mod color;
pub mod config;
pub mod datetime;
pub mod error;
pub mod file_convert;
pub mod generator;
pub mod geometry;
pub mod imaging;
pub mod json_format;
pub mod logging;
pub mod notification;
pub mod pomodoro;
pub mod regex_check;
pub mod storage;
pub use error::{AppError, AppResult, ErrorKind};

use cli::{Cli, Runner};
use clipboard::WlCopyBackend;

/// Entrypoint used by the binary: runs one parsed command and prints its
/// result.
pub fn run(cli: Cli) -> AppResult<()> {
    logging::init(cli.verbose);
    tracing::debug!("starting toolhub");

    let runner = Runner::new(config::load_app_config(), WlCopyBackend);
    let output = runner.execute(&cli).inspect_err(|err| {
        tracing::debug!(kind = %err.kind(), "command failed");
    })?;
    println!("{}", output.text);
    Ok(())
}
