//! file-share - upload files to OSS and get shareable URLs
//!
//! Uploads local files, glob matches, directories or remote URLs to an
//! S3-compatible OSS bucket, optionally bundled into one zip archive.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod commands;
mod exit_code;
mod output;

use commands::Cli;
use exit_code::ExitCode;

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays a clean JSON/URL payload
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    // Usage errors exit with 1 like every other failure
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if let Err(io_err) = e.print() {
                tracing::warn!(error = %io_err, "Failed to print usage");
            }
            let code = if e.use_stderr() {
                ExitCode::GeneralError
            } else {
                ExitCode::Success
            };
            std::process::exit(code.as_i32());
        }
    };
    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
