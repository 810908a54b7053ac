//! Command-line definition and dispatch
//!
//! file-share has no subcommands: the positional arguments are uploaded
//! unless `--version` or `--check` asks for something else.

use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod check;
mod upload;

pub use upload::UploadArgs;

/// Upload files to OSS and get shareable URLs
#[derive(Parser, Debug)]
#[command(name = "file-share")]
#[command(author, about, long_about = None)]
#[command(disable_version_flag = true)]
#[command(after_help = "Configuration (priority low to high):
  1. ~/.file-share.env
  2. .env next to the installed binary
  3. .env in the current directory
  4. Environment variables (OSS_ACCESS_KEY_ID, OSS_ACCESS_KEY_SECRET,
     OSS_BUCKET_NAME, OSS_ENDPOINT, OSS_DOMAIN, OSS_PREFIX)")]
pub struct Cli {
    /// Files, glob patterns, directories or URLs to upload
    pub files: Vec<String>,

    /// Check configuration and exit
    #[arg(long)]
    pub check: bool,

    /// Show version
    #[arg(long)]
    pub version: bool,

    /// Quiet mode, only output URLs
    #[arg(short, long)]
    pub quiet: bool,

    /// Use this config file instead of the default locations
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub upload: UploadArgs,
}

/// Execute the CLI invocation and return the exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let output_config = OutputConfig::new(cli.quiet);

    if cli.version {
        Formatter::new(output_config).version();
        return ExitCode::Success;
    }

    if cli.check {
        return check::execute(cli.config, output_config);
    }

    if cli.files.is_empty() {
        eprintln!("{}", Cli::command().render_help());
        return ExitCode::GeneralError;
    }

    upload::execute(cli.files, cli.upload, cli.config, output_config).await
}
