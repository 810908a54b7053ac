//! Upload files, directories and URLs
//!
//! Collects the inputs, uploads them separately or as one zip archive and
//! prints the public URLs.

use std::path::PathBuf;

use clap::Args;
use fshare_core::{Config, ConfigResolver, Outcome, UploadOptions, UrlFetcher};
use fshare_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Upload options
#[derive(Args, Debug, Default)]
pub struct UploadArgs {
    /// Bundle all files into one zip archive before uploading
    #[arg(long)]
    pub zip: bool,

    /// Archive file name (auto-generated by default)
    #[arg(long, value_name = "NAME")]
    pub zip_name: Option<String>,

    /// Key prefix, overrides OSS_PREFIX
    #[arg(long, value_name = "PATH")]
    pub prefix: Option<String>,

    /// Don't add a timestamp suffix to object keys
    #[arg(long)]
    pub no_timestamp: bool,

    /// Upload directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Keep directory structure inside the zip archive
    #[arg(long)]
    pub preserve_path: bool,

    /// Only list the files that would be uploaded
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

impl UploadArgs {
    fn into_options(self, inputs: Vec<String>) -> UploadOptions {
        UploadOptions {
            inputs,
            zip: self.zip,
            zip_name: self.zip_name,
            prefix: self.prefix,
            no_timestamp: self.no_timestamp,
            recursive: self.recursive,
            preserve_path: self.preserve_path,
            dry_run: self.dry_run,
        }
    }
}

/// Execute the upload
pub async fn execute(
    files: Vec<String>,
    args: UploadArgs,
    config_path: Option<PathBuf>,
    output_config: OutputConfig,
) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let mut fetcher = match UrlFetcher::new() {
        Ok(f) => f,
        Err(e) => {
            formatter.report_error(&e.to_string());
            return ExitCode::GeneralError;
        }
    };
    if !formatter.is_quiet() {
        let notifier = formatter.clone();
        fetcher = fetcher.on_download(move |url| notifier.downloading(url));
    }

    let resolver = ConfigResolver::from_environment(config_path);
    let options = args.into_options(files);

    let outcome = fshare_core::run(options, &resolver, &fetcher, |config: &Config| {
        S3Client::new(config.clone())
    })
    .await;

    match outcome {
        Ok(Outcome::DryRun(preview)) => {
            formatter.preview(&preview);
            ExitCode::Success
        }
        Ok(Outcome::Uploaded(result)) => {
            formatter.report(&result);
            ExitCode::Success
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Upload failed");
            formatter.report_error(&e.to_string());
            ExitCode::GeneralError
        }
    }
}
