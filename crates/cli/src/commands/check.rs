//! check command - Report whether the configuration is complete
//!
//! Prints which keys were found and where, without ever printing values.

use std::path::PathBuf;

use fshare_core::ConfigResolver;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

/// Execute the configuration check
pub fn execute(config_path: Option<PathBuf>, output_config: OutputConfig) -> ExitCode {
    let formatter = Formatter::new(output_config);

    let check = ConfigResolver::from_environment(config_path).check();
    tracing::debug!(ready = check.ready, missing = ?check.missing, "Checked configuration");

    formatter.check(&check);
    ExitCode::from_ready(check.ready)
}
