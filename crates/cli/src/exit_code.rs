//! Process exit codes
//!
//! Scripts only need to tell success from failure, so every failure
//! (bad input, download, configuration, upload, unready `--check`) maps to 1.

/// Exit status of one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Upload finished, dry run listed files, or configuration is ready
    Success = 0,
    /// Anything else
    GeneralError = 1,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn from_ready(ready: bool) -> Self {
        if ready {
            ExitCode::Success
        } else {
            ExitCode::GeneralError
        }
    }
}
