//! Output handling
//!
//! Results go to stdout as JSON or bare URLs; errors and status notes go to
//! stderr.

mod formatter;

pub use formatter::Formatter;

/// Output settings taken from the command line
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Print only URLs on success and a one-line error on failure
    pub quiet: bool,
    /// Disable colored status markers
    pub no_color: bool,
}

impl OutputConfig {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            no_color: !console::colors_enabled_stderr(),
        }
    }
}
