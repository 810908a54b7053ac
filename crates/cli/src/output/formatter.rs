//! Output formatter for upload results, previews and configuration checks
//!
//! Verbose mode prints pretty JSON documents; quiet mode prints only the
//! public URLs so the output can be piped straight into other tools.

use console::Style;
use fshare_core::{ConfigCheck, DryRunPreview, UploadResult};
use serde::Serialize;

use super::OutputConfig;

/// Color theme for status markers on stderr
#[derive(Debug, Clone)]
pub struct Theme {
    /// Success markers - green
    pub success: Style,
    /// Error markers - red
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            success: Style::new().green(),
            error: Style::new().red(),
        }
    }
}

impl Theme {
    /// Returns a theme with no styling (for no-color mode)
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            error: Style::new(),
        }
    }
}

/// Success document: `{"success": true, "mode": ..., ...}`
#[derive(Serialize)]
struct SuccessDocument<'a> {
    success: bool,
    #[serde(flatten)]
    result: &'a UploadResult,
}

#[derive(Serialize)]
struct ErrorDocument<'a> {
    success: bool,
    error: &'a str,
}

/// Formatter for CLI output
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
    theme: Theme,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        let theme = if config.no_color {
            Theme::plain()
        } else {
            Theme::default()
        };
        Self { config, theme }
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    // ========== Rendering ==========

    /// Text printed on stdout for a successful upload
    pub fn render_result(&self, result: &UploadResult) -> String {
        if self.is_quiet() {
            return result.urls().join("\n");
        }

        to_pretty_json(&SuccessDocument {
            success: true,
            result,
        })
    }

    /// Text printed on stderr for a failed run
    pub fn render_error(&self, message: &str) -> String {
        if self.is_quiet() {
            return format!("Error: {message}");
        }

        to_pretty_json(&ErrorDocument {
            success: false,
            error: message,
        })
    }

    /// Dry-run listing
    pub fn render_preview(&self, preview: &DryRunPreview) -> String {
        let mut lines = vec![format!("Will upload {} files:", preview.files.len())];
        for entry in &preview.files {
            if entry.from_url {
                lines.push(format!("  {} (from URL)", entry.name));
            } else {
                lines.push(format!("  {}", entry.name));
            }
        }

        if let Some(name) = &preview.zip_name {
            lines.push(String::new());
            lines.push(format!("Zip mode: will bundle as {name}"));
        }

        lines.join("\n")
    }

    /// Progress line for a URL download
    pub fn render_downloading(&self, url: &str) -> String {
        format!("Downloading: {url}")
    }

    // ========== Output methods ==========

    /// Report a successful upload on stdout
    pub fn report(&self, result: &UploadResult) {
        let text = self.render_result(result);
        if !text.is_empty() {
            println!("{text}");
        }
    }

    /// Report a failure on stderr
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn report_error(&self, message: &str) {
        eprintln!("{}", self.render_error(message));
    }

    /// Announce a URL download on stderr, silent in quiet mode
    pub fn downloading(&self, url: &str) {
        if !self.is_quiet() {
            eprintln!("{}", self.render_downloading(url));
        }
    }

    /// Print the dry-run listing on stdout
    pub fn preview(&self, preview: &DryRunPreview) {
        println!("{}", self.render_preview(preview));
    }

    /// Print the configuration report on stdout and its verdict on stderr
    pub fn check(&self, check: &ConfigCheck) {
        println!("{}", to_pretty_json(check));

        if check.ready {
            let mark = self.theme.success.apply_to("✓");
            eprintln!("\n{mark} Ready to upload");
        } else {
            let mark = self.theme.error.apply_to("✗");
            eprintln!("\n{mark} Not ready, please configure as suggested");
        }
    }

    /// Print the version line
    pub fn version(&self) {
        println!("file-share version {}", env!("CARGO_PKG_VERSION"));
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"success\": false, \"error\": \"Error serializing output: {e}\"}}"))
}
