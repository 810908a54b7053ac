//! Configuration resolution
//!
//! Settings are layered from `.env`-style files and the process environment.
//! From lowest to highest priority: `~/.file-share.env`, `.env` next to the
//! installed binary, `.env` in the working directory, then `OSS_*` environment
//! variables. A custom config file replaces the three file layers but is
//! still overridden by the environment.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};

pub const ACCESS_KEY_ID: &str = "OSS_ACCESS_KEY_ID";
pub const ACCESS_KEY_SECRET: &str = "OSS_ACCESS_KEY_SECRET";
pub const BUCKET_NAME: &str = "OSS_BUCKET_NAME";
pub const ENDPOINT: &str = "OSS_ENDPOINT";
pub const DOMAIN: &str = "OSS_DOMAIN";
pub const PREFIX: &str = "OSS_PREFIX";

/// Keys that must be present and non-empty before any upload
pub const REQUIRED_KEYS: [&str; 4] = [ACCESS_KEY_ID, ACCESS_KEY_SECRET, BUCKET_NAME, ENDPOINT];

/// Keys that refine URLs and object keys when present
pub const OPTIONAL_KEYS: [&str; 2] = [DOMAIN, PREFIX];

/// Per-user configuration file, relative to the home directory
pub const HOME_CONFIG_FILE: &str = ".file-share.env";

/// Configuration file looked up in the install and working directories
pub const LOCAL_CONFIG_FILE: &str = ".env";

type Settings = BTreeMap<String, String>;

/// Parse `KEY=VALUE` lines, skipping blanks and `#` comments
pub fn parse_env_file(content: &str) -> BTreeMap<String, String> {
    let mut settings = Settings::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            settings.insert(key.trim().to_string(), value.to_string());
        }
    }

    settings
}

fn read_env_file(path: &Path) -> io::Result<Settings> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_env_file(&content))
}

/// Where a configuration layer came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Home(PathBuf),
    Install(PathBuf),
    WorkingDir(PathBuf),
    Custom(PathBuf),
    Environment,
}

impl ConfigSource {
    /// File backing this source, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Home(p)
            | ConfigSource::Install(p)
            | ConfigSource::WorkingDir(p)
            | ConfigSource::Custom(p) => Some(p),
            ConfigSource::Environment => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Home(p) | ConfigSource::Install(p) | ConfigSource::Custom(p) => {
                write!(f, "{}", p.display())
            }
            ConfigSource::WorkingDir(_) => write!(f, ".env (current dir)"),
            ConfigSource::Environment => write!(f, "environment variables"),
        }
    }
}

/// Validated storage configuration
///
/// Built once per invocation and passed by reference to whatever needs it.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub access_key_id: String,
    pub access_key_secret: String,
    pub bucket_name: String,
    pub endpoint: String,
    pub domain: Option<String>,
    pub prefix: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &self.access_key_id)
            .field("access_key_secret", &"***")
            .field("bucket_name", &self.bucket_name)
            .field("endpoint", &self.endpoint)
            .field("domain", &self.domain)
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl Config {
    /// Build a config from merged settings, reporting every missing key at once
    pub fn from_settings(settings: &BTreeMap<String, String>) -> Result<Self> {
        let value = |key: &str| {
            settings
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let missing: Vec<&'static str> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|&key| value(key).is_none())
            .collect();

        if !missing.is_empty() {
            return Err(Error::MissingConfig(missing));
        }

        Ok(Self {
            access_key_id: value(ACCESS_KEY_ID).unwrap_or_default(),
            access_key_secret: value(ACCESS_KEY_SECRET).unwrap_or_default(),
            bucket_name: value(BUCKET_NAME).unwrap_or_default(),
            endpoint: value(ENDPOINT).unwrap_or_default(),
            domain: value(DOMAIN),
            prefix: value(PREFIX),
        })
    }

    /// Public URL of an uploaded object
    pub fn public_url(&self, key: &str) -> String {
        if let Some(domain) = self.domain.as_deref() {
            let domain = domain.trim_end_matches('/');
            if domain.starts_with("http://") || domain.starts_with("https://") {
                return format!("{domain}/{key}");
            }
            return format!("https://{domain}/{key}");
        }

        let (scheme, host) = split_scheme(&self.endpoint);
        format!(
            "{scheme}://{}.{}/{key}",
            self.bucket_name,
            host.trim_end_matches('/')
        )
    }
}

/// Split an endpoint into its scheme (default `https`) and the remainder
pub fn split_scheme(endpoint: &str) -> (&str, &str) {
    if let Some(rest) = endpoint.strip_prefix("http://") {
        ("http", rest)
    } else if let Some(rest) = endpoint.strip_prefix("https://") {
        ("https", rest)
    } else {
        ("https", endpoint)
    }
}

/// Diagnostic report for `--check`
///
/// Only presence flags are reported, never values.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigCheck {
    pub ready: bool,
    pub env_vars: BTreeMap<String, bool>,
    pub optional_vars: BTreeMap<String, bool>,
    pub missing: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_source: Option<String>,
}

fn short_name(key: &str) -> String {
    key.trim_start_matches("OSS_").to_lowercase()
}

/// Merges configuration layers by priority
#[derive(Clone, Default)]
pub struct ConfigResolver {
    home_dir: Option<PathBuf>,
    install_dir: Option<PathBuf>,
    working_dir: Option<PathBuf>,
    custom_path: Option<PathBuf>,
    env: Settings,
}

impl ConfigResolver {
    /// A resolver with no sources; use the builder methods to add them
    pub fn new() -> Self {
        Self::default()
    }

    /// A resolver over the real home, install and working directories and
    /// the current process environment
    pub fn from_environment(custom_path: Option<PathBuf>) -> Self {
        let env = REQUIRED_KEYS
            .iter()
            .chain(OPTIONAL_KEYS.iter())
            .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
            .collect();

        Self {
            home_dir: dirs::home_dir(),
            install_dir: install_dir(),
            working_dir: std::env::current_dir().ok(),
            custom_path,
            env,
        }
    }

    pub fn home_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.home_dir = Some(dir.into());
        self
    }

    pub fn install_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.install_dir = Some(dir.into());
        self
    }

    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn custom_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.custom_path = Some(path.into());
        self
    }

    pub fn env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    fn file_candidates(&self) -> Vec<ConfigSource> {
        if let Some(path) = &self.custom_path {
            return vec![ConfigSource::Custom(path.clone())];
        }

        let mut candidates = Vec::new();
        if let Some(dir) = &self.home_dir {
            candidates.push(ConfigSource::Home(dir.join(HOME_CONFIG_FILE)));
        }
        if let Some(dir) = &self.install_dir {
            candidates.push(ConfigSource::Install(dir.join(LOCAL_CONFIG_FILE)));
        }
        if let Some(dir) = &self.working_dir {
            candidates.push(ConfigSource::WorkingDir(dir.join(LOCAL_CONFIG_FILE)));
        }
        candidates
    }

    /// Sources that are actually present, lowest priority first
    pub fn sources(&self) -> Vec<ConfigSource> {
        let mut found: Vec<ConfigSource> = self
            .file_candidates()
            .into_iter()
            .filter(|source| source.path().is_some_and(Path::is_file))
            .collect();

        if self.env.values().any(|v| !v.is_empty()) {
            found.push(ConfigSource::Environment);
        }
        found
    }

    /// Merge every layer into one settings map
    pub fn merged(&self) -> Result<BTreeMap<String, String>> {
        let mut settings = Settings::new();

        if let Some(path) = &self.custom_path {
            let custom = read_env_file(path).map_err(|e| {
                Error::Config(format!("Cannot read config file: {}: {e}", path.display()))
            })?;
            if custom.is_empty() {
                return Err(Error::Config(format!(
                    "Cannot read config file: {}",
                    path.display()
                )));
            }
            settings = custom;
        } else {
            for source in self.file_candidates() {
                let Some(path) = source.path() else {
                    continue;
                };
                match read_env_file(path) {
                    Ok(layer) => {
                        tracing::debug!(source = %source, keys = layer.len(), "Loaded config file");
                        settings.extend(layer);
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable config file");
                    }
                }
            }
        }

        for (key, value) in &self.env {
            if !value.is_empty() {
                settings.insert(key.clone(), value.clone());
            }
        }

        Ok(settings)
    }

    /// Resolve and validate the configuration
    pub fn resolve(&self) -> Result<Config> {
        Config::from_settings(&self.merged()?)
    }

    /// Report which keys and sources are available
    pub fn check(&self) -> ConfigCheck {
        let mut suggestions = Vec::new();
        let settings = match self.merged() {
            Ok(settings) => settings,
            Err(e) => {
                suggestions.push(e.to_string());
                Settings::new()
            }
        };

        let present = |key: &str| settings.get(key).is_some_and(|v| !v.trim().is_empty());

        let env_vars = REQUIRED_KEYS
            .iter()
            .map(|&key| (short_name(key), present(key)))
            .collect();
        let optional_vars = OPTIONAL_KEYS
            .iter()
            .map(|&key| (short_name(key), present(key)))
            .collect();
        let missing: Vec<String> = REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|&key| !present(key))
            .map(short_name)
            .collect();

        let sources = self.sources();
        let config_source = (!sources.is_empty()).then(|| {
            sources
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" -> ")
        });

        if !missing.is_empty() {
            suggestions.push(format!("Missing config: {}", missing.join(", ")));
            suggestions.push("Configuration methods (priority low to high):".to_string());
            suggestions.push(format!("  1. ~/{HOME_CONFIG_FILE} (global)"));
            suggestions.push(format!("  2. <install-dir>/{LOCAL_CONFIG_FILE}"));
            suggestions.push(format!("  3. {LOCAL_CONFIG_FILE} (current directory)"));
            suggestions.push(format!("  4. Environment variables ({ACCESS_KEY_ID}, etc.)"));
        }

        ConfigCheck {
            ready: missing.is_empty(),
            env_vars,
            optional_vars,
            missing,
            suggestions,
            config_source,
        }
    }
}

/// Directory the tool is installed in
///
/// A binary living in `<root>/bin/` reads `<root>/.env`.
fn install_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?;
    if dir.file_name().is_some_and(|name| name == "bin") {
        dir.parent().map(Path::to_path_buf)
    } else {
        Some(dir.to_path_buf())
    }
}
