//! Configuration types for gelfmt.
//!
//! [`Config::load`] reads `~/.config/gelfmt/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist, then applies `GELFMT__*`
//! environment overrides (`GELFMT__GELF__HOST=web-1`). [`Config::defaults`]
//! returns the same defaults without touching the filesystem (useful in
//! tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::fields::{ExtraField, FieldSet, Profile};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[gelf]
profile         = "basic"
null_terminated = false
# host          = "web-1"
# extra_fields  = ["line", "file", "status_code"]

[logging]
level  = "info"
format = "text"
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/gelfmt/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gelf: GelfConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[gelf]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GelfConfig {
    /// Host reported in every message. Falls back to [`system_hostname`].
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub profile: Profile,
    /// Replaces the profile's field set when given.
    #[serde(default)]
    pub extra_fields: Option<Vec<ExtraField>>,
    #[serde(default)]
    pub null_terminated: bool,
}

impl GelfConfig {
    pub fn field_set(&self) -> FieldSet {
        match &self.extra_fields {
            Some(fields) => fields.iter().copied().collect(),
            None => self.profile.fields(),
        }
    }

    pub fn resolve_host(&self) -> String {
        self.host
            .clone()
            .filter(|h| !h.is_empty())
            .unwrap_or_else(system_hostname)
    }
}

/// `[logging]` section: diagnostics of the gelfmt binary itself.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Gelf,
}

fn default_level() -> String { "info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/gelfmt/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load an explicit file on top of the built-in defaults. The file must
    /// exist.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        Self::layered(path, environment())
    }

    fn layered(path: &Path, env: config::Environment) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path))
            .add_source(env)
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path and host helpers
// ---------------------------------------------------------------------------

/// `GELFMT__SECTION__KEY` overrides. `GELFMT__GELF__EXTRA_FIELDS` takes a
/// comma-separated list.
fn environment() -> config::Environment {
    config::Environment::with_prefix("GELFMT")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("gelf.extra_fields")
}

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("gelfmt")
        .join("config.toml")
}

/// Best-effort machine name: `$HOSTNAME`, then `/etc/hostname`, then
/// `localhost`.
pub fn system_hostname() -> String {
    std::env::var("HOSTNAME")
        .ok()
        .or_else(|| std::fs::read_to_string("/etc/hostname").ok())
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
