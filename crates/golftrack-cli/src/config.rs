//! TOML settings for the CLI.
//!
//! The first existing file among `$GOLFTRACK_CONFIG` and
//! `~/.config/golftrack/config.toml` is used; every key is optional.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub display: DisplayConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Data directory. Default: `~/.local/share/golftrack`.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Reuse the stored analysis while the set of completed rounds is unchanged.
    pub use_cache: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { use_cache: true }
    }
}

/// Where the active configuration was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File named by `$GOLFTRACK_CONFIG`.
    Env(PathBuf),
    /// `~/.config/golftrack/config.toml`.
    User(PathBuf),
    /// No file found.
    Defaults,
}

/// A loaded config together with the facts needed to resolve paths from it.
#[derive(Debug)]
pub struct Settings {
    pub config: Config,
    pub source: ConfigSource,
    home: Option<PathBuf>,
}

impl Settings {
    /// Load using the process environment.
    pub fn load() -> Result<Self> {
        let env_path = std::env::var_os("GOLFTRACK_CONFIG").map(PathBuf::from);
        let home = std::env::var_os("HOME").map(PathBuf::from);
        Self::load_from(env_path, home)
    }

    /// Pick the first existing candidate and parse it; no candidate means defaults.
    fn load_from(env_path: Option<PathBuf>, home: Option<PathBuf>) -> Result<Self> {
        let user_path = home
            .as_ref()
            .map(|h| h.join(".config").join("golftrack").join("config.toml"));

        let source = match (env_path, user_path) {
            (Some(p), _) if p.is_file() => ConfigSource::Env(p),
            (_, Some(p)) if p.is_file() => ConfigSource::User(p),
            _ => ConfigSource::Defaults,
        };

        let config = match &source {
            ConfigSource::Env(p) | ConfigSource::User(p) => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("reading {}", p.display()))?;
                toml::from_str(&content).with_context(|| format!("parsing {}", p.display()))?
            }
            ConfigSource::Defaults => Config::default(),
        };

        Ok(Self { config, source, home })
    }

    /// Data directory: explicit override, then `[store] path`, then
    /// `~/.local/share/golftrack`, then `.golftrack` in the working directory.
    pub fn data_dir(&self, override_dir: Option<PathBuf>) -> PathBuf {
        override_dir
            .or_else(|| self.config.store.path.as_ref().map(PathBuf::from))
            .or_else(|| {
                self.home
                    .as_ref()
                    .map(|h| h.join(".local").join("share").join("golftrack"))
            })
            .unwrap_or_else(|| PathBuf::from(".golftrack"))
    }

    /// One-line summary for `golftrack config`.
    pub fn describe(&self) -> String {
        match &self.source {
            ConfigSource::Env(p) => format!("{} (from $GOLFTRACK_CONFIG)", p.display()),
            ConfigSource::User(p) => format!("{} (loaded)", p.display()),
            ConfigSource::Defaults => "no config file found (using defaults)".into(),
        }
    }
}
