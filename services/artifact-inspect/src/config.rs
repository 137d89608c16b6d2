//! Configuration types and loading
//!
//! Config precedence: CLI args > env vars > config file > defaults.
//! `FB_APP_ID` overrides `application.app_id` so one config file can be
//! pointed at different applications.

use oauth_artifacts::DEFAULT_PREFIX;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    pub application: ApplicationConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// OAuth application whose artifacts are inspected
#[derive(Debug, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default)]
    pub app_id: String,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

/// Where the session dump lives
#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_dump_path")]
    pub dump_path: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dump_path: default_dump_path(),
        }
    }
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_owned()
}

fn default_dump_path() -> PathBuf {
    PathBuf::from("session.json")
}

impl Config {
    /// Load configuration from a TOML file, then overlay environment variables.
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        if let Ok(app_id) = std::env::var("FB_APP_ID") {
            config.application.app_id = app_id;
        }
        config.application.app_id = config.application.app_id.trim().to_owned();

        if config.application.app_id.is_empty() {
            return Err(common::Error::Config(
                "application.app_id must be set (or FB_APP_ID)".into(),
            ));
        }

        // An empty prefix would make clear_all wipe the entire session
        if config.application.prefix.is_empty() {
            return Err(common::Error::Config(
                "application.prefix must not be empty".into(),
            ));
        }

        Ok(config)
    }

    /// Resolve config file path from CLI arg or CONFIG_PATH env var.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var("CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("artifact-inspect.toml")
    }
}
