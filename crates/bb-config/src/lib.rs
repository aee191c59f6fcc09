//! # bb-config
//!
//! Layered settings for the explorer: built-in defaults, then an optional
//! `explorer.toml`, then `EXPLORER__*` environment variables
//! (e.g. `EXPLORER__API__BASE_URL`).

use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use thiserror::Error;

const ENV_PREFIX: &str = "EXPLORER";
const DEFAULT_FILE: &str = "explorer";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api: ApiSettings,
    pub poll: PollSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// Origin of the backend, without the `/api` prefix
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PollSettings {
    pub status_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
    pub json: bool,
}

impl Settings {
    /// Loads `.env`, then every settings layer.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("no .env loaded: {e}");
        }

        Self::layered(Environment::with_prefix(ENV_PREFIX).separator("__"))
    }

    /// Defaults, then the optional settings file, then `env`.
    fn layered(env: Environment) -> Result<Self, ConfigError> {
        let builder = defaults()?
            .add_source(File::with_name(DEFAULT_FILE).required(false))
            .add_source(env.try_parsing(true));

        Self::finish(builder.build()?)
    }

    /// Defaults overlaid with an in-memory TOML document.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let builder = defaults()?.add_source(File::from_str(toml, FileFormat::Toml));
        Self::finish(builder.build()?)
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_secs(self.poll.status_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    fn finish(config: Config) -> Result<Self, ConfigError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "api.base_url",
                reason: format!("{:?} is not an http(s) URL", self.api.base_url),
            });
        }
        if self.poll.status_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "poll.status_interval_secs",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}

fn defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Ok(Config::builder()
        .set_default("api.base_url", "http://127.0.0.1:1054")?
        .set_default("api.timeout_secs", 10_i64)?
        .set_default("poll.status_interval_secs", 15_i64)?
        .set_default("log.filter", "info")?
        .set_default("log.json", false)?)
}
