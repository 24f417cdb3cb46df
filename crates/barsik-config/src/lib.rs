//! # barsik-config
//!
//! Layered configuration for the dashboard binary: struct defaults, then an
//! optional `barsik.toml` (path overridable via `BARSIK_CONFIG`), then
//! `BARSIK__SECTION__KEY` environment variables. [`load_dotenv`] runs
//! first so `.env` can feed both this layer and `RUST_LOG`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub panels: PanelsConfig,
    pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".into(),
            port: 8080,
            static_dir: "./static".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Moderation service endpoint. Empty selects the demo feed.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        UpstreamConfig {
            base_url: String::new(),
            timeout_secs: 10,
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PanelsConfig {
    /// Forward filter/settings saves to the moderation service.
    pub write_back: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub handle: String,
    pub version: String,
    pub active_since: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        BotConfig {
            handle: "@barsik_moderator_bot".into(),
            version: "v1.0.0".into(),
            active_since: "16.01.2026".into(),
        }
    }
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        let url = self.upstream.base_url.trim();
        if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "upstream.base_url must be an http(s) URL, got '{url}'"
            )));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "upstream.timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Loads `.env` into the process environment, returning its path if found.
/// Call before the logger starts so `RUST_LOG` from `.env` takes effect.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Loads the optional config file and the environment.
pub fn load() -> Result<DashboardConfig, ConfigError> {
    let file = std::env::var("BARSIK_CONFIG").unwrap_or_else(|_| "barsik".into());
    from_builder(
        Config::builder()
            .add_source(File::with_name(&file).required(false))
            .add_source(env_source(None)),
    )
}

/// Builds and validates a config from an already assembled source stack.
pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<DashboardConfig, ConfigError> {
    let cfg: DashboardConfig = builder.build()?.try_deserialize()?;
    cfg.validate()?;
    Ok(cfg)
}

/// `BARSIK__SERVER__PORT=9000` → `server.port = 9000`.
/// `vars` replaces the process environment when given.
pub fn env_source(vars: Option<HashMap<String, String>>) -> Environment {
    Environment::with_prefix("BARSIK")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .source(vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn vars(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults_without_sources() {
        let cfg = from_builder(Config::builder().add_source(env_source(vars(&[])))).unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.upstream.base_url.is_empty());
        assert_eq!(cfg.upstream.timeout(), Duration::from_secs(10));
        assert!(!cfg.panels.write_back);
        assert_eq!(cfg.bot.handle, "@barsik_moderator_bot");
    }

    #[test]
    fn test_file_then_env_override() {
        let toml = r#"
            [server]
            port = 9000

            [upstream]
            base_url = "https://functions.example.net/bot"

            [bot]
            version = "v1.2.0"
        "#;
        let cfg = from_builder(
            Config::builder()
                .add_source(File::from_str(toml, FileFormat::Toml))
                .add_source(env_source(vars(&[
                    ("BARSIK__SERVER__PORT", "9100"),
                    ("BARSIK__PANELS__WRITE_BACK", "true"),
                ]))),
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.upstream.base_url, "https://functions.example.net/bot");
        assert!(cfg.panels.write_back);
        assert_eq!(cfg.bot.version, "v1.2.0");
        assert_eq!(cfg.bot.active_since, "16.01.2026");
    }

    #[test]
    fn test_rejects_non_http_upstream() {
        let err = from_builder(
            Config::builder()
                .add_source(File::from_str("[upstream]\nbase_url = \"ftp://x\"", FileFormat::Toml)),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = from_builder(
            Config::builder()
                .add_source(File::from_str("[upstream]\ntimeout_secs = 0", FileFormat::Toml)),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
