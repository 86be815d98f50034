//! # Configuration
//!
//! Layered settings, lowest precedence first:
//! 1. Built-in defaults
//! 2. `charforge.toml` in the working directory, or the `--config` file
//! 3. Environment variables (`CHARFORGE_*`, `__` separates sections)
//! 4. Command-line overrides, applied by the caller
//!
//! `CHARFORGE_SERVER__BIND` maps to `server.bind`,
//! `CHARFORGE_LOG__FILTER` to `log.filter`.

use charforge_core::storage::DEFAULT_STORAGE_KEY;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "charforge.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "CHARFORGE_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("config file not found: {0}")]
    MissingFile(PathBuf),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Figment(Box::new(e))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// redb database file holding saved profiles and employees.
    pub database: PathBuf,
    /// Local storage key of the saved-profile list.
    pub storage_key: String,
    pub server: ServerConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// Bearer token required on `/api` routes. Unset disables auth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("charforge.redb"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            server: ServerConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            api_key: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Build the provider chain.
    ///
    /// An explicit `config_file` must exist; the default file is optional.
    pub fn figment(config_file: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::MissingFile(path.to_path_buf()));
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.exists() {
                    figment = figment.merge(Toml::file(local));
                }
            }
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Load from every source.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Ok(Self::figment(config_file)?.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_files() {
        Jail::expect_with(|_jail| {
            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            assert_eq!(config.storage_key, "savedCharacters");
            assert_eq!(config.server.bind, "127.0.0.1:8080");
            Ok(())
        });
    }

    #[test]
    fn toml_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                DEFAULT_CONFIG_FILE,
                r#"
                    database = "data/chars.redb"

                    [server]
                    bind = "0.0.0.0:9000"
                    api_key = "from-file"
                "#,
            )?;
            jail.set_env("CHARFORGE_SERVER__API_KEY", "from-env");
            jail.set_env("CHARFORGE_LOG__FILTER", "debug");

            let config = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(config.database, PathBuf::from("data/chars.redb"));
            assert_eq!(config.server.bind, "0.0.0.0:9000");
            assert_eq!(config.server.api_key.as_deref(), Some("from-env"));
            assert_eq!(config.log.filter, "debug");
            Ok(())
        });
    }

    #[test]
    fn explicit_file_must_exist() {
        Jail::expect_with(|jail| {
            let missing = Config::load(Some(Path::new("nope.toml")));
            assert!(matches!(missing, Err(ConfigError::MissingFile(_))));

            jail.create_file("custom.toml", r#"storage_key = "otherKey""#)?;
            let config = Config::load(Some(Path::new("custom.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.storage_key, "otherKey");
            Ok(())
        });
    }
}
