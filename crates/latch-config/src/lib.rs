//! # latch-config
//!
//! Layered configuration loading for latchd using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LATCHD_*` prefix, `__` as separator)
//! 2. Project-level `latchd.toml` in the working directory
//! 3. User-level `~/.config/latchd/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LATCHD_SERVER__LISTEN` -> `server.listen`,
//! `LATCHD_ACCESS__PIN` -> `access.pin`, etc. The `__` (double underscore)
//! separates nested config sections.

mod access;
mod error;
mod log;
mod server;
mod store;

pub use access::AccessConfig;
pub use error::ConfigError;
pub use log::LogConfig;
pub use server::ServerConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LatchConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl LatchConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` — use [`Self::load_with_dotenv`] if `.env` file
    /// loading is wanted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or extract.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// This is the typical entry point for the daemon and tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source fails to parse or extract.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(user_config) = Self::user_config_path() {
            figment = figment.merge(Toml::file(user_config));
        }

        figment
            .merge(Toml::file("latchd.toml"))
            .merge(Env::prefixed("LATCHD_").split("__"))
    }

    /// `~/.config/latchd/config.toml`, if a home config dir exists.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("latchd").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_load_without_sources() {
        figment::Jail::expect_with(|_jail| {
            let config: LatchConfig = LatchConfig::figment().extract().unwrap();
            assert_eq!(config.server.listen, "127.0.0.1:8000");
            assert_eq!(config.store.path, "latchd.db");
            assert_eq!(config.access.pin, "1234");
            assert_eq!(config.log.page_size, 20);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "latchd.toml",
                r#"
                [access]
                pin = "0000"

                [server]
                listen = "0.0.0.0:9000"
                "#,
            )?;
            jail.set_env("LATCHD_ACCESS__PIN", "9999");

            let config: LatchConfig = LatchConfig::figment().extract().unwrap();
            assert_eq!(config.access.pin, "9999");
            assert_eq!(config.server.listen, "0.0.0.0:9000");
            Ok(())
        });
    }
}
