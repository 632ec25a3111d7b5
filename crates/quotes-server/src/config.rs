//! Server configuration
//!
//! Layered: built-in defaults, then an optional config file (`quotes.toml`, or
//! the file named by `QUOTES_CONFIG`), then `QUOTES__*` environment variables.
//! Nested keys use `__`, e.g. `QUOTES__SEED__TARGET_QUOTES=5000`.

use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Default filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Built client to serve next to the API
    pub static_dir: Option<PathBuf>,
    /// Upper bound for any `limit` query parameter
    pub max_page_size: u32,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    pub enabled: bool,
    pub target_quotes: usize,
    /// Mix in a sample of quotes from public quote APIs
    pub fetch_remote: bool,
    /// Fixed seed for a reproducible dataset
    pub rng_seed: Option<u64>,
}

impl ServerConfig {
    pub fn load() -> Result<Self> {
        let file = std::env::var("QUOTES_CONFIG").unwrap_or_else(|_| "quotes".to_string());

        Self::defaults()?
            .add_source(File::with_name(&file).required(false))
            .add_source(
                Environment::with_prefix("QUOTES")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("bind_address", "0.0.0.0:5000")?
            .set_default("log_level", "info")?
            .set_default("max_page_size", 100)?
            .set_default("seed.enabled", true)?
            .set_default("seed.target_quotes", 100_000)?
            .set_default("seed.fetch_remote", false)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_defaults() {
        let config: ServerConfig = ServerConfig::defaults()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:5000");
        assert_eq!(config.max_page_size, 100);
        assert!(config.static_dir.is_none());
        assert!(config.seed.enabled);
        assert_eq!(config.seed.target_quotes, 100_000);
        assert!(!config.seed.fetch_remote);
        assert!(config.seed.rng_seed.is_none());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let toml = r#"
            bind_address = "127.0.0.1:8080"
            static_dir = "dist/public"

            [seed]
            target_quotes = 500
            fetch_remote = true
            rng_seed = 9
        "#;
        let config: ServerConfig = ServerConfig::defaults()
            .unwrap()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.static_dir, Some(PathBuf::from("dist/public")));
        assert_eq!(config.seed.target_quotes, 500);
        assert_eq!(config.seed.rng_seed, Some(9));
        assert!(config.seed.fetch_remote);
        assert!(config.seed.enabled);
        assert_eq!(config.log_level, "info");
    }
}
