use std::env;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Sqlite,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_host: String,
    pub api_port: u16,
    pub storage: StorageKind,
    pub database_path: String,
    pub database_pool_size: u32,
    pub require_artist_name: bool,
}

impl Config {
    /// Load configuration from the environment, after applying a `.env` file if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup. Unset keys fall back to defaults,
    /// malformed ones are an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            api_host: var("API_HOST", "127.0.0.1"),

            api_port: parse("API_PORT", var("API_PORT", "8080"))?,

            storage: parse_storage(var("STORAGE_BACKEND", "sqlite"))?,

            database_path: var("DATABASE_PATH", "artists.db"),

            database_pool_size: parse("DATABASE_POOL_SIZE", var("DATABASE_POOL_SIZE", "4"))?,

            require_artist_name: parse_bool(
                "REQUIRE_ARTIST_NAME",
                var("REQUIRE_ARTIST_NAME", "false"),
            )?,
        })
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key,
        reason: e.to_string(),
        value,
    })
}

fn parse_storage(value: String) -> Result<StorageKind, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "sqlite" => Ok(StorageKind::Sqlite),
        "memory" => Ok(StorageKind::Memory),
        _ => Err(ConfigError::InvalidValue {
            key: "STORAGE_BACKEND",
            value,
            reason: "expected `sqlite` or `memory`".to_string(),
        }),
    }
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(
            config,
            Config {
                api_host: "127.0.0.1".to_string(),
                api_port: 8080,
                storage: StorageKind::Sqlite,
                database_path: "artists.db".to_string(),
                database_pool_size: 4,
                require_artist_name: false,
            }
        );
        assert_eq!(config.api_address(), "127.0.0.1:8080");
    }

    #[test]
    fn reads_every_key() {
        let config = load(&[
            ("API_HOST", "0.0.0.0"),
            ("API_PORT", "3000"),
            ("STORAGE_BACKEND", "Memory"),
            ("DATABASE_PATH", "/tmp/chinook.db"),
            ("DATABASE_POOL_SIZE", "8"),
            ("REQUIRE_ARTIST_NAME", "yes"),
        ])
        .unwrap();

        assert_eq!(config.api_address(), "0.0.0.0:3000");
        assert_eq!(config.storage, StorageKind::Memory);
        assert_eq!(config.database_path, "/tmp/chinook.db");
        assert_eq!(config.database_pool_size, 8);
        assert!(config.require_artist_name);
    }

    #[test]
    fn bad_port_names_the_key() {
        let err = load(&[("API_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "API_PORT", .. }));
    }

    #[test]
    fn unknown_storage_backend_is_rejected() {
        let err = load(&[("STORAGE_BACKEND", "postgres")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "STORAGE_BACKEND", .. }));
    }

    #[test]
    fn bad_boolean_is_rejected() {
        let err = load(&[("REQUIRE_ARTIST_NAME", "maybe")]).unwrap_err();
        assert!(err.to_string().starts_with("Invalid REQUIRE_ARTIST_NAME"));
    }
}
