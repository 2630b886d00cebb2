//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, then command-line flags override the store path.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use inventory_db::DbConfig;

const DEFAULT_DB_PATH: &str = "inventory.db";
const DEFAULT_CONNECT_TIMEOUT_SECS: &str = "5";

/// Usage text printed for `--help`.
pub const USAGE: &str = "\
Inventory Manager

Usage: inventory [OPTIONS]

Options:
  -d, --db <PATH>    Database file path (default: inventory.db)
  -h, --help         Show this help message

Environment:
  INVENTORY_DB_PATH                Database file path
  INVENTORY_CONNECT_TIMEOUT_SECS   Seconds to wait for the store (default: 5)
  RUST_LOG                         Log filter (logs go to stderr)";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// How long to wait for the store connection, in seconds
    pub connect_timeout_secs: u64,

    /// `--help` was given; print usage and exit
    pub show_help: bool,
}

impl CliConfig {
    /// Load configuration from environment variables and process arguments.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_sources(
            |name| env::var(name).ok(),
            env::args().skip(1),
        )
    }

    /// Builds the configuration from an env lookup and an argument list
    /// (without the program name).
    pub fn from_sources<F, I>(lookup: F, args: I) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
        I: IntoIterator<Item = String>,
    {
        let mut config = CliConfig {
            db_path: PathBuf::from(
                lookup("INVENTORY_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            ),

            connect_timeout_secs: lookup("INVENTORY_CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|| DEFAULT_CONNECT_TIMEOUT_SECS.to_string())
                .trim()
                .parse()
                .map_err(|_| {
                    ConfigError::InvalidValue("INVENTORY_CONNECT_TIMEOUT_SECS".to_string())
                })?,

            show_help: false,
        };

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" | "-d" => {
                    let path = args
                        .next()
                        .ok_or_else(|| ConfigError::MissingRequired("--db <PATH>".to_string()))?;
                    config.db_path = PathBuf::from(path);
                }
                "--help" | "-h" => config.show_help = true,
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        if config.db_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue("INVENTORY_DB_PATH".to_string()));
        }

        Ok(config)
    }

    /// Store settings for [`inventory_db::Database::open`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path).connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)], args: &[&str]) -> Result<CliConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CliConfig::from_sources(
            |name| vars.get(name).cloned(),
            args.iter().map(|a| a.to_string()),
        )
    }

    #[test]
    fn test_defaults() {
        let config = load(&[], &[]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("inventory.db"));
        assert_eq!(config.connect_timeout_secs, 5);
        assert!(!config.show_help);
    }

    #[test]
    fn test_env_overrides() {
        let config = load(
            &[
                ("INVENTORY_DB_PATH", "/tmp/stock.db"),
                ("INVENTORY_CONNECT_TIMEOUT_SECS", "12"),
            ],
            &[],
        )
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/tmp/stock.db"));
        assert_eq!(config.connect_timeout_secs, 12);
    }

    #[test]
    fn test_db_flag_beats_env() {
        let config = load(&[("INVENTORY_DB_PATH", "env.db")], &["--db", "flag.db"]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("flag.db"));

        let config = load(&[], &["-d", "short.db"]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("short.db"));
    }

    #[test]
    fn test_invalid_timeout() {
        let err = load(&[("INVENTORY_CONNECT_TIMEOUT_SECS", "soon")], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(name) if name == "INVENTORY_CONNECT_TIMEOUT_SECS"));
    }

    #[test]
    fn test_db_flag_without_path() {
        let err = load(&[], &["--db"]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingRequired(_)));
    }

    #[test]
    fn test_unknown_argument_and_help() {
        assert!(matches!(
            load(&[], &["--verbose"]).unwrap_err(),
            ConfigError::UnknownArgument(_)
        ));
        assert!(load(&[], &["--help"]).unwrap().show_help);
    }

    #[test]
    fn test_db_config_carries_path() {
        let config = load(&[], &["--db", "x.db"]).unwrap();
        let db = config.db_config();
        assert!(!db.is_in_memory());
    }
}
