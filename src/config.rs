//! Configuration management for the assistant bot.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the working directory.

use crate::error::{ConfigError, ConfigResult};
use crate::models::DEFAULT_UPCOMING_DAYS;
use std::env;
use std::path::PathBuf;

/// Default data file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "addressbook.json";

/// Longest accepted birthday window.
const MAX_UPCOMING_DAYS: u32 = 366;

/// Configuration for the assistant bot.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address book file (default: "addressbook.json")
    pub data_file: PathBuf,

    /// Days ahead covered by the `birthdays` command (default: 7)
    pub upcoming_days: u32,

    /// Log level used when RUST_LOG is unset (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `ADDRESS_BOOK_FILE`: Path of the address book file (default: addressbook.json)
    /// - `UPCOMING_BIRTHDAY_DAYS`: Birthday window in days, 0-366 (default: 7)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let data_file = match env::var("ADDRESS_BOOK_FILE") {
            Ok(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "ADDRESS_BOOK_FILE".to_string(),
                    reason: "Cannot be empty".to_string(),
                });
            }
            Ok(path) => PathBuf::from(path),
            Err(_) => PathBuf::from(DEFAULT_DATA_FILE),
        };

        let upcoming_days = Self::parse_env_u32(
            "UPCOMING_BIRTHDAY_DAYS",
            DEFAULT_UPCOMING_DAYS,
            MAX_UPCOMING_DAYS,
        )?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            data_file,
            upcoming_days,
            log_level,
        })
    }

    /// Parse an environment variable as a u32 in `0..=max` with a default value.
    fn parse_env_u32(var_name: &str, default: u32, max: u32) -> ConfigResult<u32> {
        let val = match env::var(var_name) {
            Ok(val) => val,
            Err(_) => return Ok(default),
        };

        match val.parse::<u32>() {
            Ok(n) if n <= max => Ok(n),
            _ => Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a number between 0 and {}, got: {}", max, val),
            }),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            upcoming_days: DEFAULT_UPCOMING_DAYS,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.data_file, PathBuf::from("addressbook.json"));
        assert_eq!(config.upcoming_days, 7);
        assert_eq!(config.log_level, "error");
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("ADDRESS_BOOK_FILE", "/tmp/contacts.json");
        guard.set("UPCOMING_BIRTHDAY_DAYS", "14");
        guard.set("LOG_LEVEL", "debug");

        let config = Config::from_env().unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/contacts.json"));
        assert_eq!(config.upcoming_days, 14);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_config_empty_data_file() {
        let mut guard = EnvGuard::new();
        guard.set("ADDRESS_BOOK_FILE", "  ");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "ADDRESS_BOOK_FILE"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_window_out_of_range() {
        let mut guard = EnvGuard::new();
        guard.set("UPCOMING_BIRTHDAY_DAYS", "400");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, reason }) => {
                assert_eq!(var, "UPCOMING_BIRTHDAY_DAYS");
                assert_eq!(reason, "Must be a number between 0 and 366, got: 400");
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_window_zero_allowed() {
        let mut guard = EnvGuard::new();
        guard.set("UPCOMING_BIRTHDAY_DAYS", "0");

        assert_eq!(Config::from_env().unwrap().upcoming_days, 0);
    }

    #[test]
    #[serial]
    fn test_parse_env_u32() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U32", "42");

        assert_eq!(Config::parse_env_u32("TEST_U32", 10, 100).unwrap(), 42);
        assert_eq!(Config::parse_env_u32("NONEXISTENT_U32", 10, 100).unwrap(), 10);
        assert!(Config::parse_env_u32("TEST_U32", 10, 41).is_err());
    }

    #[test]
    #[serial]
    fn test_parse_env_u32_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U32_INVALID", "-3");

        match Config::parse_env_u32("TEST_U32_INVALID", 10, 366) {
            Err(ConfigError::InvalidValue { reason, .. }) => {
                assert_eq!(reason, "Must be a number between 0 and 366, got: -3")
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }
}
