//! Configuration management for the portal MCP server.
//!
//! Configuration comes from environment variables, optionally seeded from a
//! `.env` file. Nothing here writes to stdout, which MCP uses for transport.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// Default location of the persisted session tokens.
pub const DEFAULT_SESSION_FILE: &str = ".portal-session.json";

/// Configuration for the portal MCP server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Portal REST API base URL (e.g. `https://studio.example/api`)
    pub portal_api_url: String,

    /// File holding the access/refresh tokens between runs
    pub session_file: PathBuf,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Lifetime of a toast notification in seconds (default: 5)
    pub toast_ttl_secs: u64,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `PORTAL_API_BASE_URL`: Base URL for the portal API
    ///
    /// Optional environment variables:
    /// - `PORTAL_SESSION_FILE`: Session token file (default: `.portal-session.json`)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `TOAST_TTL_SECS`: Toast lifetime in seconds (default: 5)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // dotenvy::dotenv() does not print to stdout
        let _ = dotenvy::dotenv();

        let portal_api_url = env::var("PORTAL_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("PORTAL_API_BASE_URL".to_string()))?;

        if !portal_api_url.starts_with("http://") && !portal_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "PORTAL_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let session_file = match env::var("PORTAL_SESSION_FILE") {
            Ok(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "PORTAL_SESSION_FILE".to_string(),
                    reason: "Cannot be empty".to_string(),
                });
            }
            Ok(path) => PathBuf::from(path),
            Err(_) => PathBuf::from(DEFAULT_SESSION_FILE),
        };

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let toast_ttl_secs = Self::parse_env_u64("TOAST_TTL_SECS", 5)?;

        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            portal_api_url,
            session_file,
            request_timeout,
            toast_ttl_secs,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            portal_api_url: String::new(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            request_timeout: 10,
            toast_ttl_secs: 5,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

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
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.toast_ttl_secs, 5);
        assert_eq!(config.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("PORTAL_API_BASE_URL", "not-a-url");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "PORTAL_API_BASE_URL"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("PORTAL_API_BASE_URL", "https://studio.example/api");
        guard.set("PORTAL_SESSION_FILE", "/tmp/portal-test-session.json");
        guard.set("REQUEST_TIMEOUT", "30");
        guard.set("TOAST_TTL_SECS", "3");

        let config = Config::from_env().unwrap();
        assert_eq!(config.portal_api_url, "https://studio.example/api");
        assert_eq!(
            config.session_file,
            PathBuf::from("/tmp/portal-test-session.json")
        );
        assert_eq!(config.request_timeout, 30);
        assert_eq!(config.toast_ttl_secs, 3);
    }

    #[test]
    #[serial]
    fn test_config_zero_timeout_rejected() {
        let mut guard = EnvGuard::new();
        guard.set("PORTAL_API_BASE_URL", "https://studio.example/api");
        guard.set("REQUEST_TIMEOUT", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "REQUEST_TIMEOUT"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("PORTAL_TEST_U64", "42");

        assert_eq!(Config::parse_env_u64("PORTAL_TEST_U64", 10).unwrap(), 42);
        assert_eq!(Config::parse_env_u64("PORTAL_NONEXISTENT", 10).unwrap(), 10);

        guard.set("PORTAL_TEST_U64_INVALID", "not-a-number");
        assert!(Config::parse_env_u64("PORTAL_TEST_U64_INVALID", 10).is_err());
    }
}
