//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `roomconf.toml` in the working directory unless another file is
//! given. Every field has a sensible default so the file is optional.
//! Environment variables take precedence over file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "roomconf.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Export settings.
    pub output: OutputConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Where compiled documents are written.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the exported configuration file.
    pub path: PathBuf,
}

impl Config {
    /// Load configuration from `path` (or `roomconf.toml` if present) then
    /// apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed, if an explicitly given file
    /// cannot be read, or if the result does not validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path, true)?,
            None => Self::from_file(Path::new(DEFAULT_CONFIG_FILE), false)?,
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("ROOMCONF_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("ROOMCONF_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("ROOMCONF_BIND") {
            self.set_bind(&val);
        }
        if let Some(val) = var("ROOMCONF_OUTPUT") {
            self.output.path = PathBuf::from(val);
        }
        if let Some(val) = var("ROOMCONF_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    /// Override host and port from a `host:port` string. A value without a
    /// parsable port is ignored.
    pub fn set_bind(&mut self, bind: &str) {
        if let Some((host, port)) = bind.rsplit_once(':')
            && let Ok(port) = port.parse::<u16>()
        {
            self.server.host = host.to_string();
            self.server.port = port;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.output.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output path must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "roomconfd=info,roomconf_app=info,roomconf_adapter_fs=info,tower_http=debug"
                .to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(roomconf_adapter_fs::DEFAULT_FILE_NAME),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.output.path, PathBuf::from("room_configuration.json"));
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [logging]
            filter = 'debug'

            [output]
            path = 'export/room.json'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.output.path, PathBuf::from("export/room.json"));
    }

    #[test]
    fn should_return_default_when_default_file_not_found() {
        let config = Config::from_file(Path::new("nonexistent.toml"), false).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_fail_when_explicit_file_not_found() {
        let result = Config::from_file(Path::new("nonexistent.toml"), true);
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_overrides(env(&[
            ("ROOMCONF_HOST", "127.0.0.1"),
            ("ROOMCONF_PORT", "8081"),
            ("ROOMCONF_OUTPUT", "/var/lib/roomconf/room.json"),
            ("ROOMCONF_LOG", "warn"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
        assert_eq!(config.output.path, PathBuf::from("/var/lib/roomconf/room.json"));
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_prefer_rust_log_over_roomconf_log() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("ROOMCONF_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_apply_bind_override() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("ROOMCONF_PORT", "1"), ("ROOMCONF_BIND", "localhost:4000")]));
        assert_eq!(config.bind_addr(), "localhost:4000");
    }

    #[test]
    fn should_ignore_unparsable_port() {
        let mut config = Config::default();
        config.apply_overrides(env(&[("ROOMCONF_PORT", "eighty")]));
        config.set_bind("nowhere");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_output_path() {
        let mut config = Config::default();
        config.output.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
