//! Echo Chamber configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main Echo Chamber configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// HTTP server configuration
    pub server: ServerConfig,

    /// Interactive shell configuration
    pub repl: ReplConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .echochamber.yml
        let local_config = PathBuf::from(".echochamber.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/echochamber/echochamber.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("echochamber").join("echochamber.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    ///
    /// Errors are swallowed here; the full `load` reports them once logging works.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load(config_path).ok().and_then(|config| config.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Apply `HOST` and `PORT` from the environment to the server section
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .context(format!("PORT must be a valid port number, got '{}'", port))?;
        }
        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to bind
    pub port: u16,

    /// Directory of static web assets served at `/`
    #[serde(rename = "static-dir")]
    pub static_dir: Option<PathBuf>,

    /// Largest `count` accepted by the multiple-prediction endpoint
    #[serde(rename = "max-count")]
    pub max_count: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: None,
            max_count: seqpredict::DEFAULT_MAX_PREDICTION_COUNT,
        }
    }
}

impl ServerConfig {
    /// Socket address from `host` and `port`
    pub fn addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .context(format!("Invalid HOST:PORT configuration: {}:{}", self.host, self.port))
    }
}

/// Interactive shell configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplConfig {
    /// Terms predicted when no count is given
    #[serde(rename = "default-count")]
    pub default_count: i64,

    /// Largest count accepted by `predict N` and `ec predict -n`
    #[serde(rename = "max-count")]
    pub max_count: i64,

    /// Keep line history for the session
    pub history: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            default_count: seqpredict::DEFAULT_PREDICTION_COUNT,
            max_count: seqpredict::DEFAULT_MAX_PREDICTION_COUNT,
            history: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.log_level.is_none());
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.max_count, 1000);
        assert_eq!(config.repl.default_count, 5);
        assert_eq!(config.repl.max_count, 1000);
        assert!(config.repl.history);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
log-level: debug

server:
  host: 127.0.0.1
  port: 8080
  static-dir: ./static
  max-count: 50

repl:
  default-count: 3
  max-count: 20
  history: false
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.static_dir, Some(PathBuf::from("./static")));
        assert_eq!(config.server.max_count, 50);
        assert_eq!(config.repl.default_count, 3);
        assert_eq!(config.repl.max_count, 20);
        assert!(!config.repl.history);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
server:
  port: 4000
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.repl.default_count, 5);
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("echochamber.yml");
        fs::write(&path, "server:\n  port: 5050\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.server.port, 5050);
    }

    #[test]
    fn test_load_explicit_path_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_log_level() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("echochamber.yml");
        fs::write(&path, "log-level: WARN\n").unwrap();

        assert_eq!(Config::load_log_level(Some(&path)).as_deref(), Some("WARN"));
        assert_eq!(Config::load_log_level(Some(&temp.path().join("missing.yml"))), None);
    }

    #[test]
    fn test_server_addr() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3001,
            ..Default::default()
        };
        assert_eq!(server.addr().unwrap().to_string(), "127.0.0.1:3001");

        let bad = ServerConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(bad.addr().is_err());
    }

    #[test]
    #[serial]
    fn test_apply_env_overrides() {
        // SAFETY: serialized with the other environment tests
        unsafe {
            std::env::set_var("HOST", "127.0.0.1");
            std::env::set_var("PORT", "9090");
        }

        let mut config = Config::default();
        let result = config.apply_env();

        unsafe {
            std::env::remove_var("HOST");
            std::env::remove_var("PORT");
        }

        result.unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    #[serial]
    fn test_apply_env_rejects_bad_port() {
        // SAFETY: serialized with the other environment tests
        unsafe {
            std::env::set_var("PORT", "eighty");
        }

        let mut config = Config::default();
        let result = config.apply_env();

        unsafe {
            std::env::remove_var("PORT");
        }

        assert!(result.is_err());
    }
}
