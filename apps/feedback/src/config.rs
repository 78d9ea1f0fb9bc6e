//! # Configuration
//!
//! Layered configuration for the server and the CLI client.
//!
//! Precedence, lowest to highest:
//! 1. Built-in defaults
//! 2. TOML file (`--config <path>`, or `feedback.toml` in the working directory)
//! 3. Environment variables
//! 4. Command-line flags (applied by the CLI)
//!
//! ## Environment Variables
//!
//! - `FEEDBACK_HOST` / `FEEDBACK_PORT`: bind address of the server
//! - `FEEDBACK_ENV`: environment label reported by `/api/health`
//! - `FEEDBACK_CORS_ORIGINS`: comma-separated origins, or `*` for all
//! - `FEEDBACK_RATE_LIMIT`: requests per second (0 disables)
//! - `FEEDBACK_URL`: server URL used by the client commands
//!
//! ## Example File
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 5000
//! environment = "production"
//! cors_origins = ["https://feedback.example.edu"]
//! rate_limit = 50
//!
//! [client]
//! url = "http://feedback.example.edu"
//! ```

use feedback_core::FeedbackError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name probed in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "feedback.toml";

/// Maximum accepted configuration file size (64 KiB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

// =============================================================================
// SERVER CONFIG
// =============================================================================

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Free-form label echoed by the health endpoint.
    pub environment: String,
    /// Allowed CORS origins. Empty means localhost only; `["*"]` allows all.
    pub cors_origins: Vec<String>,
    /// Global requests-per-second limit; 0 disables rate limiting.
    pub rate_limit: u32,
    /// Maximum request body size in bytes.
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            environment: "development".to_string(),
            cors_origins: Vec::new(),
            rate_limit: 100,
            body_limit: 64 * 1024,
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// CLIENT CONFIG
// =============================================================================

/// CLI client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the feedback server.
    pub url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5000".to_string(),
        }
    }
}

// =============================================================================
// APP CONFIG
// =============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub client: ClientConfig,
}

impl AppConfig {
    /// Load configuration from file (if any) and the process environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, FeedbackError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self, FeedbackError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            FeedbackError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(FeedbackError::Io(format!(
                "Config file {} bytes exceeds maximum {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            FeedbackError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        tracing::info!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, FeedbackError> {
        toml::from_str(text).map_err(|e| FeedbackError::Io(format!("Invalid config: {}", e)))
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Unparseable numeric values are logged and ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("FEEDBACK_HOST").filter(|h| !h.trim().is_empty()) {
            self.server.host = host.trim().to_string();
        }
        if let Some(raw) = lookup("FEEDBACK_PORT") {
            match raw.trim().parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!("Ignoring invalid FEEDBACK_PORT '{}'", raw),
            }
        }
        if let Some(env) = lookup("FEEDBACK_ENV").filter(|e| !e.trim().is_empty()) {
            self.server.environment = env.trim().to_string();
        }
        if let Some(raw) = lookup("FEEDBACK_CORS_ORIGINS") {
            self.server.cors_origins = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(raw) = lookup("FEEDBACK_RATE_LIMIT") {
            match raw.trim().parse() {
                Ok(rps) => self.server.rate_limit = rps,
                Err(_) => tracing::warn!("Ignoring invalid FEEDBACK_RATE_LIMIT '{}'", raw),
            }
        }
        if let Some(url) = lookup("FEEDBACK_URL").filter(|u| !u.trim().is_empty()) {
            self.client.url = url.trim().trim_end_matches('/').to_string();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.environment, "development");
        assert_eq!(config.server.rate_limit, 100);
        assert!(config.server.cors_origins.is_empty());
        assert_eq!(config.client.url, "http://127.0.0.1:5000");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str("[server]\nport = 8081\n").expect("parse");
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.client, ClientConfig::default());
    }

    #[test]
    fn invalid_toml_is_error() {
        assert!(AppConfig::from_toml_str("[server]\nport = \"lots\"\n").is_err());
    }

    #[test]
    fn env_overrides_file() {
        let mut config = AppConfig::from_toml_str("[server]\nport = 8081\n").expect("parse");
        config.apply_env(env(&[
            ("FEEDBACK_PORT", "9000"),
            ("FEEDBACK_ENV", "production"),
            ("FEEDBACK_CORS_ORIGINS", "https://a.edu, https://b.edu ,"),
            ("FEEDBACK_URL", "http://example.edu/"),
        ]));
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.environment, "production");
        assert_eq!(
            config.server.cors_origins,
            vec!["https://a.edu".to_string(), "https://b.edu".to_string()]
        );
        assert_eq!(config.client.url, "http://example.edu");
    }

    #[test]
    fn invalid_env_values_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[
            ("FEEDBACK_PORT", "not-a-port"),
            ("FEEDBACK_RATE_LIMIT", "-5"),
        ]));
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.rate_limit, 100);
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        assert_eq!(ServerConfig::default().bind_addr(), "127.0.0.1:5000");
    }
}
