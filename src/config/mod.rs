//! Configuration module for the image builder
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`IMAGEBUILDER_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use imagebuilder::config::BuilderConfig;
//!
//! let config = BuilderConfig::default();
//! assert_eq!(config.build.provider, "gh");
//!
//! let toml = r#"
//! [build]
//! base_url = "https://hub.example.org"
//! "#;
//! let config: BuilderConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.build.base_url, "https://hub.example.org");
//! ```

pub mod build;
pub mod error;
pub mod logging;
pub mod terminal;

pub use build::BuildServiceConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use terminal::TerminalConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the image builder.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BuilderConfig {
    /// Build service endpoint settings
    pub build: BuildServiceConfig,
    /// Build log geometry
    pub terminal: TerminalConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl BuilderConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                    path: p.to_path_buf(),
                    source,
                })?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse {
                    path: p.to_path_buf(),
                    message: e.to_string(),
                })
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports IMAGEBUILDER_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var("IMAGEBUILDER_BASE_URL") {
            self.build.base_url = base_url;
        }
        if let Ok(token) = std::env::var("IMAGEBUILDER_BUILD_TOKEN") {
            if !token.is_empty() {
                self.build.build_token = Some(token);
            }
        }

        if let Ok(level) = std::env::var("IMAGEBUILDER_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("IMAGEBUILDER_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build.base_url.is_empty() {
            return Err(ConfigError::Validation {
                field: "build.base_url".to_string(),
                message: "URL cannot be empty".to_string(),
            });
        }
        if let Err(e) = reqwest::Url::parse(&self.build.base_url) {
            return Err(ConfigError::Validation {
                field: "build.base_url".to_string(),
                message: e.to_string(),
            });
        }
        if self.build.provider.is_empty() {
            return Err(ConfigError::Validation {
                field: "build.provider".to_string(),
                message: "provider cannot be empty".to_string(),
            });
        }

        if self.terminal.cols == 0 || self.terminal.rows == 0 {
            return Err(ConfigError::Validation {
                field: "terminal".to_string(),
                message: "cols and rows must be non-zero".to_string(),
            });
        }

        Ok(())
    }
}
