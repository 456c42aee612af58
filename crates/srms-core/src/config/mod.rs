//! Configuration types for the SRMS console.
//!
//! Configuration is loaded from a single YAML file (`srms.yaml` by default).
//! Every section is optional; a missing file yields [`SrmsConfig::default`].
//!
//! ```yaml
//! upstream:
//!   database_url_env: SRMS_DATABASE_URL
//!   host: localhost
//!   database: srms
//! shell:
//!   color: true
//! logging:
//!   level: warn
//! ```

pub mod logging;
pub mod shell;
pub mod upstream;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use logging::LoggingConfig;
pub use shell::ShellConfig;
pub use upstream::{SslMode, UpstreamConfig};

/// Complete SRMS configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SrmsConfig {
    /// Database connection.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Interactive shell settings.
    #[serde(default)]
    pub shell: ShellConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SrmsConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Load configuration from a file if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }
}
