//! Log output configuration.

use serde::{Deserialize, Serialize};

/// Settings for `tracing` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `warn` or `srms_gateway=debug,info`.
    /// `SRMS_LOG`, `RUST_LOG` and `--log-level` override it.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}
