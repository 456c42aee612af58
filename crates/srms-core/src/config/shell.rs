//! Interactive shell configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings for the terminal front-end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// Whether to colorize output.
    #[serde(default = "default_color")]
    pub color: bool,

    /// File used to persist prompt history between runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,

    /// Cells wider than this are truncated when rendering tables.
    #[serde(default = "default_max_column_width")]
    pub max_column_width: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            history_file: None,
            max_column_width: default_max_column_width(),
        }
    }
}

fn default_color() -> bool {
    true
}

fn default_max_column_width() -> usize {
    32
}
