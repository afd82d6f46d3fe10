//! Build log terminal geometry

use serde::{Deserialize, Serialize};

/// Geometry and scrollback of the build log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub cols: u16,
    /// Upper bound on visible rows once a build starts
    pub rows: u16,
    /// Lines retained; image builds can produce a lot of output
    pub scrollback: usize,
    /// Shown before the first build
    pub placeholder: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            cols: 66,
            rows: 16,
            scrollback: 10_000,
            placeholder: "Logs will appear here when image is being built".to_string(),
        }
    }
}
