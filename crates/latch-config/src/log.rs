//! Activity log read configuration.

use serde::{Deserialize, Serialize};

const fn default_page_size() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LogConfig {
    /// Number of entries returned by `GET /logs` (newest first).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}
