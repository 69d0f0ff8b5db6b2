//! Door access configuration.

use serde::{Deserialize, Serialize};

fn default_pin() -> String {
    "1234".to_string()
}

/// The static shared secret gating unlock commands.
///
/// This is the whole of the service's authorization model. Deployments are
/// expected to override the default through `LATCHD_ACCESS__PIN` or a config
/// file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccessConfig {
    #[serde(default = "default_pin")]
    pub pin: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            pin: default_pin(),
        }
    }
}

impl AccessConfig {
    /// Whether the deployment still runs with the factory PIN.
    #[must_use]
    pub fn is_factory_pin(&self) -> bool {
        self.pin == default_pin()
    }
}
