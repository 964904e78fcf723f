//! Document store configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Document store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Connect to the document store. When off every binding settles empty.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl StoreConfig {
    /// Merge store configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        self
    }
}
