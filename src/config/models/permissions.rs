//! Permission matrix configuration

use serde::{Deserialize, Serialize};

/// One additional grant on top of the built-in matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrantConfig {
    /// Role name (`admin` or `associate`)
    pub role: String,
    /// Permission written `resource.action`
    pub permission: String,
}

/// Permission matrix configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PermissionsConfig {
    /// Grants added to the built-in matrix
    #[serde(default)]
    pub extra_grants: Vec<GrantConfig>,
}

impl PermissionsConfig {
    /// Merge permission configurations; grants accumulate
    pub fn merge(mut self, other: Self) -> Self {
        for grant in other.extra_grants {
            if !self.extra_grants.contains(&grant) {
                self.extra_grants.push(grant);
            }
        }
        self
    }
}
