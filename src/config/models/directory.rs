//! Directory collection names

use super::*;
use serde::{Deserialize, Serialize};

/// Names of the collections holding the directory and assets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default = "default_admins_collection")]
    pub admins_collection: String,
    #[serde(default = "default_associates_collection")]
    pub associates_collection: String,
    #[serde(default = "default_assets_collection")]
    pub assets_collection: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            admins_collection: default_admins_collection(),
            associates_collection: default_associates_collection(),
            assets_collection: default_assets_collection(),
        }
    }
}

impl DirectoryConfig {
    /// Merge directory configurations
    pub fn merge(mut self, other: Self) -> Self {
        if other.admins_collection != default_admins_collection() {
            self.admins_collection = other.admins_collection;
        }
        if other.associates_collection != default_associates_collection() {
            self.associates_collection = other.associates_collection;
        }
        if other.assets_collection != default_assets_collection() {
            self.assets_collection = other.assets_collection;
        }
        self
    }

    /// Validate directory configuration
    pub fn validate(&self) -> Result<(), String> {
        let names = [
            ("admins_collection", &self.admins_collection),
            ("associates_collection", &self.associates_collection),
            ("assets_collection", &self.assets_collection),
        ];
        for (field, name) in names {
            if name.trim().is_empty() {
                return Err(format!("{} cannot be empty", field));
            }
            if name.contains('/') {
                return Err(format!("{} must not contain '/': {}", field, name));
            }
        }
        if self.admins_collection == self.associates_collection {
            return Err("Admins and associates must live in different collections".to_string());
        }
        Ok(())
    }
}
