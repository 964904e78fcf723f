//! Top-level desk configuration

use super::*;
use crate::utils::error::{DeskError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

/// Main desk configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeskConfig {
    /// Authentication channel configuration
    #[serde(default)]
    pub auth: AuthConfig,
    /// Document store configuration
    #[serde(default)]
    pub store: StoreConfig,
    /// Directory collection names
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// Permission matrix configuration
    #[serde(default)]
    pub permissions: PermissionsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DeskConfig {
    /// Load configuration from `ASSETDESK_*` environment variables
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment variables");

        let mut config = Self::default();

        if let Ok(enabled) = env::var("ASSETDESK_AUTH_ENABLED") {
            config.auth.enabled = parse_flag("ASSETDESK_AUTH_ENABLED", &enabled)?;
        }
        if let Ok(enabled) = env::var("ASSETDESK_STORE_ENABLED") {
            config.store.enabled = parse_flag("ASSETDESK_STORE_ENABLED", &enabled)?;
        }
        if let Ok(name) = env::var("ASSETDESK_ADMINS_COLLECTION") {
            config.directory.admins_collection = name;
        }
        if let Ok(name) = env::var("ASSETDESK_ASSOCIATES_COLLECTION") {
            config.directory.associates_collection = name;
        }
        if let Ok(name) = env::var("ASSETDESK_ASSETS_COLLECTION") {
            config.directory.assets_collection = name;
        }
        if let Ok(level) = env::var("ASSETDESK_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(json) = env::var("ASSETDESK_LOG_JSON") {
            config.logging.json = parse_flag("ASSETDESK_LOG_JSON", &json)?;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.auth = self.auth.merge(other.auth);
        self.store = self.store.merge(other.store);
        self.directory = self.directory.merge(other.directory);
        self.permissions = self.permissions.merge(other.permissions);
        self.logging = self.logging.merge(other.logging);
        self
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DeskError::config(format!("Invalid {}: {}", name, value))),
    }
}
