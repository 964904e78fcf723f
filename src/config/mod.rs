//! Configuration management
//!
//! This module handles loading, validation, and merging of the desk
//! configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{DeskError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    /// Desk configuration
    pub desk: DeskConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DeskError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate YAML configuration
    pub fn from_yaml(content: &str) -> Result<Self> {
        let desk: DeskConfig = serde_yaml::from_str(content)
            .map_err(|e| DeskError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { desk };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let desk = DeskConfig::from_env()?;
        let config = Self { desk };

        config.validate()?;
        Ok(config)
    }

    /// Load a file when given, then apply environment overrides
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Self::from_file(path).await?,
            None => Self::default(),
        };
        let config = base.merge(Self::from_env()?);
        config.validate()?;
        Ok(config)
    }

    pub fn auth(&self) -> &AuthConfig {
        &self.desk.auth
    }

    pub fn store(&self) -> &StoreConfig {
        &self.desk.store
    }

    pub fn directory(&self) -> &DirectoryConfig {
        &self.desk.directory
    }

    pub fn permissions(&self) -> &PermissionsConfig {
        &self.desk.permissions
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.desk.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.desk
            .directory
            .validate()
            .map_err(|e| DeskError::Config(format!("Directory config error: {}", e)))?;

        self.desk
            .logging
            .validate()
            .map_err(|e| DeskError::Config(format!("Logging config error: {}", e)))?;

        crate::auth::PermissionMatrix::new(&self.desk.permissions)
            .map_err(|e| DeskError::Config(format!("Permissions config error: {}", e)))?;

        if !self.desk.auth.enabled {
            warn!("Authentication channel disabled; every session will resolve signed out");
        }
        if !self.desk.store.enabled {
            warn!("Document store disabled; every binding will settle empty");
        }

        Ok(())
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.desk = self.desk.merge(other.desk);
        self
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.desk)
            .map_err(|e| DeskError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
