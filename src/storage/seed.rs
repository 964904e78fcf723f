//! Seed data for the in-process store

use super::memory::MemoryStore;
use crate::config::DirectoryConfig;
use crate::core::models::{AdminRecord, AssetRecord, AssociateRecord, Principal};
use crate::utils::error::{DeskError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

/// Principals known to the auth channel plus the directory and asset documents
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub principals: Vec<Principal>,
    #[serde(default)]
    pub admins: BTreeMap<String, AdminRecord>,
    #[serde(default)]
    pub associates: BTreeMap<String, AssociateRecord>,
    #[serde(default)]
    pub assets: BTreeMap<String, AssetRecord>,
}

impl Seed {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            DeskError::config(format!("Failed to read seed file {:?}: {}", path, e))
        })?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn principal(&self, id: &str) -> Option<&Principal> {
        self.principals.iter().find(|p| p.id == id)
    }

    /// Write every seeded document into `store`
    pub fn apply(&self, store: &MemoryStore, directory: &DirectoryConfig) -> Result<()> {
        for (id, admin) in &self.admins {
            store.put(&directory.admins_collection, id, admin)?;
        }
        for (id, associate) in &self.associates {
            store.put(&directory.associates_collection, id, associate)?;
        }
        for (id, asset) in &self.assets {
            store.put(&directory.assets_collection, id, asset)?;
        }
        info!(
            admins = self.admins.len(),
            associates = self.associates.len(),
            assets = self.assets.len(),
            "Seeded memory store"
        );
        Ok(())
    }
}
