//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.
//! All factories create real objects, not mocks.

use assetdesk::auth::{MemoryAuthChannel, PermissionMatrix};
use assetdesk::config::DirectoryConfig;
use assetdesk::core::catalog::AssetKind;
use assetdesk::core::models::{AssetRecord, AssociateRecord, Principal, Role};
use assetdesk::storage::MemoryStore;
use assetdesk::{CurrentUserContext, SessionServices};
use std::sync::Arc;

/// Factory for creating principals
pub struct PrincipalFactory;

impl PrincipalFactory {
    pub fn admin(id: &str) -> Principal {
        Principal::new(id, Role::Admin)
            .with_display_name(format!("Admin {}", id))
            .with_email(format!("{}@example.com", id))
    }

    pub fn associate(id: &str) -> Principal {
        Principal::new(id, Role::Associate).with_display_name(format!("Associate {}", id))
    }
}

/// Factory for associate directory records
pub struct AssociateFactory;

impl AssociateFactory {
    pub fn owned_by(admin_id: &str, name: &str) -> AssociateRecord {
        let mut record = AssociateRecord::new(admin_id, name);
        record.email = Some(format!("{}@example.com", name.to_lowercase()));
        record
    }
}

/// Factory for asset records
pub struct AssetFactory;

impl AssetFactory {
    pub fn create(kind: AssetKind, associate_id: &str, admin_id: &str) -> AssetRecord {
        AssetRecord {
            kind,
            associate_id: associate_id.to_string(),
            admin_id: admin_id.to_string(),
            client_name: format!("Client of {}", associate_id),
            identifier: format!("{}-{}", kind.slug().to_uppercase(), associate_id),
            renewal_date: None,
        }
    }
}

/// In-memory channel and store with a running session over them
pub struct DeskFixture {
    pub channel: MemoryAuthChannel,
    pub store: MemoryStore,
    pub directory: DirectoryConfig,
    pub context: CurrentUserContext,
}

impl DeskFixture {
    pub fn new() -> Self {
        Self::with_matrix(PermissionMatrix::default())
    }

    pub fn with_matrix(matrix: PermissionMatrix) -> Self {
        let channel = MemoryAuthChannel::new();
        let store = MemoryStore::new();
        let directory = DirectoryConfig::default();
        let services = SessionServices::new()
            .with_auth(Arc::new(channel.clone()))
            .with_store(Arc::new(store.clone()));
        let context = CurrentUserContext::start(services, matrix, directory.clone());
        Self {
            channel,
            store,
            directory,
            context,
        }
    }

    pub fn add_associate(&self, id: &str, admin_id: &str) {
        let record = AssociateFactory::owned_by(admin_id, &id.to_uppercase());
        self.store
            .put(&self.directory.associates_collection, id, &record)
            .expect("associate write");
    }

    pub fn add_asset(&self, id: &str, kind: AssetKind, associate_id: &str, admin_id: &str) {
        let record = AssetFactory::create(kind, associate_id, admin_id);
        self.store
            .put(&self.directory.assets_collection, id, &record)
            .expect("asset write");
    }

    pub fn sign_in_admin(&self, id: &str) {
        self.channel.sign_in(PrincipalFactory::admin(id));
    }

    pub fn sign_in_associate(&self, id: &str) {
        self.channel.sign_in(PrincipalFactory::associate(id));
    }

    pub fn subordinate_ids(&self) -> Vec<String> {
        self.context
            .subordinates()
            .into_iter()
            .map(|associate| associate.id)
            .collect()
    }
}

impl Default for DeskFixture {
    fn default() -> Self {
        Self::new()
    }
}
