//! Visibility queries
//!
//! Builders for the collection queries a page binds to. An admin sees the assets
//! of every associate it owns, an associate sees only what it services, and an
//! absent principal sees nothing: the query itself is absent so no remote call is
//! made.

use crate::config::DirectoryConfig;
use crate::core::catalog::AssetKind;
use crate::core::models::{AssetRecord, AssociateRecord, Principal, Role};
use crate::core::subscription::QuerySource;
use crate::storage::{CollectionQuery, DocumentStore};
use std::sync::Arc;

/// Associates owned by `admin_id`, ordered by identifier
pub fn associates_of(directory: &DirectoryConfig, admin_id: &str) -> CollectionQuery {
    CollectionQuery::collection(&directory.associates_collection).where_eq("admin_id", admin_id)
}

/// Assets of `kind` visible to `principal`, ordered by identifier
pub fn assets_visible_to(
    directory: &DirectoryConfig,
    principal: Option<&Principal>,
    kind: AssetKind,
) -> Option<CollectionQuery> {
    let principal = principal?;
    let owner_field = match principal.role {
        Role::Admin => "admin_id",
        Role::Associate => "associate_id",
    };
    Some(
        CollectionQuery::collection(&directory.assets_collection)
            .where_eq("kind", kind.slug())
            .where_eq(owner_field, principal.id.as_str()),
    )
}

/// Source for [`associates_of`]; absent without a store
pub fn associates_source(
    store: Option<&Arc<dyn DocumentStore>>,
    directory: &DirectoryConfig,
    admin_id: &str,
) -> Option<QuerySource<AssociateRecord>> {
    let store = store?;
    Some(QuerySource::new(
        Arc::clone(store),
        associates_of(directory, admin_id),
    ))
}

/// Source for [`assets_visible_to`]; absent without a store or principal
pub fn assets_source(
    store: Option<&Arc<dyn DocumentStore>>,
    directory: &DirectoryConfig,
    principal: Option<&Principal>,
    kind: AssetKind,
) -> Option<QuerySource<AssetRecord>> {
    let store = store?;
    let query = assets_visible_to(directory, principal, kind)?;
    Some(QuerySource::new(Arc::clone(store), query))
}
