//! Core functionality
//!
//! Domain records, static catalogs, visibility queries and the live subscription
//! primitive every view binds through.

pub mod catalog;
pub mod models;
pub mod queries;
pub mod subscription;

pub use catalog::{AssetKind, Catalog, CatalogEntry};
pub use subscription::{Binding, SubscriptionHandle, SubscriptionState};
