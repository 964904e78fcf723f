//! Core data models

pub mod asset;
pub mod directory;
pub mod entity;
pub mod principal;

pub use asset::AssetRecord;
pub use directory::{AdminRecord, AssociateRecord};
pub use entity::Entity;
pub use principal::{Principal, Role};
