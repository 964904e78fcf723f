//! Configuration data models
//!
//! This module defines all configuration structures used throughout the crate.

pub mod auth;
pub mod desk;
pub mod directory;
pub mod logging;
pub mod permissions;
pub mod store;

// Re-export all configuration types
pub use auth::*;
pub use desk::*;
pub use directory::*;
pub use logging::*;
pub use permissions::*;
pub use store::*;

fn default_true() -> bool {
    true
}

/// Default collection of administrator profiles
pub fn default_admins_collection() -> String {
    "admins".to_string()
}

/// Default collection of associate profiles
pub fn default_associates_collection() -> String {
    "associates".to_string()
}

/// Default collection of asset holdings
pub fn default_assets_collection() -> String {
    "assets".to_string()
}

/// Default log filter
pub fn default_log_level() -> String {
    "info".to_string()
}
