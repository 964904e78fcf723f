//! # AssetDesk
//!
//! Client-side core of a desk where administrators supervise associates who
//! service insurance and investment assets.
//!
//! ## Features
//!
//! - **Permission matrix**: fail-closed `(role, resource, action)` predicate
//! - **Hierarchy**: flat admin-owns-associate tree with deterministic ordering
//! - **Live bindings**: one remote subscription per binding, stale events dropped
//! - **Current-user context**: identity, subordinates and gating in one place
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use assetdesk::auth::{Action, MemoryAuthChannel, PermissionMatrix, Resource};
//! use assetdesk::config::DirectoryConfig;
//! use assetdesk::core::models::{Principal, Role};
//! use assetdesk::session::{CurrentUserContext, SessionServices};
//! use assetdesk::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! let channel = MemoryAuthChannel::new();
//! let services = SessionServices::new()
//!     .with_auth(Arc::new(channel.clone()))
//!     .with_store(Arc::new(MemoryStore::new()));
//! let context = CurrentUserContext::start(
//!     services,
//!     PermissionMatrix::default(),
//!     DirectoryConfig::default(),
//! );
//!
//! channel.sign_in(Principal::new("a-1", Role::Admin));
//! assert!(context.is_authorized(Resource::Associate, Action::Create));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod core;
pub mod session;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use session::{Access, CurrentUserContext, Denial, SessionServices, SessionState};
pub use utils::error::{DeskError, RemoteError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
