//! Authentication and authorization
//!
//! The authentication channel boundary, the identity binding built on it, and
//! the pure hierarchy and permission model consulted by every privileged view.

pub mod channel;
pub mod hierarchy;
pub mod identity;
pub mod memory;
pub mod rbac;

pub use channel::{AuthChannel, AuthListener};
pub use hierarchy::Hierarchy;
pub use identity::{AuthSource, IdentityBinding};
pub use memory::MemoryAuthChannel;
pub use rbac::{Action, Permission, PermissionCheck, PermissionMatrix, Resource};
