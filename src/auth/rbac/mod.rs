//! Role-Based Access Control (RBAC)
//!
//! Resource and action enumerations and the permission matrix behind every
//! authorization check.

mod matrix;
mod types;

pub use matrix::PermissionMatrix;
pub use types::{Action, Permission, PermissionCheck, Resource, RoleGrants};
