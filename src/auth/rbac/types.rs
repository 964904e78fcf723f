//! RBAC type definitions

use crate::core::catalog::AssetKind;
use crate::core::models::Role;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Protectable entity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Administrator profiles
    Admin,
    /// Associate profiles
    Associate,
    /// Holdings of one asset kind
    Asset(AssetKind),
}

impl Resource {
    /// Every resource, asset kinds in catalog order
    pub fn all() -> impl Iterator<Item = Resource> {
        [Resource::Admin, Resource::Associate]
            .into_iter()
            .chain(AssetKind::ALL.into_iter().map(Resource::Asset))
    }

    pub fn assets() -> impl Iterator<Item = Resource> {
        AssetKind::ALL.into_iter().map(Resource::Asset)
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Admin => write!(f, "admin"),
            Resource::Associate => write!(f, "associate"),
            Resource::Asset(kind) => write!(f, "{}", kind),
        }
    }
}

impl std::str::FromStr for Resource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Resource::Admin),
            "associate" => Ok(Resource::Associate),
            other => other
                .parse::<AssetKind>()
                .map(Resource::Asset)
                .map_err(|_| format!("Invalid resource: {}", s)),
        }
    }
}

/// Operation on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::View, Action::Create, Action::Edit, Action::Delete];
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::View => write!(f, "view"),
            Action::Create => write!(f, "create"),
            Action::Edit => write!(f, "edit"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

impl std::str::FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "view" => Ok(Action::View),
            "create" => Ok(Action::Create),
            "edit" => Ok(Action::Edit),
            "delete" => Ok(Action::Delete),
            _ => Err(format!("Invalid action: {}", s)),
        }
    }
}

/// A grantable (resource, action) pair, written `resource.action`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permission {
    pub resource: Resource,
    pub action: Action,
}

impl Permission {
    pub fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.resource, self.action)
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (resource, action) = s
            .rsplit_once('.')
            .ok_or_else(|| format!("Invalid permission: {}", s))?;
        Ok(Self::new(resource.parse()?, action.parse()?))
    }
}

/// Grants held by one role
#[derive(Debug, Clone)]
pub struct RoleGrants {
    pub role: Role,
    pub description: String,
    pub permissions: HashSet<Permission>,
}

/// Permission check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionCheck {
    /// Whether permission is granted
    pub granted: bool,
    /// Role the check was evaluated for
    pub role: Role,
    /// Reason for denial (if not granted)
    pub denial_reason: Option<String>,
}
