//! Permission matrix
//!
//! Total function `(Role, Resource, Action) -> bool`. Anything not explicitly
//! granted is denied. Lookups are in-memory and never fail.

use super::types::{Action, Permission, PermissionCheck, Resource, RoleGrants};
use crate::config::PermissionsConfig;
use crate::core::models::Role;
use crate::utils::error::{DeskError, Result};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Role to grants lookup table
#[derive(Debug, Clone)]
pub struct PermissionMatrix {
    roles: HashMap<Role, RoleGrants>,
}

impl PermissionMatrix {
    /// Default grants plus any configured extras
    pub fn new(config: &PermissionsConfig) -> Result<Self> {
        let mut matrix = Self::default();
        for grant in &config.extra_grants {
            let role: Role = grant.role.parse().map_err(DeskError::config)?;
            let permission: Permission = grant.permission.parse().map_err(DeskError::config)?;
            matrix.grant(role, permission);
        }
        debug!(
            extra_grants = config.extra_grants.len(),
            "Permission matrix initialized"
        );
        Ok(matrix)
    }

    /// Matrix with no grants at all
    pub fn empty() -> Self {
        Self {
            roles: HashMap::new(),
        }
    }

    fn default_grants() -> Vec<RoleGrants> {
        let every_action = Action::ALL;
        let admin = [
            Permission::new(Resource::Admin, Action::View),
            Permission::new(Resource::Admin, Action::Edit),
        ]
        .into_iter()
        .chain(
            every_action
                .into_iter()
                .map(|action| Permission::new(Resource::Associate, action)),
        )
        .chain(Resource::assets().flat_map(|resource| {
            every_action
                .into_iter()
                .map(move |action| Permission::new(resource, action))
        }))
        .collect();

        let associate = [
            Permission::new(Resource::Associate, Action::View),
            Permission::new(Resource::Associate, Action::Edit),
        ]
        .into_iter()
        .chain(Resource::assets().flat_map(|resource| {
            [Action::View, Action::Create, Action::Edit]
                .into_iter()
                .map(move |action| Permission::new(resource, action))
        }))
        .collect();

        vec![
            RoleGrants {
                role: Role::Admin,
                description: "Administrator managing associates and all assets".to_string(),
                permissions: admin,
            },
            RoleGrants {
                role: Role::Associate,
                description: "Associate servicing assets for their clients".to_string(),
                permissions: associate,
            },
        ]
    }

    /// Add one grant
    pub fn grant(&mut self, role: Role, permission: Permission) {
        self.roles
            .entry(role)
            .or_insert_with(|| RoleGrants {
                role,
                description: String::new(),
                permissions: HashSet::new(),
            })
            .permissions
            .insert(permission);
    }

    /// Remove one grant. Returns whether it was present.
    pub fn revoke(&mut self, role: Role, permission: Permission) -> bool {
        self.roles
            .get_mut(&role)
            .is_some_and(|grants| grants.permissions.remove(&permission))
    }

    /// The authorization predicate
    pub fn is_authorized(&self, role: Role, resource: Resource, action: Action) -> bool {
        self.roles
            .get(&role)
            .is_some_and(|grants| grants.permissions.contains(&Permission::new(resource, action)))
    }

    /// String form of the predicate; unrecognized tokens are denied
    pub fn check_named(&self, role: &str, resource: &str, action: &str) -> bool {
        match (
            role.parse::<Role>(),
            resource.parse::<Resource>(),
            action.parse::<Action>(),
        ) {
            (Ok(role), Ok(resource), Ok(action)) => self.is_authorized(role, resource, action),
            _ => false,
        }
    }

    /// Detailed check carrying a denial reason
    pub fn check_detailed(
        &self,
        role: Role,
        resource: Resource,
        action: Action,
    ) -> PermissionCheck {
        if self.is_authorized(role, resource, action) {
            PermissionCheck {
                granted: true,
                role,
                denial_reason: None,
            }
        } else {
            PermissionCheck {
                granted: false,
                role,
                denial_reason: Some(format!(
                    "Role {} lacks permission: {}",
                    role,
                    Permission::new(resource, action)
                )),
            }
        }
    }

    /// Grants of one role, sorted
    pub fn permissions_for(&self, role: Role) -> Vec<Permission> {
        let mut permissions: Vec<Permission> = self
            .roles
            .get(&role)
            .map(|grants| grants.permissions.iter().copied().collect())
            .unwrap_or_default();
        permissions.sort();
        permissions
    }

    pub fn get_role(&self, role: Role) -> Option<&RoleGrants> {
        self.roles.get(&role)
    }
}

impl Default for PermissionMatrix {
    fn default() -> Self {
        let roles = Self::default_grants()
            .into_iter()
            .map(|grants| (grants.role, grants))
            .collect();
        Self { roles }
    }
}
