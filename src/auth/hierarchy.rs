//! Organizational hierarchy
//!
//! Flat two-level tree: every associate has exactly one owning admin, admins own
//! zero or more associates. Edges are keyed by associate identifier, so lookups
//! iterate in ascending identifier order.

use crate::core::models::{AssociateRecord, Entity, Principal, Role};
use std::collections::BTreeMap;

/// In-memory admin-owns-associate edges
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    associates: BTreeMap<String, Entity<AssociateRecord>>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from decoded associate documents. A later duplicate identifier
    /// replaces the earlier edge.
    pub fn from_associates<I>(associates: I) -> Self
    where
        I: IntoIterator<Item = Entity<AssociateRecord>>,
    {
        let mut hierarchy = Self::new();
        for associate in associates {
            hierarchy.insert(associate);
        }
        hierarchy
    }

    /// Add or move an associate. Returns the previous record, if any.
    pub fn insert(
        &mut self,
        associate: Entity<AssociateRecord>,
    ) -> Option<Entity<AssociateRecord>> {
        self.associates.insert(associate.id.clone(), associate)
    }

    pub fn remove(&mut self, associate_id: &str) -> Option<Entity<AssociateRecord>> {
        self.associates.remove(associate_id)
    }

    /// Owning admin of an associate, one hop
    pub fn owner_of(&self, associate_id: &str) -> Option<&str> {
        self.associates
            .get(associate_id)
            .map(|associate| associate.admin_id.as_str())
    }

    /// Associates owned by `principal`, ordered by identifier.
    ///
    /// Empty for an associate, an absent principal, or an admin owning nobody.
    pub fn subordinates_of(&self, principal: Option<&Principal>) -> Vec<Entity<AssociateRecord>> {
        match principal {
            Some(principal) if principal.role == Role::Admin => self
                .associates
                .values()
                .filter(|associate| associate.admin_id == principal.id)
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.associates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.associates.is_empty()
    }
}
