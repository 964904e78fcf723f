//! Authenticated principal and role types

use serde::{Deserialize, Serialize};

/// Coarse-grained classification of a principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Administrator owning zero or more associates
    Admin,
    /// Associate supervised by exactly one administrator
    Associate,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::Associate];
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Associate => write!(f, "associate"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "associate" => Ok(Role::Associate),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// The authenticated actor.
///
/// Role comes from the authentication channel and is never changed locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Stable identifier
    pub id: String,
    /// Role assigned by the authority of record
    pub role: Role,
    /// Display name
    #[serde(default)]
    pub display_name: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: Option<String>,
}

impl Principal {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            display_name: None,
            email: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Name suitable for display, falling back to the identifier
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }
}
