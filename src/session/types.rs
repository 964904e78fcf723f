//! Session state and access decisions

use crate::core::models::Principal;
use serde::{Deserialize, Serialize};

/// Resolution state of the current session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "principal", rename_all = "snake_case")]
pub enum SessionState {
    /// Identity not known yet, or the session was torn down
    #[default]
    Unresolved,
    /// Identity known; `None` when nobody is signed in
    Resolved(Option<Principal>),
}

impl SessionState {
    pub fn is_resolved(&self) -> bool {
        matches!(self, SessionState::Resolved(_))
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            SessionState::Resolved(principal) => principal.as_ref(),
            SessionState::Unresolved => None,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Unresolved => write!(f, "unresolved"),
            SessionState::Resolved(None) => write!(f, "resolved (signed out)"),
            SessionState::Resolved(Some(principal)) => {
                write!(f, "resolved ({} as {})", principal.id, principal.role)
            }
        }
    }
}

/// Why a privileged view was refused.
///
/// Callers render every denial the same way; the variants exist for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Denial {
    Unresolved,
    SignedOut,
    Forbidden,
}

impl std::fmt::Display for Denial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Denial::Unresolved => write!(f, "session not resolved"),
            Denial::SignedOut => write!(f, "not signed in"),
            Denial::Forbidden => write!(f, "permission not granted"),
        }
    }
}

/// Outcome of gating a privileged view
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    Granted(Principal),
    Denied(Denial),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted(_))
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            Access::Granted(principal) => Some(principal),
            Access::Denied(_) => None,
        }
    }
}
