//! Error handling for the desk core
//!
//! This module defines all error types used throughout the crate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for the desk core
pub type Result<T> = std::result::Result<T, DeskError>;

/// Main error type for the desk core
#[derive(Error, Debug)]
pub enum DeskError {
    /// No authentication channel or document store is configured
    #[error("Channel unavailable: {0}")]
    ChannelUnavailable(String),

    /// The store or the authentication channel reported a failure
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// A privileged action was invoked without a granted permission
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DeskError {
    pub fn channel_unavailable<S: Into<String>>(message: S) -> Self {
        Self::ChannelUnavailable(message.into())
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    /// Whether the error is a caller bug rather than a runtime fault
    pub fn is_caller_bug(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

/// Category of a failure reported by a remote channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteErrorKind {
    /// The backend could not be reached
    Unavailable,
    /// The backend refused the read
    PermissionDenied,
    /// The referenced collection or document does not exist
    NotFound,
    /// A payload could not be decoded into the requested type
    Decode,
    /// Anything else the backend reports
    Internal,
}

impl std::fmt::Display for RemoteErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteErrorKind::Unavailable => write!(f, "unavailable"),
            RemoteErrorKind::PermissionDenied => write!(f, "permission_denied"),
            RemoteErrorKind::NotFound => write!(f, "not_found"),
            RemoteErrorKind::Decode => write!(f, "decode"),
            RemoteErrorKind::Internal => write!(f, "internal"),
        }
    }
}

/// Failure delivered by the document store or the authentication channel.
///
/// Cloneable so it can be held inside subscription state and fanned out to
/// several observers.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("Remote error ({kind}): {message}")]
pub struct RemoteError {
    /// Failure category
    pub kind: RemoteErrorKind,
    /// Human readable detail
    pub message: String,
}

impl RemoteError {
    pub fn new<S: Into<String>>(kind: RemoteErrorKind, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::new(RemoteErrorKind::Unavailable, message)
    }

    pub fn permission_denied<S: Into<String>>(message: S) -> Self {
        Self::new(RemoteErrorKind::PermissionDenied, message)
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::new(RemoteErrorKind::NotFound, message)
    }

    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::new(RemoteErrorKind::Decode, message)
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::new(RemoteErrorKind::Internal, message)
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}
