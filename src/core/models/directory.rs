//! Directory records for administrators and associates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Administrator profile stored in the admins collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminRecord {
    /// Display name
    pub name: String,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
}

/// Associate profile stored in the associates collection.
///
/// `admin_id` is the hierarchy edge: the one administrator owning this associate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociateRecord {
    /// Owning administrator
    pub admin_id: String,
    /// Display name
    pub name: String,
    /// Contact email
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// When the associate was enrolled
    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
}

impl AssociateRecord {
    pub fn new(admin_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            admin_id: admin_id.into(),
            name: name.into(),
            email: None,
            phone: None,
            enrolled_at: None,
        }
    }
}
