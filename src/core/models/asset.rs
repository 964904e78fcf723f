//! Asset holdings serviced by associates

use crate::core::catalog::AssetKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One insurance policy, fund folio or deposit serviced by an associate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Asset kind
    pub kind: AssetKind,
    /// Servicing associate
    pub associate_id: String,
    /// Administrator owning the servicing associate
    pub admin_id: String,
    /// Client holding the asset
    pub client_name: String,
    /// Policy, folio or account number
    pub identifier: String,
    /// Next renewal or maturity date
    #[serde(default)]
    pub renewal_date: Option<NaiveDate>,
}
