//! Static catalogs
//!
//! Read-only, process-wide constant data consumed by form rendering: the closed set
//! of asset kinds an associate services and the label of the number that identifies
//! each holding.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Asset kind serviced by associates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Life insurance policy
    LifeInsurance,
    /// Health insurance policy
    HealthInsurance,
    /// General (property, travel) insurance policy
    GeneralInsurance,
    /// Motor insurance policy
    MotorInsurance,
    /// Mutual fund folio
    MutualFund,
    /// Fixed deposit account
    FixedDeposit,
}

impl AssetKind {
    /// Every asset kind, in catalog order
    pub const ALL: [AssetKind; 6] = [
        AssetKind::LifeInsurance,
        AssetKind::HealthInsurance,
        AssetKind::GeneralInsurance,
        AssetKind::MotorInsurance,
        AssetKind::MutualFund,
        AssetKind::FixedDeposit,
    ];

    /// Stable slug used in permission strings and collection names
    pub fn slug(&self) -> &'static str {
        match self {
            AssetKind::LifeInsurance => "life_insurance",
            AssetKind::HealthInsurance => "health_insurance",
            AssetKind::GeneralInsurance => "general_insurance",
            AssetKind::MotorInsurance => "motor_insurance",
            AssetKind::MutualFund => "mutual_fund",
            AssetKind::FixedDeposit => "fixed_deposit",
        }
    }

    pub fn is_insurance(&self) -> bool {
        matches!(
            self,
            AssetKind::LifeInsurance
                | AssetKind::HealthInsurance
                | AssetKind::GeneralInsurance
                | AssetKind::MotorInsurance
        )
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        AssetKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == normalized)
            .ok_or_else(|| format!("Invalid asset kind: {}", s))
    }
}

/// Catalog entry describing how one asset kind is presented
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub kind: AssetKind,
    /// Display label
    pub label: &'static str,
    /// Label of the number identifying a holding of this kind
    pub identifier_label: &'static str,
}

/// Process-wide asset catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::builtin);

impl Catalog {
    /// Shared catalog, initialized once on first use
    pub fn global() -> &'static Catalog {
        &CATALOG
    }

    fn builtin() -> Self {
        let entries = AssetKind::ALL
            .into_iter()
            .map(|kind| {
                let (label, identifier_label) = match kind {
                    AssetKind::LifeInsurance => ("Life Insurance", "Policy number"),
                    AssetKind::HealthInsurance => ("Health Insurance", "Policy number"),
                    AssetKind::GeneralInsurance => ("General Insurance", "Policy number"),
                    AssetKind::MotorInsurance => ("Motor Insurance", "Policy number"),
                    AssetKind::MutualFund => ("Mutual Fund", "Folio number"),
                    AssetKind::FixedDeposit => ("Fixed Deposit", "Account number"),
                };
                CatalogEntry {
                    kind,
                    label,
                    identifier_label,
                }
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn entry(&self, kind: AssetKind) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.kind == kind)
    }
}
