//! Sale origin tag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a sale record came from.
///
/// Stored as free text; unknown tags written by the dashboard are preserved
/// as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SaleOrigin {
    /// Ingested from the Lojou payment platform webhook.
    Lojou,
    /// Entered by hand on the dashboard.
    Manual,
    /// Negated copy of an earlier sale.
    Reversal,
    /// Any other tag.
    Other(String),
}

impl SaleOrigin {
    pub fn as_str(&self) -> &str {
        match self {
            SaleOrigin::Lojou => "Lojou",
            SaleOrigin::Manual => "Manual",
            SaleOrigin::Reversal => "Reversão",
            SaleOrigin::Other(tag) => tag,
        }
    }

    /// Parses a stored tag. Never fails.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "Lojou" => SaleOrigin::Lojou,
            "Manual" => SaleOrigin::Manual,
            "Reversão" => SaleOrigin::Reversal,
            other => SaleOrigin::Other(other.to_string()),
        }
    }
}

impl fmt::Display for SaleOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SaleOrigin> for String {
    fn from(origin: SaleOrigin) -> Self {
        origin.as_str().to_string()
    }
}

impl From<String> for SaleOrigin {
    fn from(tag: String) -> Self {
        SaleOrigin::parse(&tag)
    }
}
