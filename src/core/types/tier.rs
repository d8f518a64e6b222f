//! Subscription tiers

use crate::utils::error::GatewayError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Subscription level of the caller.
///
/// The tier name travels inside the signed payload, so the wire form
/// (`free`, `premium`, `unlimited`) is part of the origin contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessTier {
    Free,
    Premium,
    Unlimited,
}

impl AccessTier {
    /// All known tiers, lowest entitlement first
    pub const ALL: [AccessTier; 3] = [AccessTier::Free, AccessTier::Premium, AccessTier::Unlimited];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessTier::Free => "free",
            AccessTier::Premium => "premium",
            AccessTier::Unlimited => "unlimited",
        }
    }

    /// How long a download link issued to this tier stays valid
    pub fn validity_hours(&self) -> u64 {
        match self {
            AccessTier::Free => 12,
            AccessTier::Premium => 24,
            AccessTier::Unlimited => 48,
        }
    }

    /// Position in the entitlement order
    fn entitlement_rank(&self) -> u8 {
        match self {
            AccessTier::Free => 0,
            AccessTier::Premium => 1,
            AccessTier::Unlimited => 2,
        }
    }

    /// Whether this tier includes everything `required` grants
    pub fn includes(&self, required: AccessTier) -> bool {
        *self >= required
    }
}

impl PartialOrd for AccessTier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AccessTier {
    fn cmp(&self, other: &Self) -> Ordering {
        self.entitlement_rank().cmp(&other.entitlement_rank())
    }
}

impl fmt::Display for AccessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessTier {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(AccessTier::Free),
            "premium" => Ok(AccessTier::Premium),
            "unlimited" => Ok(AccessTier::Unlimited),
            other => Err(GatewayError::validation(format!(
                "unknown access tier '{}'",
                other
            ))),
        }
    }
}
