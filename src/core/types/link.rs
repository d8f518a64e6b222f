//! Signed download link

use super::tier::AccessTier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A time-limited download URL. Computed on demand; the origin enforces expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedLink {
    /// Full URL including signature, expiry and tier
    pub url: String,
    /// Expiry as seconds since the Unix epoch
    pub expires_at_epoch_seconds: u64,
    /// Tier baked into the signature
    pub tier: AccessTier,
}

impl SignedLink {
    /// Whether the link has expired at `now_epoch_seconds`
    pub fn is_expired_at(&self, now_epoch_seconds: u64) -> bool {
        now_epoch_seconds >= self.expires_at_epoch_seconds
    }
}

impl fmt::Display for SignedLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
