//! Secure-link signing
//!
//! Links follow the origin's `secure_link` contract:
//!
//! ```text
//! digest = base64url_nopad(md5(secret + "/collection" + path + expires + tier))
//! url    = base_url + "/collection" + path + "?md5=" + digest + "&expires=" + expires + "&tier=" + tier
//! ```
//!
//! The field order and digest algorithm must match the origin's verification
//! byte for byte.

use crate::core::types::{AccessTier, SignedLink};
use crate::utils::error::{GatewayError, Result};
use crate::utils::time::SharedClock;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use md5::{Digest, Md5};
use std::fmt;

/// URL prefix under which the origin serves snapshot files
pub const COLLECTION_PREFIX: &str = "/collection";

/// Prefix `path` with `/` if it does not already start with one
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Digest for an already normalized path
pub fn compute_signature(secret: &str, path: &str, expires: u64, tier: AccessTier) -> String {
    let mut hasher = Md5::new();
    hasher.update(secret.as_bytes());
    hasher.update(COLLECTION_PREFIX.as_bytes());
    hasher.update(path.as_bytes());
    hasher.update(expires.to_string().as_bytes());
    hasher.update(tier.as_str().as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}

/// Builds signed download links against a public base URL
#[derive(Clone)]
pub struct LinkSigner {
    secret: Option<String>,
    base_url: String,
    clock: SharedClock,
}

impl LinkSigner {
    /// Create a signer. An empty secret is treated as absent.
    pub fn new(secret: Option<String>, base_url: impl Into<String>, clock: SharedClock) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            secret: secret.filter(|s| !s.is_empty()),
            base_url,
            clock,
        }
    }

    /// Base URL links are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a secret is configured
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    /// Sign `path` for `tier`, valid for `validity_hours` from now
    pub fn sign(&self, path: &str, tier: AccessTier, validity_hours: u64) -> Result<SignedLink> {
        let secret = self
            .secret
            .as_deref()
            .ok_or(GatewayError::MissingSigningSecret)?;

        let path = normalize_path(path);
        let expires = self
            .clock
            .epoch_seconds()
            .saturating_add(validity_hours.saturating_mul(3600));
        let digest = compute_signature(secret, &path, expires, tier);

        Ok(SignedLink {
            url: format!(
                "{}{}{}?md5={}&expires={}&tier={}",
                self.base_url, COLLECTION_PREFIX, path, digest, expires, tier
            ),
            expires_at_epoch_seconds: expires,
            tier,
        })
    }
}

impl fmt::Debug for LinkSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkSigner")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .finish()
    }
}
