//! Secure-link signing configuration

use serde::{Deserialize, Serialize};

/// Shared secret and public URL used to build download links
#[derive(Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SigningConfig {
    /// Secret shared with the origin's link verification. Absence is only an
    /// error when a link is actually signed.
    #[serde(default, skip_serializing)]
    pub secret: Option<String>,
    /// Public base URL clients download from; defaults to the origin base URL
    #[serde(default)]
    pub public_base_url: Option<String>,
}

impl SigningConfig {
    /// The secret, treating an empty string as absent
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref().filter(|s| !s.is_empty())
    }
}

impl std::fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("secret", &self.secret().map(|_| "[REDACTED]"))
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}
