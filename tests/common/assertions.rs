//! Custom test assertions

use once_cell::sync::Lazy;
use regex::Regex;
use snapshot_gateway::SignedLink;

static SIGNED_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<base>https?://[^/]+)/collection/(?P<path>[^?]+)\?md5=(?P<md5>[A-Za-z0-9_-]{22})&expires=(?P<expires>\d+)&tier=(?P<tier>[a-z]+)$")
        .unwrap()
});

/// Parsed parts of a signed download URL
#[derive(Debug)]
pub struct SignedUrlParts {
    pub base: String,
    pub path: String,
    pub digest: String,
    pub expires: u64,
    pub tier: String,
}

/// Parse a signed URL, panicking with the URL when it does not match the layout
pub fn parse_signed_url(url: &str) -> SignedUrlParts {
    let caps = SIGNED_URL
        .captures(url)
        .unwrap_or_else(|| panic!("not a signed download URL: {}", url));
    SignedUrlParts {
        base: caps["base"].to_string(),
        path: caps["path"].to_string(),
        digest: caps["md5"].to_string(),
        expires: caps["expires"].parse().unwrap(),
        tier: caps["tier"].to_string(),
    }
}

/// Assert the link's URL agrees with its own fields
pub fn assert_link_consistent(link: &SignedLink) {
    let parts = parse_signed_url(&link.url);
    assert_eq!(parts.expires, link.expires_at_epoch_seconds);
    assert_eq!(parts.tier, link.tier.to_string());
}
