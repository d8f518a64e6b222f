//! Origin directory listing decoding
//!
//! The origin serves directory indexes as a JSON array of
//! `{ "name", "type", "mtime", "size" }` objects. `size` is absent for
//! directories, `mtime` is RFC 2822 (`Mon, 01 Jan 2024 00:00:00 GMT`) or
//! RFC 3339.

use crate::core::types::{EntryKind, ObjectEntry};
use crate::utils::error::{GatewayError, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct IndexEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
    mtime: String,
    #[serde(default)]
    size: Option<u64>,
}

/// Parse a listing timestamp
pub fn parse_mtime(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| GatewayError::parsing(format!("Invalid mtime '{}': {}", raw, e)))
}

/// Decode a listing body. Entries that are neither files nor directories
/// (symlinks, sockets) are skipped.
pub fn parse_listing(body: &str) -> Result<Vec<ObjectEntry>> {
    let raw: Vec<IndexEntry> = serde_json::from_str(body)
        .map_err(|e| GatewayError::parsing(format!("Invalid listing payload: {}", e)))?;

    let mut entries = Vec::with_capacity(raw.len());
    for item in raw {
        let kind = match item.kind.as_str() {
            "file" => EntryKind::File,
            "directory" => EntryKind::Directory,
            other => {
                debug!("Skipping listing entry '{}' of type '{}'", item.name, other);
                continue;
            }
        };
        entries.push(ObjectEntry {
            size_bytes: match kind {
                EntryKind::File => item.size.unwrap_or(0),
                EntryKind::Directory => 0,
            },
            modified_at: parse_mtime(&item.mtime)?,
            name: item.name,
            kind,
        });
    }
    Ok(entries)
}
