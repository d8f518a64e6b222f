//! Storage entry descriptor

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory (a collection at the root level)
    Directory,
}

/// One entry of an origin listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectEntry {
    /// Entry name, without any path prefix
    pub name: String,
    /// Size in bytes; zero for directories
    pub size_bytes: u64,
    /// Last modification time
    pub modified_at: DateTime<Utc>,
    /// File or directory
    pub kind: EntryKind,
}

impl ObjectEntry {
    /// Create a file entry
    pub fn file(name: impl Into<String>, size_bytes: u64, modified_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            modified_at,
            kind: EntryKind::File,
        }
    }

    /// Create a directory entry
    pub fn directory(name: impl Into<String>, modified_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            size_bytes: 0,
            modified_at,
            kind: EntryKind::Directory,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}
