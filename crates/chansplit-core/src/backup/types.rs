//! Backup document type definitions
//!
//! # Hierarchy
//! ```text
//! Backup (one exported JSON file)
//! └── channels
//!     ├── categories: [Category { children: [Channel], permissions }]
//!     └── others: [Channel { permissions }]
//! ```
//!
//! Only the fields this tool interprets are modeled; everything else is kept
//! in flattened catch-all maps so entities re-serialize with their original
//! content intact.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The default role that stands for all members
pub const EVERYONE_ROLE: &str = "@everyone";

/// Top-level backup document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backup {
    pub channels: ChannelTree,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// The `channels` section of a backup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelTree {
    pub categories: Vec<Category>,
    pub others: Vec<Channel>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// A grouping container for channels, subject to its own permission overwrites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub children: Vec<Channel>,
    pub permissions: Vec<PermissionOverwrite>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// A single channel; opaque apart from its permission overwrites
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub permissions: Vec<PermissionOverwrite>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// A per-role access rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionOverwrite {
    #[serde(rename = "roleName")]
    pub role_name: String,
    /// String-encoded permission bitmask; compared as a string against "0"
    pub allow: String,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

/// Visibility test against the `@everyone` overwrite.
///
/// No `@everyone` overwrite means public. Otherwise public iff `allow` is
/// anything other than the literal string `"0"`. When a role appears more
/// than once the last overwrite wins, matching map-building semantics.
pub fn is_public(permissions: &[PermissionOverwrite]) -> bool {
    match permissions
        .iter()
        .rev()
        .find(|p| p.role_name == EVERYONE_ROLE)
    {
        Some(everyone) => everyone.allow != "0",
        None => true,
    }
}

impl Category {
    pub fn is_public(&self) -> bool {
        is_public(&self.permissions)
    }

    /// Copy of this category keeping only public children
    pub fn with_public_children(&self) -> Self {
        let mut filtered = self.clone();
        filtered.children.retain(Channel::is_public);
        filtered
    }
}

impl Channel {
    pub fn is_public(&self) -> bool {
        is_public(&self.permissions)
    }
}
