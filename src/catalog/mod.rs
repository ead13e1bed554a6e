//! Catalog tree and identity models.
//!
//! A sync produces a fresh tree each time; nothing is merged incrementally.
//! Parent-to-child edges own the nodes, `parent_id` is a by-value
//! back-reference for display purposes only.

pub mod client;
pub mod mock;

pub use client::CatalogClient;

use serde::{Deserialize, Serialize};

/// Securable object kinds exposed by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectKind {
    Catalog,
    Schema,
    Table,
    View,
}

impl ObjectKind {
    /// Whether `child` is a legal direct child of this kind.
    ///
    /// The minimal remote mapping returns CATALOG-only trees, so a partially
    /// populated tree is normal; this guard exists for builders of full trees.
    pub fn can_contain(self, child: ObjectKind) -> bool {
        match self {
            ObjectKind::Catalog => child == ObjectKind::Schema,
            ObjectKind::Schema => matches!(child, ObjectKind::Table | ObjectKind::View),
            ObjectKind::Table | ObjectKind::View => false,
        }
    }
}

/// One entry in the catalog tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub owners: Vec<String>,
    #[serde(default)]
    pub children: Vec<CatalogNode>,
}

impl CatalogNode {
    /// Create a leafless node with no parent or owners.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            parent_id: None,
            owners: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// Principal kinds a request can be filed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentityKind {
    User,
    Group,
}

/// A user or group known to the governance service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "type")]
    pub kind: IdentityKind,
}

/// A workspace reachable from the current deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceEntry {
    pub id: String,
    pub name: String,
    pub url: String,
}
