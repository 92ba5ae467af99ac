//! Resource identity types

use serde::{Deserialize, Serialize};

/// Canonical description of a resource type within one resolution session.
///
/// `(plural, group)` uniquely identifies a resource type; the empty group is
/// the core API group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceIdentity {
    /// Lower-case plural name (e.g. "pods", "deploymentconfigs")
    pub plural: String,

    /// Lower-case singular name
    pub singular: String,

    /// API group, empty string for the core group
    pub group: String,

    /// Whether instances live inside a namespace
    pub namespaced: bool,
}

impl ResourceIdentity {
    pub fn new(plural: &str, singular: &str, group: &str, namespaced: bool) -> Self {
        Self {
            plural: plural.to_string(),
            singular: singular.to_string(),
            group: group.to_string(),
            namespaced,
        }
    }

    /// Canonical `"plural.group"` key ("pods." for the core group).
    pub fn key(&self) -> String {
        format!("{}.{}", self.plural, self.group)
    }
}
