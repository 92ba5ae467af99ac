//! Parsing of CustomResourceDefinition manifests

use crate::types::ResourceIdentity;
use anyhow::{anyhow, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CrdManifest {
    #[serde(default)]
    kind: String,
    spec: CrdSpec,
}

#[derive(Debug, Deserialize)]
struct CrdSpec {
    group: String,
    #[serde(default)]
    scope: String,
    names: CrdNames,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CrdNames {
    kind: String,
    plural: String,
    #[serde(default)]
    singular: String,
    #[serde(default)]
    short_names: Vec<String>,
}

/// Naming and scope metadata extracted from one CRD manifest.
///
/// Ephemeral: constructed during a directory scan and discarded after
/// producing a `ResourceIdentity`. All names are stored lower-case so
/// matching against normalized aliases is case-insensitive.
#[derive(Debug, Clone)]
pub struct CustomResourceDescriptor {
    pub kind: String,
    pub plural: String,
    pub singular: String,
    pub short_names: Vec<String>,
    pub group: String,
    pub namespaced: bool,
}

impl CustomResourceDescriptor {
    /// Parse a CRD descriptor from YAML document text.
    ///
    /// Fails for non-CRD documents and for CRDs missing the plural name;
    /// callers are expected to skip such files and keep scanning.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let manifest: CrdManifest = serde_yaml::from_str(content)?;

        if manifest.kind != "CustomResourceDefinition" {
            return Err(anyhow!("document kind is {:?}, not a CRD", manifest.kind));
        }
        if manifest.spec.names.plural.is_empty() {
            return Err(anyhow!("CRD missing spec.names.plural"));
        }

        let kind = manifest.spec.names.kind.to_lowercase();
        // Kubernetes defaults a missing singular to the lower-cased kind.
        let singular = if manifest.spec.names.singular.is_empty() {
            kind.clone()
        } else {
            manifest.spec.names.singular.to_lowercase()
        };

        Ok(Self {
            kind,
            plural: manifest.spec.names.plural.to_lowercase(),
            singular,
            short_names: manifest
                .spec
                .names
                .short_names
                .iter()
                .map(|s| s.to_lowercase())
                .collect(),
            group: manifest.spec.group,
            namespaced: manifest.spec.scope == "Namespaced",
        })
    }

    pub fn identity(&self) -> ResourceIdentity {
        ResourceIdentity::new(&self.plural, &self.singular, &self.group, self.namespaced)
    }

    /// Cache key recorded for every scanned CRD: `lower(kind).group`.
    pub fn cache_key(&self) -> String {
        format!("{}.{}", self.kind, self.group)
    }

    /// Match an undotted alias against kind, plural, singular, any short
    /// name, or the exact `singular.group` compound.
    pub fn matches_alias(&self, alias: &str) -> bool {
        self.kind == alias
            || self.plural == alias
            || self.singular == alias
            || self.short_names.iter().any(|s| s == alias)
            || format!("{}.{}", self.singular, self.group) == alias
    }

    /// Match the head of a dotted alias against plural, singular, or any
    /// short name.
    pub fn matches_name(&self, head: &str) -> bool {
        self.plural == head || self.singular == head || self.short_names.iter().any(|s| s == head)
    }
}
