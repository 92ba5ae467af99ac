//! Alias-to-identity resolution with on-disk CRD fallback

use crate::catalog::ResourceCatalog;
use crate::crd::CustomResourceDescriptor;
use crate::error::QueryError;
use crate::types::ResourceIdentity;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Location of cluster-scoped CRD manifests inside an extracted must-gather.
pub const SNAPSHOT_CRD_DIR: &str =
    "cluster-scoped-resources/apiextensions.k8s.io/customresourcedefinitions";

/// Resolves one alias token to a canonical [`ResourceIdentity`].
///
/// Built-in lookups are O(1) and cover the overwhelming majority of queries.
/// Unknown aliases fall back to scanning CRD manifests in the configured
/// directories (snapshot first, then the per-user override location); every
/// CRD seen during a scan is cached so repeated misses amortize.
#[derive(Debug)]
pub struct KindResolver {
    catalog: ResourceCatalog,
    scan_roots: Vec<PathBuf>,
}

impl KindResolver {
    /// Build a resolver scanning the given directories, in order, for CRD
    /// manifests. Roots that do not exist are skipped at scan time.
    pub fn new(scan_roots: Vec<PathBuf>) -> Self {
        Self {
            catalog: ResourceCatalog::new(),
            scan_roots,
        }
    }

    /// Build a resolver for an extracted must-gather tree, with an optional
    /// user-level directory of supplementary CRD definitions.
    pub fn for_snapshot(snapshot_root: &Path, user_crd_dir: Option<PathBuf>) -> Self {
        let mut scan_roots = vec![snapshot_root.join(SNAPSHOT_CRD_DIR)];
        scan_roots.extend(user_crd_dir);
        Self::new(scan_roots)
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// Resolve a lower-case alias to its canonical identity.
    ///
    /// Lookup order: dotted head/group shortcut, built-in table, discovered
    /// cache, then one CRD directory scan per configured root. The caller is
    /// responsible for lower-casing the alias.
    pub fn resolve(&self, alias: &str) -> Result<ResourceIdentity, QueryError> {
        // A dotted alias may be "<name>.<group>" disambiguating resources
        // that share a short name across groups. The registered group must
        // start with the requested group for the shortcut to apply.
        if let Some((head, tail)) = alias.split_once('.') {
            if let Some(identity) = self
                .catalog
                .lookup_builtin(head)
                .or_else(|| self.catalog.lookup_cached(head))
            {
                if identity.group.starts_with(tail) {
                    return Ok(identity);
                }
            }
        }

        if let Some(identity) = self.catalog.lookup_builtin(alias) {
            return Ok(identity);
        }
        if let Some(identity) = self.catalog.lookup_cached(alias) {
            debug!(alias, "alias served from discovered cache");
            return Ok(identity);
        }

        for root in &self.scan_roots {
            if let Some(identity) = self.scan_directory(root, alias) {
                return Ok(identity);
            }
        }

        Err(QueryError::ResourceNotKnown(alias.to_string()))
    }

    /// Scan one directory of CRD manifests for the alias.
    ///
    /// Every parseable CRD is cached under `lower(kind).group` whether or not
    /// it matches; on a match the alias exactly as typed is cached too.
    /// Unparsable documents are skipped without aborting the scan.
    fn scan_directory(&self, root: &Path, alias: &str) -> Option<ResourceIdentity> {
        if !root.is_dir() {
            return None;
        }
        debug!(alias, root = %root.display(), "scanning CRD manifests");

        for entry in WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            match path.extension() {
                Some(ext) if ext == "yaml" || ext == "yml" => {}
                _ => continue,
            }

            let content = match std::fs::read_to_string(path) {
                Ok(content) => content,
                Err(err) => {
                    debug!(path = %path.display(), %err, "skipping unreadable file");
                    continue;
                }
            };
            let descriptor = match CustomResourceDescriptor::from_yaml(&content) {
                Ok(descriptor) => descriptor,
                Err(err) => {
                    debug!(path = %path.display(), %err, "skipping non-CRD document");
                    continue;
                }
            };

            let identity = descriptor.identity();
            self.catalog.remember(&descriptor.cache_key(), identity.clone());

            let matched = match alias.split_once('.') {
                Some((head, tail)) => descriptor.group.starts_with(tail) && descriptor.matches_name(head),
                None => descriptor.matches_alias(alias),
            };
            if matched {
                debug!(alias, path = %path.display(), "alias found in CRD manifest");
                self.catalog.remember(alias, identity.clone());
                return Some(identity);
            }
        }

        debug!(alias, root = %root.display(), "no matching CRD manifest");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_crd(dir: &Path, file: &str, kind: &str, plural: &str, group: &str, scope: &str) {
        let singular = kind.to_lowercase();
        let content = format!(
            r#"apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: {plural}.{group}
spec:
  group: {group}
  scope: {scope}
  names:
    kind: {kind}
    plural: {plural}
    singular: {singular}
    shortNames:
      - {short}
"#,
            short = &plural[..2],
        );
        fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn test_builtin_resolution_needs_no_filesystem() {
        let resolver = KindResolver::new(vec![PathBuf::from("/nonexistent")]);
        let identity = resolver.resolve("po").unwrap();
        assert_eq!(identity.plural, "pods");
        assert_eq!(identity.group, "");
    }

    #[test]
    fn test_dotted_alias_with_matching_group_prefix() {
        let resolver = KindResolver::new(vec![]);
        let identity = resolver.resolve("route.route.openshift.io").unwrap();
        assert_eq!(identity.plural, "routes");

        // A group prefix is enough.
        let identity = resolver.resolve("routes.route").unwrap();
        assert_eq!(identity.group, "route.openshift.io");
    }

    #[test]
    fn test_dotted_alias_with_wrong_group_falls_through() {
        let resolver = KindResolver::new(vec![]);
        let err = resolver.resolve("pods.example.com").unwrap_err();
        assert_eq!(err, QueryError::ResourceNotKnown("pods.example.com".to_string()));
    }

    #[test]
    fn test_unknown_alias_fails() {
        let dir = TempDir::new().unwrap();
        let resolver = KindResolver::new(vec![dir.path().to_path_buf()]);
        let err = resolver.resolve("bogus-kind").unwrap_err();
        assert_eq!(err, QueryError::ResourceNotKnown("bogus-kind".to_string()));
    }

    #[test]
    fn test_crd_discovered_from_disk() {
        let dir = TempDir::new().unwrap();
        write_crd(dir.path(), "widgets.yaml", "Widget", "widgets", "example.com", "Namespaced");

        let resolver = KindResolver::new(vec![dir.path().to_path_buf()]);
        let identity = resolver.resolve("widget").unwrap();
        assert_eq!(identity.plural, "widgets");
        assert_eq!(identity.group, "example.com");
        assert!(identity.namespaced);

        // Short name and dotted forms resolve to the same identity.
        assert_eq!(resolver.resolve("wi").unwrap(), identity);
        assert_eq!(resolver.resolve("widget.example.com").unwrap(), identity);
    }

    #[test]
    fn test_discovery_is_cached_across_calls() {
        let dir = TempDir::new().unwrap();
        write_crd(dir.path(), "widgets.yaml", "Widget", "widgets", "example.com", "Cluster");

        let resolver = KindResolver::new(vec![dir.path().to_path_buf()]);
        let first = resolver.resolve("widgets").unwrap();

        // Removing the manifest proves the second call is a cache hit.
        fs::remove_file(dir.path().join("widgets.yaml")).unwrap();
        let second = resolver.resolve("widgets").unwrap();
        assert_eq!(first, second);
        assert!(!second.namespaced);
    }

    #[test]
    fn test_sibling_crds_are_cached_during_scan() {
        let dir = TempDir::new().unwrap();
        write_crd(dir.path(), "gadgets.yaml", "Gadget", "gadgets", "example.com", "Namespaced");
        write_crd(dir.path(), "widgets.yaml", "Widget", "widgets", "example.com", "Namespaced");

        let resolver = KindResolver::new(vec![dir.path().to_path_buf()]);
        resolver.resolve("widget").unwrap();

        // The non-matching sibling was cached under kind.group along the way.
        assert!(resolver
            .catalog()
            .lookup_cached("gadget.example.com")
            .is_some());
    }

    #[test]
    fn test_corrupt_manifest_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("aaa-broken.yaml"), "{not: [valid").unwrap();
        write_crd(dir.path(), "widgets.yaml", "Widget", "widgets", "example.com", "Namespaced");

        let resolver = KindResolver::new(vec![dir.path().to_path_buf()]);
        assert!(resolver.resolve("widget").is_ok());
    }

    #[test]
    fn test_second_scan_root_is_consulted() {
        let snapshot = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        write_crd(user.path(), "widgets.yaml", "Widget", "widgets", "example.com", "Namespaced");

        let resolver = KindResolver::new(vec![
            snapshot.path().to_path_buf(),
            user.path().to_path_buf(),
        ]);
        assert!(resolver.resolve("widget").is_ok());
    }

    #[test]
    fn test_dotted_alias_against_crd_group_prefix() {
        let dir = TempDir::new().unwrap();
        write_crd(dir.path(), "widgets.yaml", "Widget", "widgets", "example.com", "Namespaced");

        let resolver = KindResolver::new(vec![dir.path().to_path_buf()]);
        assert!(resolver.resolve("widgets.example").is_ok());
        assert!(resolver.resolve("widgets.other.com").is_err());
    }
}
