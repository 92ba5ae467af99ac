//! Manifest lookup inside an extracted must-gather tree

use anyhow::{anyhow, Result};
use gatherctl_resolver::ResourceIdentity;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

const CLUSTER_SCOPED_DIR: &str = "cluster-scoped-resources";
const NAMESPACES_DIR: &str = "namespaces";

/// An extracted must-gather directory tree, substituting for a live API
/// server. Purely read-only.
#[derive(Debug, Clone)]
pub struct Snapshot {
    root: PathBuf,
}

impl Snapshot {
    /// Open a snapshot root, verifying it looks like an extracted
    /// must-gather.
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(anyhow!("{} is not a directory", root.display()));
        }
        let cluster_scoped = root.join(CLUSTER_SCOPED_DIR);
        let namespaces = root.join(NAMESPACES_DIR);
        if !cluster_scoped.is_dir() && !namespaces.is_dir() {
            return Err(anyhow!(
                "{} does not look like an extracted must-gather (no {CLUSTER_SCOPED_DIR}/ or {NAMESPACES_DIR}/)",
                root.display()
            ));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Namespaces captured in the snapshot, sorted.
    pub fn namespaces(&self) -> Result<Vec<String>> {
        let dir = self.root.join(NAMESPACES_DIR);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut namespaces = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                namespaces.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        namespaces.sort();
        Ok(namespaces)
    }

    /// Collect the manifest documents for one resource type, optionally
    /// restricted to a namespace and to a set of instance names. An empty
    /// name set selects every instance.
    pub fn collect(
        &self,
        identity: &ResourceIdentity,
        namespace: Option<&str>,
        names: &BTreeSet<String>,
    ) -> Result<Vec<serde_yaml::Value>> {
        let mut documents = Vec::new();

        if identity.namespaced {
            let selected: Vec<String> = match namespace {
                Some(ns) => vec![ns.to_string()],
                None => self.namespaces()?,
            };
            for ns in selected {
                let base = self
                    .root
                    .join(NAMESPACES_DIR)
                    .join(&ns)
                    .join(group_dir(&identity.group));
                self.collect_from(&base, identity, names, &mut documents);
            }
        } else {
            let base = self.root.join(CLUSTER_SCOPED_DIR).join(group_dir(&identity.group));
            self.collect_from(&base, identity, names, &mut documents);
        }

        Ok(documents)
    }

    /// Read documents from `<base>/<plural>.yaml` (a List manifest) and
    /// `<base>/<plural>/*.yaml` (one manifest per instance). Unreadable or
    /// unparsable files are skipped, matching the CRD scan tolerance.
    fn collect_from(
        &self,
        base: &Path,
        identity: &ResourceIdentity,
        names: &BTreeSet<String>,
        documents: &mut Vec<serde_yaml::Value>,
    ) {
        let list_file = base.join(format!("{}.yaml", identity.plural));
        if list_file.is_file() {
            self.read_documents(&list_file, names, documents);
        }

        let instance_dir = base.join(&identity.plural);
        let Ok(entries) = std::fs::read_dir(&instance_dir) else {
            return;
        };
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| {
                p.is_file()
                    && matches!(
                        p.extension().and_then(|e| e.to_str()),
                        Some("yaml") | Some("yml")
                    )
            })
            .collect();
        paths.sort();
        for path in paths {
            self.read_documents(&path, names, documents);
        }
    }

    fn read_documents(
        &self,
        path: &Path,
        names: &BTreeSet<String>,
        documents: &mut Vec<serde_yaml::Value>,
    ) {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                debug!(path = %path.display(), %err, "skipping unreadable manifest");
                return;
            }
        };
        let value: serde_yaml::Value = match serde_yaml::from_str(&content) {
            Ok(value) => value,
            Err(err) => {
                debug!(path = %path.display(), %err, "skipping unparsable manifest");
                return;
            }
        };

        // A List manifest wraps its members in an "items" sequence.
        match value.get("items").and_then(|v| v.as_sequence()) {
            Some(items) => {
                for item in items {
                    if selected(item, names) {
                        documents.push(item.clone());
                    }
                }
            }
            None => {
                if selected(&value, names) {
                    documents.push(value);
                }
            }
        }
    }
}

/// Directory name for an API group within the snapshot tree.
fn group_dir(group: &str) -> &str {
    if group.is_empty() {
        "core"
    } else {
        group
    }
}

/// The metadata.name of a manifest document, when present.
pub fn document_name(document: &serde_yaml::Value) -> Option<&str> {
    document.get("metadata")?.get("name")?.as_str()
}

fn selected(document: &serde_yaml::Value, names: &BTreeSet<String>) -> bool {
    if names.is_empty() {
        return true;
    }
    document_name(document).is_some_and(|name| names.contains(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn pod_manifest(name: &str, namespace: &str) -> String {
        format!(
            r#"apiVersion: v1
kind: Pod
metadata:
  name: {name}
  namespace: {namespace}
spec:
  containers: []
"#
        )
    }

    fn make_snapshot() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();

        let pods = root.join("namespaces/default/core/pods");
        fs::create_dir_all(&pods).unwrap();
        fs::write(pods.join("web-1.yaml"), pod_manifest("web-1", "default")).unwrap();
        fs::write(pods.join("web-2.yaml"), pod_manifest("web-2", "default")).unwrap();

        let other = root.join("namespaces/other/core");
        fs::create_dir_all(&other).unwrap();
        fs::write(
            other.join("pods.yaml"),
            format!(
                "apiVersion: v1\nkind: PodList\nitems:\n{}",
                indent_items(&pod_manifest("api-1", "other"))
            ),
        )
        .unwrap();

        let nodes = root.join("cluster-scoped-resources/core/nodes");
        fs::create_dir_all(&nodes).unwrap();
        fs::write(
            nodes.join("master-0.yaml"),
            "apiVersion: v1\nkind: Node\nmetadata:\n  name: master-0\n",
        )
        .unwrap();

        dir
    }

    fn indent_items(manifest: &str) -> String {
        let mut out = String::new();
        for (i, line) in manifest.lines().enumerate() {
            if i == 0 {
                out.push_str(&format!("  - {line}\n"));
            } else {
                out.push_str(&format!("    {line}\n"));
            }
        }
        out
    }

    fn identity(plural: &str, singular: &str, namespaced: bool) -> ResourceIdentity {
        ResourceIdentity::new(plural, singular, "", namespaced)
    }

    #[test]
    fn test_open_rejects_non_snapshot_directories() {
        let dir = TempDir::new().unwrap();
        assert!(Snapshot::open(dir.path()).is_err());
    }

    #[test]
    fn test_namespaces_are_sorted() {
        let dir = make_snapshot();
        let snapshot = Snapshot::open(dir.path()).unwrap();
        assert_eq!(snapshot.namespaces().unwrap(), vec!["default", "other"]);
    }

    #[test]
    fn test_collect_namespaced_per_instance_files() {
        let dir = make_snapshot();
        let snapshot = Snapshot::open(dir.path()).unwrap();

        let docs = snapshot
            .collect(&identity("pods", "pod", true), Some("default"), &BTreeSet::new())
            .unwrap();
        let names: Vec<_> = docs.iter().filter_map(document_name).collect();
        assert_eq!(names, vec!["web-1", "web-2"]);
    }

    #[test]
    fn test_collect_unwraps_list_manifests() {
        let dir = make_snapshot();
        let snapshot = Snapshot::open(dir.path()).unwrap();

        let docs = snapshot
            .collect(&identity("pods", "pod", true), Some("other"), &BTreeSet::new())
            .unwrap();
        let names: Vec<_> = docs.iter().filter_map(document_name).collect();
        assert_eq!(names, vec!["api-1"]);
    }

    #[test]
    fn test_collect_all_namespaces() {
        let dir = make_snapshot();
        let snapshot = Snapshot::open(dir.path()).unwrap();

        let docs = snapshot
            .collect(&identity("pods", "pod", true), None, &BTreeSet::new())
            .unwrap();
        assert_eq!(docs.len(), 3);
    }

    #[test]
    fn test_collect_filters_by_name() {
        let dir = make_snapshot();
        let snapshot = Snapshot::open(dir.path()).unwrap();

        let names = BTreeSet::from(["web-2".to_string()]);
        let docs = snapshot
            .collect(&identity("pods", "pod", true), Some("default"), &names)
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(document_name(&docs[0]), Some("web-2"));
    }

    #[test]
    fn test_collect_cluster_scoped() {
        let dir = make_snapshot();
        let snapshot = Snapshot::open(dir.path()).unwrap();

        let docs = snapshot
            .collect(&identity("nodes", "node", false), Some("default"), &BTreeSet::new())
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(document_name(&docs[0]), Some("master-0"));
    }

    #[test]
    fn test_unparsable_manifest_is_skipped() {
        let dir = make_snapshot();
        fs::write(
            dir.path().join("namespaces/default/core/pods/broken.yaml"),
            "{not: [valid",
        )
        .unwrap();
        let snapshot = Snapshot::open(dir.path()).unwrap();

        let docs = snapshot
            .collect(&identity("pods", "pod", true), Some("default"), &BTreeSet::new())
            .unwrap();
        assert_eq!(docs.len(), 2);
    }
}
