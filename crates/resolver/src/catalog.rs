//! Built-in resource alias table and discovered-alias cache

use crate::types::ResourceIdentity;
use std::collections::HashMap;
use std::sync::RwLock;

/// Alias lookup context for one resolution session.
///
/// Holds an immutable table of well-known Kubernetes/OpenShift resource
/// aliases plus a cache of aliases discovered from on-disk
/// CustomResourceDefinitions. Cache entries are never evicted; snapshot
/// contents are assumed immutable for the lifetime of the session.
#[derive(Debug)]
pub struct ResourceCatalog {
    builtin: HashMap<String, ResourceIdentity>,
    discovered: RwLock<HashMap<String, ResourceIdentity>>,
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceCatalog {
    pub fn new() -> Self {
        Self {
            builtin: builtin_table(),
            discovered: RwLock::new(HashMap::new()),
        }
    }

    /// Look up a well-known alias. No side effects.
    pub fn lookup_builtin(&self, alias: &str) -> Option<ResourceIdentity> {
        self.builtin.get(alias).cloned()
    }

    /// Look up a previously discovered alias. No side effects.
    pub fn lookup_cached(&self, alias: &str) -> Option<ResourceIdentity> {
        // Cache writes are idempotent, so a poisoned lock is still readable.
        let cache = self
            .discovered
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.get(alias).cloned()
    }

    /// Record a discovered alias. Idempotent; entries are never removed.
    pub fn remember(&self, alias: &str, identity: ResourceIdentity) {
        let mut cache = self
            .discovered
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.insert(alias.to_string(), identity);
    }
}

/// Register one resource under its plural, singular, and short-name aliases.
///
/// The lower-cased kind equals the singular for every built-in type, so the
/// singular entry covers kind lookups as well.
fn register(
    table: &mut HashMap<String, ResourceIdentity>,
    plural: &str,
    singular: &str,
    group: &str,
    namespaced: bool,
    short_names: &[&str],
) {
    let identity = ResourceIdentity::new(plural, singular, group, namespaced);
    table.insert(plural.to_string(), identity.clone());
    table.insert(singular.to_string(), identity.clone());
    for short in short_names {
        table.insert((*short).to_string(), identity.clone());
    }
}

/// The fixed table of well-known resource types, built once at startup.
fn builtin_table() -> HashMap<String, ResourceIdentity> {
    let mut table = HashMap::new();

    // Core API group, namespaced
    register(&mut table, "pods", "pod", "", true, &["po"]);
    register(&mut table, "services", "service", "", true, &["svc"]);
    register(&mut table, "configmaps", "configmap", "", true, &["cm"]);
    register(&mut table, "secrets", "secret", "", true, &[]);
    register(&mut table, "events", "event", "", true, &["ev"]);
    register(&mut table, "serviceaccounts", "serviceaccount", "", true, &["sa"]);
    register(&mut table, "endpoints", "endpoints", "", true, &["ep"]);
    register(
        &mut table,
        "persistentvolumeclaims",
        "persistentvolumeclaim",
        "",
        true,
        &["pvc"],
    );
    register(&mut table, "resourcequotas", "resourcequota", "", true, &["quota"]);
    register(&mut table, "limitranges", "limitrange", "", true, &["limits"]);
    register(
        &mut table,
        "replicationcontrollers",
        "replicationcontroller",
        "",
        true,
        &["rc"],
    );

    // Core API group, cluster-scoped
    register(&mut table, "nodes", "node", "", false, &["no"]);
    register(&mut table, "namespaces", "namespace", "", false, &["ns"]);
    register(&mut table, "persistentvolumes", "persistentvolume", "", false, &["pv"]);

    // apps
    register(&mut table, "deployments", "deployment", "apps", true, &["deploy"]);
    register(&mut table, "statefulsets", "statefulset", "apps", true, &["sts"]);
    register(&mut table, "daemonsets", "daemonset", "apps", true, &["ds"]);
    register(&mut table, "replicasets", "replicaset", "apps", true, &["rs"]);

    // batch
    register(&mut table, "jobs", "job", "batch", true, &[]);
    register(&mut table, "cronjobs", "cronjob", "batch", true, &["cj"]);

    // networking.k8s.io
    register(&mut table, "ingresses", "ingress", "networking.k8s.io", true, &["ing"]);
    register(
        &mut table,
        "networkpolicies",
        "networkpolicy",
        "networking.k8s.io",
        true,
        &["netpol"],
    );

    // autoscaling
    register(
        &mut table,
        "horizontalpodautoscalers",
        "horizontalpodautoscaler",
        "autoscaling",
        true,
        &["hpa"],
    );

    // policy
    register(
        &mut table,
        "poddisruptionbudgets",
        "poddisruptionbudget",
        "policy",
        true,
        &["pdb"],
    );

    // storage.k8s.io
    register(&mut table, "storageclasses", "storageclass", "storage.k8s.io", false, &["sc"]);

    // rbac.authorization.k8s.io
    register(&mut table, "roles", "role", "rbac.authorization.k8s.io", true, &[]);
    register(
        &mut table,
        "rolebindings",
        "rolebinding",
        "rbac.authorization.k8s.io",
        true,
        &[],
    );
    register(
        &mut table,
        "clusterroles",
        "clusterrole",
        "rbac.authorization.k8s.io",
        false,
        &[],
    );
    register(
        &mut table,
        "clusterrolebindings",
        "clusterrolebinding",
        "rbac.authorization.k8s.io",
        false,
        &[],
    );

    // apiextensions.k8s.io
    register(
        &mut table,
        "customresourcedefinitions",
        "customresourcedefinition",
        "apiextensions.k8s.io",
        false,
        &["crd", "crds"],
    );

    // OpenShift API groups
    register(&mut table, "routes", "route", "route.openshift.io", true, &[]);
    register(
        &mut table,
        "deploymentconfigs",
        "deploymentconfig",
        "apps.openshift.io",
        true,
        &["dc"],
    );
    register(&mut table, "builds", "build", "build.openshift.io", true, &[]);
    register(
        &mut table,
        "buildconfigs",
        "buildconfig",
        "build.openshift.io",
        true,
        &["bc"],
    );
    register(
        &mut table,
        "imagestreams",
        "imagestream",
        "image.openshift.io",
        true,
        &["is"],
    );
    register(
        &mut table,
        "imagestreamtags",
        "imagestreamtag",
        "image.openshift.io",
        true,
        &["istag"],
    );
    register(&mut table, "projects", "project", "project.openshift.io", false, &[]);
    register(
        &mut table,
        "clusterversions",
        "clusterversion",
        "config.openshift.io",
        false,
        &[],
    );
    register(
        &mut table,
        "clusteroperators",
        "clusteroperator",
        "config.openshift.io",
        false,
        &["co"],
    );
    register(
        &mut table,
        "machineconfigs",
        "machineconfig",
        "machineconfiguration.openshift.io",
        false,
        &["mc"],
    );
    register(
        &mut table,
        "machineconfigpools",
        "machineconfigpool",
        "machineconfiguration.openshift.io",
        false,
        &["mcp"],
    );

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_short_name_lookup() {
        let catalog = ResourceCatalog::new();
        let identity = catalog.lookup_builtin("po").unwrap();
        assert_eq!(identity.plural, "pods");
        assert_eq!(identity.singular, "pod");
        assert_eq!(identity.group, "");
        assert!(identity.namespaced);
    }

    #[test]
    fn test_builtin_plural_and_singular_agree() {
        let catalog = ResourceCatalog::new();
        assert_eq!(
            catalog.lookup_builtin("deployments"),
            catalog.lookup_builtin("deployment")
        );
        assert_eq!(
            catalog.lookup_builtin("deployments"),
            catalog.lookup_builtin("deploy")
        );
    }

    #[test]
    fn test_builtin_openshift_kinds() {
        let catalog = ResourceCatalog::new();
        let dc = catalog.lookup_builtin("dc").unwrap();
        assert_eq!(dc.plural, "deploymentconfigs");
        assert_eq!(dc.group, "apps.openshift.io");

        let co = catalog.lookup_builtin("co").unwrap();
        assert_eq!(co.plural, "clusteroperators");
        assert!(!co.namespaced);
    }

    #[test]
    fn test_unknown_alias_misses() {
        let catalog = ResourceCatalog::new();
        assert!(catalog.lookup_builtin("bogus-kind").is_none());
        assert!(catalog.lookup_cached("bogus-kind").is_none());
    }

    #[test]
    fn test_remember_is_idempotent() {
        let catalog = ResourceCatalog::new();
        let identity = ResourceIdentity::new("widgets", "widget", "example.com", true);

        catalog.remember("widget.example.com", identity.clone());
        catalog.remember("widget.example.com", identity.clone());

        assert_eq!(catalog.lookup_cached("widget.example.com"), Some(identity));
    }
}
