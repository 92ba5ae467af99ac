//! gatherctl — offline kubectl-style queries over must-gather snapshots
//!
//! Operates against a directory tree of previously captured cluster-resource
//! manifests instead of a live API server. The resolution core (alias tables,
//! CRD discovery, argument parsing) lives in the `gatherctl-resolver` crate;
//! this crate adds the CLI, persisted configuration, and snapshot file
//! lookup.

pub mod cli;
pub mod config;
pub mod snapshot;

pub use config::Config;
pub use snapshot::Snapshot;

pub use gatherctl_resolver::{
    parse, KindResolver, Query, QueryError, ResourceCatalog, ResourceIdentity,
};
