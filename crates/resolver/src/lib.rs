//! Resource reference resolution for must-gather snapshots
//!
//! Translates kubectl-compatible resource aliases (kinds, plural/singular
//! forms, short names, group-qualified names, and CRD kinds discovered on
//! disk) into canonical resource identity, and parses `get`/`describe` style
//! argument lists into a structured query.

pub mod args;
pub mod catalog;
pub mod crd;
pub mod error;
pub mod resolver;
pub mod types;

pub use args::{parse, Query, ALL_RESOURCE_TYPES};
pub use catalog::ResourceCatalog;
pub use crd::CustomResourceDescriptor;
pub use error::QueryError;
pub use resolver::{KindResolver, SNAPSHOT_CRD_DIR};
pub use types::ResourceIdentity;
