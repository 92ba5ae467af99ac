//! Persisted tool configuration: the selected must-gather and default namespace

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk configuration, stored as YAML in the user config directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Root of the currently selected must-gather tree
    pub path: Option<PathBuf>,

    /// Default namespace applied when a query does not name one
    pub namespace: Option<String>,
}

impl Config {
    /// XDG config directory for gatherctl.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("could not determine config directory"))?
            .join("gatherctl");
        Ok(config_dir)
    }

    fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.yaml"))
    }

    /// Per-user directory of supplementary CRD manifests consulted when a
    /// kind is not found in the snapshot itself.
    pub fn user_crd_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("customresourcedefinitions"))
    }

    /// Load the configuration, returning defaults when no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file()?;
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the configuration, creating the config directory if necessary.
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir)?;
        self.save_to_file(&Self::config_file()?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The selected snapshot root, or an actionable error when none is set.
    pub fn snapshot_path(&self) -> Result<&Path> {
        self.path
            .as_deref()
            .ok_or_else(|| anyhow!("no must-gather selected; run 'gatherctl use <path>' first"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_round_trip() {
        let config = Config {
            path: Some(PathBuf::from("/data/must-gather")),
            namespace: Some("openshift-etcd".to_string()),
        };

        let temp_file = NamedTempFile::new().unwrap();
        config.save_to_file(temp_file.path()).unwrap();

        let loaded = Config::from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.path, config.path);
        assert_eq!(loaded.namespace, config.namespace);
    }

    #[test]
    fn test_snapshot_path_requires_selection() {
        let config = Config::default();
        assert!(config.snapshot_path().is_err());
    }
}
