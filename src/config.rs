//! Graph configuration
//!
//! ```yaml
//! directed: false
//! edge_geometry_mode: graph   # or: edge, packed, scattered
//! shape: [512, 512, 128]
//! compress: true
//! ```

use crate::graph::types::GeometryMode;
use crate::persistence::SnapshotOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Construction and persistence settings for a [`Graph`](crate::Graph)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub directed: bool,
    pub edge_geometry_mode: GeometryMode,
    /// Spatial extent of the embedding volume
    pub shape: Option<Vec<usize>>,
    /// Gzip compress saved graph files
    pub compress: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            directed: false,
            edge_geometry_mode: GeometryMode::Packed,
            shape: None,
            compress: true,
        }
    }
}

impl GraphConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&contents)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn snapshot_options(&self) -> SnapshotOptions {
        SnapshotOptions {
            compress: self.compress,
        }
    }
}
