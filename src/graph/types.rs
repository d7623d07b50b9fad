//! Core type definitions for the spatial graph

use super::store::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vertex identifier, a position in the dense range `[0, n_vertices)`
pub type VertexId = usize;

/// Edge identifier, a position in the dense range `[0, n_edges)`
pub type EdgeId = usize;

/// Storage layout of per-edge geometry
///
/// - `Packed`: one flat array per attribute in the graph table, per-edge
///   `[start, end)` ranges in the `indices` edge attribute.
/// - `Scattered`: one variable-length array per edge, stored as an edge attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeometryMode {
    #[default]
    #[serde(alias = "graph")]
    Packed,
    #[serde(alias = "edge")]
    Scattered,
}

impl GeometryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryMode::Packed => "graph",
            GeometryMode::Scattered => "edge",
        }
    }
}

impl fmt::Display for GeometryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GeometryMode {
    type Err = GraphError;

    /// Accepts the legacy keywords `graph`/`edge` as well as `packed`/`scattered`.
    fn from_str(s: &str) -> GraphResult<Self> {
        match s {
            "graph" | "packed" => Ok(GeometryMode::Packed),
            "edge" | "scattered" => Ok(GeometryMode::Scattered),
            other => Err(GraphError::InvalidArgument(format!(
                "edge geometry mode must be 'graph' or 'edge', got '{}'",
                other
            ))),
        }
    }
}

/// Which attribute table a property lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    Vertex,
    Edge,
    Graph,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKind::Vertex => write!(f, "vertex"),
            PropertyKind::Edge => write!(f, "edge"),
            PropertyKind::Graph => write!(f, "graph"),
        }
    }
}

/// Spatial axis selector, either by name (`x`, `y`, `z`) or by index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis(pub usize);

impl FromStr for Axis {
    type Err = GraphError;

    fn from_str(s: &str) -> GraphResult<Self> {
        match s {
            "x" => Ok(Axis(0)),
            "y" => Ok(Axis(1)),
            "z" => Ok(Axis(2)),
            other => other
                .parse::<usize>()
                .map(Axis)
                .map_err(|_| GraphError::InvalidArgument(format!("invalid axis '{}'", other))),
        }
    }
}

impl From<usize> for Axis {
    fn from(index: usize) -> Self {
        Axis(index)
    }
}
