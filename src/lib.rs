//! Spatial Graph
//!
//! Geometrically embedded multigraphs for vascular and neuronal network
//! analysis: vertices carry coordinates, edges carry polyline geometry, and
//! arbitrary typed attributes live on vertices, edges and the graph itself.
//!
//! # Features
//!
//! - Vertex/edge/graph attribute tables with typed columnar storage
//! - Edge geometry in two interchangeable layouts:
//!   - packed (`graph` mode): flat arrays plus per-edge `[start, end)` ranges
//!   - scattered (`edge` mode): one sample array per edge
//! - Sub-graph extraction with dense renumbering and geometry compaction
//! - Borrowed views that keep ids and ranges untouched
//! - Connected components, isolated vertex/edge removal, spatial slicing
//! - Binary morphology (dilate, erode, open, close) over vertices and edges
//! - Single-file persistence with integrity checking
//!
//! The structural backend is pluggable through [`GraphEngine`];
//! [`AdjacencyEngine`] is the native implementation.
//!
//! ## Example Usage
//!
//! ```rust
//! use ndarray::array;
//! use spatial_graph::{Graph, GeometryMode, COORDINATES};
//!
//! let mut graph = Graph::new();
//! graph.add_vertices(3);
//! graph.add_edges(&[(0, 1), (1, 2)]).unwrap();
//! graph
//!     .set_vertex_coordinates(array![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 1.0, 0.0]])
//!     .unwrap();
//!
//! // Per-edge polylines, stored packed by default
//! graph
//!     .set_edge_geometry(
//!         COORDINATES,
//!         vec![
//!             array![[0.0, 0.0, 0.0], [0.5, 0.1, 0.0], [1.0, 0.0, 0.0]],
//!             array![[1.0, 0.0, 0.0], [2.0, 1.0, 0.0]],
//!         ],
//!     )
//!     .unwrap();
//! assert_eq!(graph.edge_geometry_lengths(COORDINATES).unwrap(), vec![3, 2]);
//!
//! // Keep vertices 1 and 2; geometry is compacted to the surviving edge
//! let sub = graph.sub_graph(Some(&[false, true, true]), None).unwrap();
//! assert_eq!(sub.edge_geometry_flat(COORDINATES).unwrap().nrows(), 2);
//!
//! graph.set_edge_geometry_mode(GeometryMode::Scattered).unwrap();
//! assert!(graph.is_edge_geometry_consistent().unwrap());
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod filter;
pub mod geometry;
pub mod graph;
pub mod morphology;
pub mod persistence;

// Re-export main types for convenience
pub use graph::{
    AdjacencyEngine, Axis, Column, EdgeId, GeometryMode, Graph, GraphEngine, GraphError,
    GraphProperty, GraphResult, GraphView, PropertyKind, PropertyTable, PropertyValue, VertexId,
    ANNOTATION, COORDINATES, RADII, SHAPE,
};

pub use geometry::{EdgeMesh, GeometryRange, GeometryValues};

pub use filter::{EdgeFilterMode, LabelReduction, SliceBound};

pub use morphology::ErosionBoundary;

pub use config::{ConfigError, GraphConfig};

pub use persistence::{PersistenceError, PersistenceResult, SnapshotOptions};

pub use spatial_graph_algorithms::ComponentLabels;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
