//! Spatial graph data model
//!
//! This module implements:
//! - Dense vertex/edge topology behind the [`GraphEngine`] capability trait
//! - Vertex, edge and graph attribute tables with typed columnar storage
//! - Borrowed, non-renumbering graph views

pub mod engine;
pub mod property;
pub mod storage;
pub mod store;
pub mod types;
pub mod view;

// Re-export main types
pub use engine::{AdjacencyEngine, GraphEngine, Reindexed};
pub use property::{GraphProperty, PropertyValue};
pub use storage::{Column, PropertyTable};
pub use store::{Graph, GraphError, GraphResult, ANNOTATION, COORDINATES, RADII, SHAPE};
pub use types::{Axis, EdgeId, GeometryMode, PropertyKind, VertexId};
pub use view::GraphView;
