//! Spatial graph façade
//!
//! [`Graph`] combines a structural [`GraphEngine`] with three attribute
//! tables (vertex, edge, graph) and the edge geometry mode. Every structural
//! or attribute mutation invalidates derived caches.

use super::engine::{AdjacencyEngine, GraphEngine, Reindexed};
use super::property::{GraphProperty, PropertyValue};
use super::storage::{Column, PropertyTable};
use super::types::{Axis, EdgeId, GeometryMode, PropertyKind, VertexId};
use crate::config::GraphConfig;
use crate::geometry::mesh::EdgeMesh;
use indexmap::IndexMap;
use ndarray::Array2;
use std::cell::OnceCell;
use std::ops::Range;
use thiserror::Error;
use tracing::debug;

/// Name of the per-element coordinate attribute
pub const COORDINATES: &str = "coordinates";
/// Name of the per-element radius attribute
pub const RADII: &str = "radii";
/// Name of the per-element integer annotation attribute
pub const ANNOTATION: &str = "annotation";
/// Name of the graph-level spatial extent attribute
pub const SHAPE: &str = "shape";

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Vertex {0} not found")]
    VertexNotFound(VertexId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("No {kind} property named '{name}'")]
    PropertyNotFound { kind: PropertyKind, name: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dimension mismatch for {what}: expected {expected}, found {found}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Consistency error: {0}")]
    Consistency(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Spatial graph: topology, attribute tables and edge geometry
#[derive(Debug, Clone)]
pub struct Graph<E: GraphEngine = AdjacencyEngine> {
    pub(crate) engine: E,
    pub(crate) vertex_properties: PropertyTable,
    pub(crate) edge_properties: PropertyTable,
    pub(crate) graph_properties: IndexMap<String, GraphProperty>,
    pub(crate) geometry_mode: GeometryMode,
    pub(crate) mesh_cache: OnceCell<EdgeMesh>,
}

impl<E: GraphEngine> Default for Graph<E> {
    fn default() -> Self {
        Self::with_direction(false)
    }
}

impl Graph<AdjacencyEngine> {
    /// Create a new empty undirected graph on the native engine
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: GraphEngine> Graph<E> {
    pub fn with_direction(directed: bool) -> Self {
        Self::from_engine(E::with_direction(directed))
    }

    /// Create an empty graph from configuration
    pub fn with_config(config: &GraphConfig) -> Self {
        let mut graph = Self::with_direction(config.directed);
        graph.geometry_mode = config.edge_geometry_mode;
        if let Some(shape) = &config.shape {
            graph.set_shape(shape);
        }
        graph
    }

    /// Wrap an existing engine; attribute tables start empty
    pub fn from_engine(engine: E) -> Self {
        Graph {
            vertex_properties: PropertyTable::new(engine.vertex_count()),
            edge_properties: PropertyTable::new(engine.edge_count()),
            graph_properties: IndexMap::new(),
            geometry_mode: GeometryMode::default(),
            mesh_cache: OnceCell::new(),
            engine,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn is_directed(&self) -> bool {
        self.engine.is_directed()
    }

    pub fn n_vertices(&self) -> usize {
        self.engine.vertex_count()
    }

    pub fn n_edges(&self) -> usize {
        self.engine.edge_count()
    }

    pub fn edge_geometry_mode(&self) -> GeometryMode {
        self.geometry_mode
    }

    /// Drop derived data (the edge mesh)
    pub fn invalidate_caches(&mut self) {
        self.mesh_cache.take();
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    pub fn add_vertex(&mut self) -> VertexId {
        self.add_vertices(1).start
    }

    pub fn add_vertices(&mut self, n: usize) -> Range<VertexId> {
        let ids = self.engine.add_vertices(n);
        self.vertex_properties.resize(self.engine.vertex_count());
        self.invalidate_caches();
        ids
    }

    /// Ensure vertex `id` exists, adding vertices up to it as needed
    pub fn add_vertex_with_id(&mut self, id: VertexId) -> VertexId {
        let n = self.n_vertices();
        if id >= n {
            self.add_vertices(id + 1 - n);
        }
        id
    }

    /// Remove a vertex and its incident edges; later ids shift down by one
    pub fn remove_vertex(&mut self, vertex: VertexId) -> GraphResult<()> {
        let reindexed = self.engine.remove_vertex(vertex)?;
        self.apply_reindex(reindexed)?;
        self.resize_edge_geometry()
    }

    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> GraphResult<EdgeId> {
        let edge = self.engine.add_edge(source, target)?;
        self.edge_properties.resize(self.engine.edge_count());
        self.invalidate_caches();
        Ok(edge)
    }

    /// Add several edges; nothing is added if any endpoint is missing
    pub fn add_edges(&mut self, edges: &[(VertexId, VertexId)]) -> GraphResult<Range<EdgeId>> {
        let ids = self.engine.add_edges(edges)?;
        self.edge_properties.resize(self.engine.edge_count());
        self.invalidate_caches();
        Ok(ids)
    }

    /// Remove an edge; later ids shift down by one
    pub fn remove_edge(&mut self, edge: EdgeId) -> GraphResult<()> {
        let reindexed = self.engine.remove_edge(edge)?;
        self.apply_reindex(reindexed)?;
        self.resize_edge_geometry()
    }

    /// First edge joining `source` and `target` (either orientation when undirected)
    pub fn edge(&self, source: VertexId, target: VertexId) -> Option<EdgeId> {
        if !self.engine.has_vertex(source) {
            return None;
        }
        let directed = self.is_directed();
        self.engine
            .out_edges(source)
            .iter()
            .chain(if directed { &[][..] } else { self.engine.in_edges(source) })
            .copied()
            .filter(|&e| match self.engine.endpoints(e) {
                Some((s, t)) => (s == source && t == target) || (!directed && s == target && t == source),
                None => false,
            })
            .min()
    }

    pub fn endpoints(&self, edge: EdgeId) -> GraphResult<(VertexId, VertexId)> {
        self.engine.endpoints(edge).ok_or(GraphError::EdgeNotFound(edge))
    }

    /// `(source, target)` of every edge in id order
    pub fn edge_connectivity(&self) -> Vec<(VertexId, VertexId)> {
        self.engine.edge_list()
    }

    pub fn vertex_degree(&self, vertex: VertexId) -> GraphResult<usize> {
        self.check_vertex(vertex)?;
        Ok(self.engine.degree(vertex))
    }

    /// Total degree of every vertex
    pub fn vertex_degrees(&self) -> Vec<usize> {
        (0..self.n_vertices()).map(|v| self.engine.degree(v)).collect()
    }

    pub fn vertex_out_degrees(&self) -> Vec<usize> {
        (0..self.n_vertices()).map(|v| self.engine.out_degree(v)).collect()
    }

    pub fn vertex_in_degrees(&self) -> Vec<usize> {
        (0..self.n_vertices()).map(|v| self.engine.in_degree(v)).collect()
    }

    pub fn vertex_neighbours(&self, vertex: VertexId) -> GraphResult<Vec<VertexId>> {
        self.check_vertex(vertex)?;
        Ok(self.engine.neighbours(vertex))
    }

    pub fn vertex_out_neighbours(&self, vertex: VertexId) -> GraphResult<Vec<VertexId>> {
        self.check_vertex(vertex)?;
        Ok(self.engine.out_neighbours(vertex))
    }

    pub fn vertex_in_neighbours(&self, vertex: VertexId) -> GraphResult<Vec<VertexId>> {
        self.check_vertex(vertex)?;
        Ok(self.engine.in_neighbours(vertex))
    }

    /// Edges touching a vertex in either direction
    pub fn vertex_edges(&self, vertex: VertexId) -> GraphResult<Vec<EdgeId>> {
        self.check_vertex(vertex)?;
        Ok(self.engine.incident_edges(vertex))
    }

    pub(crate) fn check_vertex(&self, vertex: VertexId) -> GraphResult<()> {
        if self.engine.has_vertex(vertex) {
            Ok(())
        } else {
            Err(GraphError::VertexNotFound(vertex))
        }
    }

    pub(crate) fn check_edge(&self, edge: EdgeId) -> GraphResult<()> {
        if self.engine.has_edge(edge) {
            Ok(())
        } else {
            Err(GraphError::EdgeNotFound(edge))
        }
    }

    /// Swap in a filtered engine and carry the attribute rows along
    pub(crate) fn apply_reindex(&mut self, reindexed: Reindexed<E>) -> GraphResult<()> {
        let Reindexed {
            engine,
            vertex_map,
            edge_map,
        } = reindexed;
        debug!(
            "Reindexing graph: {} -> {} vertices, {} -> {} edges",
            self.n_vertices(),
            vertex_map.len(),
            self.n_edges(),
            edge_map.len()
        );
        self.vertex_properties = self.vertex_properties.select(&vertex_map);
        self.edge_properties = self.edge_properties.select(&edge_map);
        self.engine = engine;
        self.invalidate_caches();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Vertex and edge attribute tables
    // ------------------------------------------------------------------

    fn table(&self, kind: PropertyKind) -> GraphResult<&PropertyTable> {
        match kind {
            PropertyKind::Vertex => Ok(&self.vertex_properties),
            PropertyKind::Edge => Ok(&self.edge_properties),
            PropertyKind::Graph => Err(GraphError::InvalidArgument(
                "graph properties are not stored per element".to_string(),
            )),
        }
    }

    fn table_mut(&mut self, kind: PropertyKind) -> GraphResult<&mut PropertyTable> {
        match kind {
            PropertyKind::Vertex => Ok(&mut self.vertex_properties),
            PropertyKind::Edge => Ok(&mut self.edge_properties),
            PropertyKind::Graph => Err(GraphError::InvalidArgument(
                "graph properties are not stored per element".to_string(),
            )),
        }
    }

    fn check_element(&self, kind: PropertyKind, id: usize) -> GraphResult<()> {
        match kind {
            PropertyKind::Edge => self.check_edge(id),
            _ => self.check_vertex(id),
        }
    }

    pub(crate) fn column(&self, kind: PropertyKind, name: &str) -> GraphResult<&Column> {
        self.table(kind)?
            .column(name)
            .ok_or_else(|| GraphError::PropertyNotFound {
                kind,
                name: name.to_string(),
            })
    }

    fn value(&self, kind: PropertyKind, name: &str, id: usize) -> GraphResult<PropertyValue> {
        let column = self.column(kind, name)?;
        self.check_element(kind, id)?;
        column.get(id).ok_or_else(|| GraphError::Consistency(format!(
            "{} property '{}' has no row {}",
            kind, name, id
        )))
    }

    /// Replace (`must_exist`) or create-or-replace a whole column
    pub(crate) fn put_column(
        &mut self,
        kind: PropertyKind,
        name: &str,
        column: Column,
        must_exist: bool,
    ) -> GraphResult<()> {
        let table = self.table_mut(kind)?;
        if must_exist && !table.contains(name) {
            return Err(GraphError::PropertyNotFound {
                kind,
                name: name.to_string(),
            });
        }
        table.insert(name, column)?;
        self.invalidate_caches();
        Ok(())
    }

    fn put_value(
        &mut self,
        kind: PropertyKind,
        name: &str,
        id: usize,
        value: PropertyValue,
        must_exist: bool,
    ) -> GraphResult<()> {
        self.check_element(kind, id)?;
        let table = self.table_mut(kind)?;
        if must_exist {
            table
                .set_value(name, id, value)
                .unwrap_or_else(|| Err(GraphError::PropertyNotFound {
                    kind,
                    name: name.to_string(),
                }))?;
        } else {
            table.define_value(name, id, value)?;
        }
        self.invalidate_caches();
        Ok(())
    }

    pub(crate) fn take_column(&mut self, kind: PropertyKind, name: &str) -> GraphResult<Column> {
        let column = self
            .table_mut(kind)?
            .remove(name)
            .ok_or_else(|| GraphError::PropertyNotFound {
                kind,
                name: name.to_string(),
            })?;
        self.invalidate_caches();
        Ok(column)
    }

    pub fn vertex_property(&self, name: &str) -> GraphResult<&Column> {
        self.column(PropertyKind::Vertex, name)
    }

    pub fn vertex_property_value(&self, name: &str, vertex: VertexId) -> GraphResult<PropertyValue> {
        self.value(PropertyKind::Vertex, name, vertex)
    }

    /// Replace an existing vertex property
    pub fn set_vertex_property(&mut self, name: &str, values: impl Into<Column>) -> GraphResult<()> {
        self.put_column(PropertyKind::Vertex, name, values.into(), true)
    }

    pub fn set_vertex_property_value(
        &mut self,
        name: &str,
        vertex: VertexId,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        self.put_value(PropertyKind::Vertex, name, vertex, value.into(), true)
    }

    /// Create or replace a vertex property
    pub fn define_vertex_property(&mut self, name: &str, values: impl Into<Column>) -> GraphResult<()> {
        self.put_column(PropertyKind::Vertex, name, values.into(), false)
    }

    /// Set one element, creating the property with defaults if needed
    pub fn define_vertex_property_value(
        &mut self,
        name: &str,
        vertex: VertexId,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        self.put_value(PropertyKind::Vertex, name, vertex, value.into(), false)
    }

    pub fn remove_vertex_property(&mut self, name: &str) -> GraphResult<Column> {
        self.take_column(PropertyKind::Vertex, name)
    }

    pub fn has_vertex_property(&self, name: &str) -> bool {
        self.vertex_properties.contains(name)
    }

    pub fn vertex_property_names(&self) -> Vec<String> {
        self.vertex_properties.names().map(str::to_string).collect()
    }

    pub fn vertex_properties(&self) -> &PropertyTable {
        &self.vertex_properties
    }

    pub fn edge_property(&self, name: &str) -> GraphResult<&Column> {
        self.column(PropertyKind::Edge, name)
    }

    pub fn edge_property_value(&self, name: &str, edge: EdgeId) -> GraphResult<PropertyValue> {
        self.value(PropertyKind::Edge, name, edge)
    }

    /// Replace an existing edge property
    pub fn set_edge_property(&mut self, name: &str, values: impl Into<Column>) -> GraphResult<()> {
        self.put_column(PropertyKind::Edge, name, values.into(), true)
    }

    pub fn set_edge_property_value(
        &mut self,
        name: &str,
        edge: EdgeId,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        self.put_value(PropertyKind::Edge, name, edge, value.into(), true)
    }

    /// Create or replace an edge property
    pub fn define_edge_property(&mut self, name: &str, values: impl Into<Column>) -> GraphResult<()> {
        self.put_column(PropertyKind::Edge, name, values.into(), false)
    }

    pub fn define_edge_property_value(
        &mut self,
        name: &str,
        edge: EdgeId,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        self.put_value(PropertyKind::Edge, name, edge, value.into(), false)
    }

    pub fn remove_edge_property(&mut self, name: &str) -> GraphResult<Column> {
        self.take_column(PropertyKind::Edge, name)
    }

    pub fn has_edge_property(&self, name: &str) -> bool {
        self.edge_properties.contains(name)
    }

    pub fn edge_property_names(&self) -> Vec<String> {
        self.edge_properties.names().map(str::to_string).collect()
    }

    pub fn edge_properties(&self) -> &PropertyTable {
        &self.edge_properties
    }

    // ------------------------------------------------------------------
    // Graph attribute table
    // ------------------------------------------------------------------

    pub fn graph_property(&self, name: &str) -> GraphResult<&GraphProperty> {
        self.graph_properties
            .get(name)
            .ok_or_else(|| GraphError::PropertyNotFound {
                kind: PropertyKind::Graph,
                name: name.to_string(),
            })
    }

    /// Replace an existing graph property
    pub fn set_graph_property(&mut self, name: &str, value: impl Into<GraphProperty>) -> GraphResult<()> {
        match self.graph_properties.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                self.invalidate_caches();
                Ok(())
            }
            None => Err(GraphError::PropertyNotFound {
                kind: PropertyKind::Graph,
                name: name.to_string(),
            }),
        }
    }

    /// Create or replace a graph property
    pub fn define_graph_property(&mut self, name: &str, value: impl Into<GraphProperty>) {
        self.graph_properties.insert(name.to_string(), value.into());
        self.invalidate_caches();
    }

    pub fn remove_graph_property(&mut self, name: &str) -> GraphResult<GraphProperty> {
        let removed = self
            .graph_properties
            .shift_remove(name)
            .ok_or_else(|| GraphError::PropertyNotFound {
                kind: PropertyKind::Graph,
                name: name.to_string(),
            })?;
        self.invalidate_caches();
        Ok(removed)
    }

    pub fn has_graph_property(&self, name: &str) -> bool {
        self.graph_properties.contains_key(name)
    }

    pub fn graph_property_names(&self) -> Vec<String> {
        self.graph_properties.keys().cloned().collect()
    }

    pub fn graph_properties(&self) -> &IndexMap<String, GraphProperty> {
        &self.graph_properties
    }

    // ------------------------------------------------------------------
    // Named spatial accessors
    // ------------------------------------------------------------------

    /// Spatial extent of the graph, if recorded
    pub fn shape(&self) -> Option<Vec<usize>> {
        self.graph_properties
            .get(SHAPE)
            .and_then(GraphProperty::as_value)
            .and_then(PropertyValue::as_integer_vector)
            .map(|s| s.iter().map(|&d| d.max(0) as usize).collect())
    }

    pub fn set_shape(&mut self, shape: &[usize]) {
        let shape: Vec<i64> = shape.iter().map(|&d| d as i64).collect();
        self.define_graph_property(SHAPE, PropertyValue::IntegerVector(shape));
    }

    /// Spatial dimension: length of `shape`, else coordinate width, else 3
    pub fn ndim(&self) -> usize {
        if let Some(shape) = self.shape() {
            return shape.len();
        }
        self.vertex_coordinates().map(|c| c.ncols()).unwrap_or(3)
    }

    pub fn vertex_coordinates(&self) -> GraphResult<&Array2<f64>> {
        let column = self.vertex_property(COORDINATES)?;
        column.as_float_vectors().ok_or_else(|| {
            GraphError::InvalidArgument(format!(
                "vertex coordinates must be a float vector column, found {}",
                column.type_name()
            ))
        })
    }

    pub fn vertex_coordinate(&self, vertex: VertexId) -> GraphResult<Vec<f64>> {
        self.check_vertex(vertex)?;
        Ok(self.vertex_coordinates()?.row(vertex).to_vec())
    }

    /// One coordinate component of every vertex
    pub fn vertex_coordinates_axis(&self, axis: impl Into<Axis>) -> GraphResult<Vec<f64>> {
        let Axis(axis) = axis.into();
        let coordinates = self.vertex_coordinates()?;
        if axis >= coordinates.ncols() {
            return Err(GraphError::InvalidArgument(format!(
                "axis {} out of range for {}-d coordinates",
                axis,
                coordinates.ncols()
            )));
        }
        Ok(coordinates.column(axis).to_vec())
    }

    pub fn set_vertex_coordinates(&mut self, coordinates: Array2<f64>) -> GraphResult<()> {
        self.define_vertex_property(COORDINATES, coordinates)
    }

    pub fn has_vertex_coordinates(&self) -> bool {
        self.has_vertex_property(COORDINATES)
    }

    pub fn has_vertex_radii(&self) -> bool {
        self.has_vertex_property(RADII)
    }

    pub fn has_vertex_annotation(&self) -> bool {
        self.has_vertex_property(ANNOTATION)
    }

    pub fn has_edge_radii(&self) -> bool {
        self.has_edge_property(RADII)
    }

    pub fn has_edge_annotation(&self) -> bool {
        self.has_edge_property(ANNOTATION)
    }

    pub fn vertex_radii(&self) -> GraphResult<&[f64]> {
        float_scalars(self.vertex_property(RADII)?, "vertex radii")
    }

    pub fn set_vertex_radii(&mut self, radii: Vec<f64>) -> GraphResult<()> {
        self.define_vertex_property(RADII, radii)
    }

    pub fn vertex_annotation(&self) -> GraphResult<&[i64]> {
        integer_scalars(self.vertex_property(ANNOTATION)?, "vertex annotation")
    }

    pub fn set_vertex_annotation(&mut self, annotation: Vec<i64>) -> GraphResult<()> {
        self.define_vertex_property(ANNOTATION, annotation)
    }

    /// Per-edge coordinates (e.g. edge midpoints), separate from edge geometry
    pub fn edge_coordinates(&self) -> GraphResult<&Array2<f64>> {
        let column = self.edge_property(COORDINATES)?;
        column.as_float_vectors().ok_or_else(|| {
            GraphError::InvalidArgument(format!(
                "edge coordinates must be a float vector column, found {}",
                column.type_name()
            ))
        })
    }

    pub fn set_edge_coordinates(&mut self, coordinates: Array2<f64>) -> GraphResult<()> {
        self.define_edge_property(COORDINATES, coordinates)
    }

    pub fn has_edge_coordinates(&self) -> bool {
        self.has_edge_property(COORDINATES)
    }

    pub fn edge_radii(&self) -> GraphResult<&[f64]> {
        float_scalars(self.edge_property(RADII)?, "edge radii")
    }

    pub fn set_edge_radii(&mut self, radii: Vec<f64>) -> GraphResult<()> {
        self.define_edge_property(RADII, radii)
    }

    pub fn edge_annotation(&self) -> GraphResult<&[i64]> {
        integer_scalars(self.edge_property(ANNOTATION)?, "edge annotation")
    }

    pub fn set_edge_annotation(&mut self, annotation: Vec<i64>) -> GraphResult<()> {
        self.define_edge_property(ANNOTATION, annotation)
    }
}

fn float_scalars<'a>(column: &'a Column, what: &str) -> GraphResult<&'a [f64]> {
    column.as_floats().ok_or_else(|| {
        GraphError::InvalidArgument(format!("{} must be a float column, found {}", what, column.type_name()))
    })
}

fn integer_scalars<'a>(column: &'a Column, what: &str) -> GraphResult<&'a [i64]> {
    column.as_integers().ok_or_else(|| {
        GraphError::InvalidArgument(format!("{} must be an integer column, found {}", what, column.type_name()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn path(n: usize) -> Graph {
        let mut graph = Graph::new();
        graph.add_vertices(n);
        let edges: Vec<_> = (1..n).map(|i| (i - 1, i)).collect();
        graph.add_edges(&edges).unwrap();
        graph
    }

    #[test]
    fn test_add_vertices_and_edges() {
        let mut graph = Graph::new();
        assert_eq!(graph.add_vertices(3), 0..3);
        assert_eq!(graph.add_edge(0, 1), Ok(0));
        assert_eq!(graph.add_edge(1, 5), Err(GraphError::VertexNotFound(5)));
        assert_eq!(graph.n_vertices(), 3);
        assert_eq!(graph.n_edges(), 1);
        assert!(!graph.is_directed());
    }

    #[test]
    fn test_add_vertex_with_id_grows() {
        let mut graph = Graph::new();
        graph.add_vertex_with_id(4);
        assert_eq!(graph.n_vertices(), 5);
        graph.add_vertex_with_id(2);
        assert_eq!(graph.n_vertices(), 5);
    }

    #[test]
    fn test_edge_lookup() {
        let graph = path(3);
        assert_eq!(graph.edge(0, 1), Some(0));
        assert_eq!(graph.edge(1, 0), Some(0));
        assert_eq!(graph.edge(0, 2), None);

        let mut directed: Graph = Graph::with_direction(true);
        directed.add_vertices(2);
        directed.add_edge(0, 1).unwrap();
        assert_eq!(directed.edge(0, 1), Some(0));
        assert_eq!(directed.edge(1, 0), None);
    }

    #[test]
    fn test_property_get_set_define() {
        let mut graph = path(3);
        assert!(matches!(
            graph.vertex_property("weight"),
            Err(GraphError::PropertyNotFound { kind: PropertyKind::Vertex, .. })
        ));
        assert!(graph.set_vertex_property("weight", vec![1.0, 2.0, 3.0]).is_err());

        graph.define_vertex_property("weight", vec![1.0, 2.0, 3.0]).unwrap();
        graph.set_vertex_property_value("weight", 1, 5.0).unwrap();
        assert_eq!(graph.vertex_property_value("weight", 1), Ok(PropertyValue::Float(5.0)));
        assert_eq!(
            graph.vertex_property_value("weight", 9),
            Err(GraphError::VertexNotFound(9))
        );

        let err = graph.define_vertex_property("short", vec![1.0]).unwrap_err();
        assert!(matches!(err, GraphError::DimensionMismatch { expected: 3, found: 1, .. }));
    }

    #[test]
    fn test_define_value_creates_defaults() {
        let mut graph = path(3);
        graph.define_edge_property_value("label", 1, 7i64).unwrap();
        assert_eq!(graph.edge_property("label").unwrap().as_integers(), Some(&[0, 7][..]));
    }

    #[test]
    fn test_new_edges_extend_tables() {
        let mut graph = path(3);
        graph.define_edge_property("length", vec![1.0, 2.0]).unwrap();
        graph.add_edge(0, 2).unwrap();
        assert_eq!(graph.edge_property("length").unwrap().as_floats(), Some(&[1.0, 2.0, 0.0][..]));
    }

    #[test]
    fn test_remove_vertex_renumbers() {
        let mut graph = path(4);
        graph.define_vertex_property("id", vec![10i64, 11, 12, 13]).unwrap();
        graph.define_edge_property("id", vec![0i64, 1, 2]).unwrap();

        graph.remove_vertex(1).unwrap();
        assert_eq!(graph.n_vertices(), 3);
        assert_eq!(graph.edge_connectivity(), vec![(1, 2)]);
        assert_eq!(graph.vertex_property("id").unwrap().as_integers(), Some(&[10, 12, 13][..]));
        assert_eq!(graph.edge_property("id").unwrap().as_integers(), Some(&[2][..]));
    }

    #[test]
    fn test_graph_properties() {
        let mut graph = Graph::new();
        assert!(graph.set_graph_property("name", PropertyValue::from("tree")).is_err());
        graph.define_graph_property("name", PropertyValue::from("tree"));
        assert_eq!(
            graph.graph_property("name").unwrap().as_value(),
            Some(&PropertyValue::String("tree".to_string()))
        );
        assert!(graph.remove_graph_property("name").is_ok());
        assert!(!graph.has_graph_property("name"));
    }

    #[test]
    fn test_coordinates_and_shape() {
        let mut graph = path(2);
        assert_eq!(graph.ndim(), 3);
        graph
            .set_vertex_coordinates(array![[0.0, 1.0], [2.0, 3.0]])
            .unwrap();
        assert_eq!(graph.ndim(), 2);
        assert_eq!(graph.vertex_coordinate(1), Ok(vec![2.0, 3.0]));
        assert_eq!(graph.vertex_coordinates_axis("y".parse::<Axis>().unwrap()), Ok(vec![1.0, 3.0]));
        assert!(graph.vertex_coordinates_axis(2usize).is_err());

        assert!(graph.has_vertex_coordinates());
        assert!(!graph.has_vertex_radii());

        graph.set_shape(&[10, 20, 30]);
        assert_eq!(graph.shape(), Some(vec![10, 20, 30]));
        assert_eq!(graph.ndim(), 3);
    }

    #[test]
    fn test_edge_coordinates() {
        let mut graph = path(3);
        assert!(!graph.has_edge_coordinates());
        assert!(matches!(
            graph.edge_coordinates(),
            Err(GraphError::PropertyNotFound { kind: PropertyKind::Edge, .. })
        ));

        graph
            .set_edge_coordinates(array![[0.5, 0.0, 0.0], [1.5, 0.0, 0.0]])
            .unwrap();
        assert!(graph.has_edge_coordinates());
        assert_eq!(graph.edge_coordinates().unwrap(), &array![[0.5, 0.0, 0.0], [1.5, 0.0, 0.0]]);
        assert!(graph.set_edge_coordinates(array![[0.0, 0.0, 0.0]]).is_err());

        graph.define_edge_property(COORDINATES, vec![1.0, 2.0]).unwrap();
        assert!(matches!(graph.edge_coordinates(), Err(GraphError::InvalidArgument(_))));
    }

    #[test]
    fn test_degrees() {
        let mut graph = path(3);
        graph.add_edge(2, 2).unwrap();
        assert_eq!(graph.vertex_degrees(), vec![1, 2, 3]);
        assert_eq!(graph.vertex_edges(2), Ok(vec![1, 2]));
        assert_eq!(graph.vertex_degree(5), Err(GraphError::VertexNotFound(5)));
    }
}
