//! Borrowed graph views
//!
//! A [`GraphView`] hides vertices and edges of a graph through masks without
//! copying or renumbering anything. Ids stay those of the base graph and
//! packed geometry ranges keep pointing into the full backing arrays.
//!
//! Views are read-only: the base graph cannot be mutated while a view of it
//! is alive.

use super::engine::{AdjacencyEngine, GraphEngine};
use super::property::PropertyValue;
use super::storage::Column;
use super::store::{Graph, GraphError, GraphResult};
use super::types::{EdgeId, VertexId};
use crate::geometry::GeometryRange;
use ndarray::Array2;

#[derive(Debug, Clone)]
pub struct GraphView<'a, E: GraphEngine = AdjacencyEngine> {
    graph: &'a Graph<E>,
    vertex_mask: Vec<bool>,
    edge_mask: Vec<bool>,
}

impl<'a, E: GraphEngine> GraphView<'a, E> {
    /// Create a view. Edges are visible only when the edge and both its
    /// endpoints pass their masks.
    pub fn new(
        graph: &'a Graph<E>,
        vertex_mask: Option<&[bool]>,
        edge_mask: Option<&[bool]>,
    ) -> GraphResult<Self> {
        let vertex_mask = mask_or_all("vertex filter", graph.n_vertices(), vertex_mask)?;
        let edge_mask = mask_or_all("edge filter", graph.n_edges(), edge_mask)?;
        let edge_mask = graph
            .edge_connectivity()
            .into_iter()
            .zip(edge_mask)
            .map(|((s, t), keep)| keep && vertex_mask[s] && vertex_mask[t])
            .collect();
        Ok(GraphView {
            graph,
            vertex_mask,
            edge_mask,
        })
    }

    /// The graph this view borrows from
    pub fn base(&self) -> &'a Graph<E> {
        self.graph
    }

    pub fn vertex_mask(&self) -> &[bool] {
        &self.vertex_mask
    }

    pub fn edge_mask(&self) -> &[bool] {
        &self.edge_mask
    }

    pub fn n_vertices(&self) -> usize {
        self.vertex_mask.iter().filter(|&&v| v).count()
    }

    pub fn n_edges(&self) -> usize {
        self.edge_mask.iter().filter(|&&e| e).count()
    }

    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertex_mask.get(vertex).copied().unwrap_or(false)
    }

    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edge_mask.get(edge).copied().unwrap_or(false)
    }

    /// Visible vertex ids (base graph numbering)
    pub fn vertices(&self) -> Vec<VertexId> {
        mask_indices(&self.vertex_mask)
    }

    /// Visible edge ids (base graph numbering)
    pub fn edges(&self) -> Vec<EdgeId> {
        mask_indices(&self.edge_mask)
    }

    pub fn edge_connectivity(&self) -> Vec<(VertexId, VertexId)> {
        self.graph
            .edge_connectivity()
            .into_iter()
            .zip(&self.edge_mask)
            .filter(|(_, &keep)| keep)
            .map(|(pair, _)| pair)
            .collect()
    }

    /// Degree counting only visible edges
    pub fn vertex_degree(&self, vertex: VertexId) -> GraphResult<usize> {
        self.check_vertex(vertex)?;
        let engine = self.graph.engine();
        let visible = |edges: &[EdgeId]| edges.iter().filter(|&&e| self.edge_mask[e]).count();
        Ok(visible(engine.out_edges(vertex)) + visible(engine.in_edges(vertex)))
    }

    pub fn vertex_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.vertex_mask.len()];
        for (s, t) in self.edge_connectivity() {
            degrees[s] += 1;
            degrees[t] += 1;
        }
        degrees
            .into_iter()
            .zip(&self.vertex_mask)
            .filter(|(_, &keep)| keep)
            .map(|(d, _)| d)
            .collect()
    }

    /// Values of a vertex property for the visible vertices, in id order
    pub fn vertex_property(&self, name: &str) -> GraphResult<Column> {
        Ok(self.graph.vertex_property(name)?.select(&self.vertices()))
    }

    pub fn vertex_property_value(&self, name: &str, vertex: VertexId) -> GraphResult<PropertyValue> {
        self.check_vertex(vertex)?;
        self.graph.vertex_property_value(name, vertex)
    }

    /// Values of an edge property for the visible edges, in id order
    pub fn edge_property(&self, name: &str) -> GraphResult<Column> {
        Ok(self.graph.edge_property(name)?.select(&self.edges()))
    }

    pub fn edge_property_value(&self, name: &str, edge: EdgeId) -> GraphResult<PropertyValue> {
        self.check_edge(edge)?;
        self.graph.edge_property_value(name, edge)
    }

    /// Geometry of the visible edges, one sample array each
    pub fn edge_geometry(&self, name: &str) -> GraphResult<Vec<Array2<f64>>> {
        let all = self.graph.edge_geometry(name)?;
        Ok(all
            .into_iter()
            .zip(&self.edge_mask)
            .filter(|(_, &keep)| keep)
            .map(|(samples, _)| samples)
            .collect())
    }

    /// Ranges of the visible edges into the unchanged backing arrays
    pub fn edge_geometry_indices(&self) -> GraphResult<Vec<GeometryRange>> {
        let all = self.graph.edge_geometry_indices()?;
        Ok(all
            .into_iter()
            .zip(&self.edge_mask)
            .filter(|(_, &keep)| keep)
            .map(|(range, _)| range)
            .collect())
    }

    /// The full backing array of a geometry attribute
    pub fn edge_geometry_flat(&self, name: &str) -> GraphResult<Array2<f64>> {
        self.graph.edge_geometry_flat(name)
    }

    /// Materialise the view as an owned, renumbered graph
    pub fn to_graph(&self) -> GraphResult<Graph<E>> {
        self.graph
            .sub_graph(Some(&self.vertex_mask), Some(&self.edge_mask))
    }

    fn check_vertex(&self, vertex: VertexId) -> GraphResult<()> {
        if self.contains_vertex(vertex) {
            Ok(())
        } else {
            Err(GraphError::VertexNotFound(vertex))
        }
    }

    fn check_edge(&self, edge: EdgeId) -> GraphResult<()> {
        if self.contains_edge(edge) {
            Ok(())
        } else {
            Err(GraphError::EdgeNotFound(edge))
        }
    }
}

fn mask_or_all(what: &'static str, expected: usize, mask: Option<&[bool]>) -> GraphResult<Vec<bool>> {
    match mask {
        Some(mask) if mask.len() != expected => Err(GraphError::DimensionMismatch {
            what,
            expected,
            found: mask.len(),
        }),
        Some(mask) => Ok(mask.to_vec()),
        None => Ok(vec![true; expected]),
    }
}

fn mask_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter(|(_, &keep)| keep)
        .map(|(i, _)| i)
        .collect()
}
