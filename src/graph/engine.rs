//! Graph engine capability interface
//!
//! The [`Graph`](super::Graph) façade owns attribute tables and edge geometry;
//! everything structural (vertex/edge existence, adjacency, filtering,
//! component labeling) goes through a [`GraphEngine`]. Any backend implementing
//! this trait can be substituted; [`AdjacencyEngine`] is the native one.

use super::store::{GraphError, GraphResult};
use super::types::{EdgeId, VertexId};
use serde::{Deserialize, Serialize};
use spatial_graph_algorithms::{connected_components, ComponentLabels, CsrTopology};
use std::fmt;
use std::ops::Range;

/// Result of a structural filter: the pruned engine plus, for every surviving
/// vertex and edge, its id in the source engine (new id -> old id).
#[derive(Debug, Clone)]
pub struct Reindexed<E> {
    pub engine: E,
    pub vertex_map: Vec<VertexId>,
    pub edge_map: Vec<EdgeId>,
}

/// Structural operations a graph backend must provide
///
/// Vertex ids are dense `[0, vertex_count)`, edge ids dense `[0, edge_count)`.
/// Removal and filtering renumber densely, preserving relative order.
pub trait GraphEngine: Clone + fmt::Debug {
    /// Create an empty engine
    fn with_direction(directed: bool) -> Self;

    fn is_directed(&self) -> bool;

    fn vertex_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Append `n` vertices, returning their ids
    fn add_vertices(&mut self, n: usize) -> Range<VertexId>;

    /// Append one edge; both endpoints must exist
    fn add_edge(&mut self, source: VertexId, target: VertexId) -> GraphResult<EdgeId>;

    /// Endpoints of an edge
    fn endpoints(&self, edge: EdgeId) -> Option<(VertexId, VertexId)>;

    /// Edge ids leaving a vertex, ascending
    fn out_edges(&self, vertex: VertexId) -> &[EdgeId];

    /// Edge ids entering a vertex, ascending
    fn in_edges(&self, vertex: VertexId) -> &[EdgeId];

    /// Keep vertices where `vertex_mask` is true and edges where `edge_mask`
    /// is true and both endpoints survive. `None` keeps everything.
    fn filter(
        &self,
        vertex_mask: Option<&[bool]>,
        edge_mask: Option<&[bool]>,
    ) -> GraphResult<Reindexed<Self>>;

    /// Append several edges. Fails without adding anything if any endpoint is missing.
    fn add_edges(&mut self, edges: &[(VertexId, VertexId)]) -> GraphResult<Range<EdgeId>> {
        let n = self.vertex_count();
        for &(s, t) in edges {
            if s >= n {
                return Err(GraphError::VertexNotFound(s));
            }
            if t >= n {
                return Err(GraphError::VertexNotFound(t));
            }
        }
        let start = self.edge_count();
        for &(s, t) in edges {
            self.add_edge(s, t)?;
        }
        Ok(start..self.edge_count())
    }

    /// All edges as `(source, target)` pairs in edge id order
    fn edge_list(&self) -> Vec<(VertexId, VertexId)> {
        (0..self.edge_count()).filter_map(|e| self.endpoints(e)).collect()
    }

    fn has_vertex(&self, vertex: VertexId) -> bool {
        vertex < self.vertex_count()
    }

    fn has_edge(&self, edge: EdgeId) -> bool {
        edge < self.edge_count()
    }

    fn out_degree(&self, vertex: VertexId) -> usize {
        self.out_edges(vertex).len()
    }

    fn in_degree(&self, vertex: VertexId) -> usize {
        self.in_edges(vertex).len()
    }

    /// Total number of edge endpoints at a vertex (self loops count twice)
    fn degree(&self, vertex: VertexId) -> usize {
        self.out_degree(vertex) + self.in_degree(vertex)
    }

    /// Edges touching a vertex in either direction, ascending and without duplicates
    fn incident_edges(&self, vertex: VertexId) -> Vec<EdgeId> {
        let mut edges: Vec<EdgeId> = self
            .out_edges(vertex)
            .iter()
            .chain(self.in_edges(vertex))
            .copied()
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    fn out_neighbours(&self, vertex: VertexId) -> Vec<VertexId> {
        self.out_edges(vertex)
            .iter()
            .filter_map(|&e| self.endpoints(e).map(|(_, t)| t))
            .collect()
    }

    fn in_neighbours(&self, vertex: VertexId) -> Vec<VertexId> {
        self.in_edges(vertex)
            .iter()
            .filter_map(|&e| self.endpoints(e).map(|(s, _)| s))
            .collect()
    }

    /// Vertices a label propagates to: successors for directed graphs,
    /// all adjacent vertices for undirected ones.
    fn neighbours(&self, vertex: VertexId) -> Vec<VertexId> {
        let mut neighbours = self.out_neighbours(vertex);
        if !self.is_directed() {
            neighbours.extend(self.in_neighbours(vertex));
        }
        neighbours
    }

    /// Remove one vertex and its incident edges
    fn remove_vertex(&self, vertex: VertexId) -> GraphResult<Reindexed<Self>> {
        if !self.has_vertex(vertex) {
            return Err(GraphError::VertexNotFound(vertex));
        }
        let mask: Vec<bool> = (0..self.vertex_count()).map(|v| v != vertex).collect();
        self.filter(Some(&mask), None)
    }

    /// Remove one edge
    fn remove_edge(&self, edge: EdgeId) -> GraphResult<Reindexed<Self>> {
        if !self.has_edge(edge) {
            return Err(GraphError::EdgeNotFound(edge));
        }
        let mask: Vec<bool> = (0..self.edge_count()).map(|e| e != edge).collect();
        self.filter(None, Some(&mask))
    }

    /// Weakly connected components with per-label vertex counts
    fn label_components(&self) -> ComponentLabels {
        let topology = CsrTopology::from_edges(self.vertex_count(), &self.edge_list());
        connected_components(&topology)
    }
}

/// Native adjacency-list engine
///
/// - edges: EdgeId -> (source, target)
/// - outgoing: VertexId -> Vec<EdgeId> (adjacency list for outgoing edges)
/// - incoming: VertexId -> Vec<EdgeId> (adjacency list for incoming edges)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdjacencyEngine {
    directed: bool,
    edges: Vec<(VertexId, VertexId)>,
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
}

impl AdjacencyEngine {
    /// Build an engine from a vertex count and an edge list
    pub fn from_edges(
        directed: bool,
        vertex_count: usize,
        edges: Vec<(VertexId, VertexId)>,
    ) -> GraphResult<Self> {
        let mut engine = AdjacencyEngine::with_direction(directed);
        engine.add_vertices(vertex_count);
        engine.add_edges(&edges)?;
        Ok(engine)
    }
}

impl GraphEngine for AdjacencyEngine {
    fn with_direction(directed: bool) -> Self {
        AdjacencyEngine {
            directed,
            ..Default::default()
        }
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn vertex_count(&self) -> usize {
        self.outgoing.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn add_vertices(&mut self, n: usize) -> Range<VertexId> {
        let start = self.outgoing.len();
        self.outgoing.resize(start + n, Vec::new());
        self.incoming.resize(start + n, Vec::new());
        start..start + n
    }

    fn add_edge(&mut self, source: VertexId, target: VertexId) -> GraphResult<EdgeId> {
        if !self.has_vertex(source) {
            return Err(GraphError::VertexNotFound(source));
        }
        if !self.has_vertex(target) {
            return Err(GraphError::VertexNotFound(target));
        }
        let edge = self.edges.len();
        self.edges.push((source, target));
        self.outgoing[source].push(edge);
        self.incoming[target].push(edge);
        Ok(edge)
    }

    fn endpoints(&self, edge: EdgeId) -> Option<(VertexId, VertexId)> {
        self.edges.get(edge).copied()
    }

    fn out_edges(&self, vertex: VertexId) -> &[EdgeId] {
        self.outgoing.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    fn in_edges(&self, vertex: VertexId) -> &[EdgeId] {
        self.incoming.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    fn edge_list(&self) -> Vec<(VertexId, VertexId)> {
        self.edges.clone()
    }

    fn filter(
        &self,
        vertex_mask: Option<&[bool]>,
        edge_mask: Option<&[bool]>,
    ) -> GraphResult<Reindexed<Self>> {
        let n = self.vertex_count();
        if let Some(mask) = vertex_mask {
            check_mask("vertex filter", n, mask)?;
        }
        if let Some(mask) = edge_mask {
            check_mask("edge filter", self.edge_count(), mask)?;
        }

        let vertex_map: Vec<VertexId> = (0..n)
            .filter(|&v| vertex_mask.map_or(true, |m| m[v]))
            .collect();
        let mut new_index = vec![None; n];
        for (new, &old) in vertex_map.iter().enumerate() {
            new_index[old] = Some(new);
        }

        let mut edge_map = Vec::new();
        let mut edges = Vec::new();
        for (e, &(s, t)) in self.edges.iter().enumerate() {
            if !edge_mask.map_or(true, |m| m[e]) {
                continue;
            }
            if let (Some(ns), Some(nt)) = (new_index[s], new_index[t]) {
                edge_map.push(e);
                edges.push((ns, nt));
            }
        }

        let engine = AdjacencyEngine::from_edges(self.directed, vertex_map.len(), edges)?;
        Ok(Reindexed {
            engine,
            vertex_map,
            edge_map,
        })
    }
}

fn check_mask(what: &'static str, expected: usize, mask: &[bool]) -> GraphResult<()> {
    if mask.len() != expected {
        return Err(GraphError::DimensionMismatch {
            what,
            expected,
            found: mask.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AdjacencyEngine {
        // 0 -> 1, 1 -> 2, 2 -> 3, 1 -> 3
        AdjacencyEngine::from_edges(false, 5, vec![(0, 1), (1, 2), (2, 3), (1, 3)]).unwrap()
    }

    #[test]
    fn test_add_edge_validation() {
        let mut engine = AdjacencyEngine::with_direction(true);
        engine.add_vertices(2);
        assert_eq!(engine.add_edge(0, 1), Ok(0));
        assert_eq!(engine.add_edge(0, 7), Err(GraphError::VertexNotFound(7)));
        assert_eq!(engine.add_edge(9, 0), Err(GraphError::VertexNotFound(9)));
    }

    #[test]
    fn test_add_edges_is_all_or_nothing() {
        let mut engine = AdjacencyEngine::with_direction(false);
        engine.add_vertices(3);
        let result = engine.add_edges(&[(0, 1), (1, 5)]);
        assert_eq!(result, Err(GraphError::VertexNotFound(5)));
        assert_eq!(engine.edge_count(), 0);
    }

    #[test]
    fn test_adjacency_and_degrees() {
        let engine = sample();
        assert_eq!(engine.out_edges(1), &[1, 3]);
        assert_eq!(engine.in_edges(3), &[2, 3]);
        assert_eq!(engine.degree(1), 3);
        assert_eq!(engine.degree(4), 0);
        assert_eq!(engine.incident_edges(1), vec![0, 1, 3]);

        let mut neighbours = engine.neighbours(1);
        neighbours.sort_unstable();
        assert_eq!(neighbours, vec![0, 2, 3]);
    }

    #[test]
    fn test_directed_neighbours_follow_out_edges() {
        let engine = AdjacencyEngine::from_edges(true, 3, vec![(0, 1), (2, 1)]).unwrap();
        assert_eq!(engine.neighbours(1), Vec::<VertexId>::new());
        assert_eq!(engine.neighbours(0), vec![1]);
    }

    #[test]
    fn test_filter_renumbers_in_order() {
        let engine = sample();
        let mask = [false, true, true, true, false];
        let result = engine.filter(Some(&mask), None).unwrap();

        assert_eq!(result.vertex_map, vec![1, 2, 3]);
        assert_eq!(result.edge_map, vec![1, 2, 3]);
        assert_eq!(result.engine.edge_list(), vec![(0, 1), (1, 2), (0, 2)]);
    }

    #[test]
    fn test_filter_mask_length() {
        let engine = sample();
        let err = engine.filter(Some(&[true]), None).unwrap_err();
        assert!(matches!(err, GraphError::DimensionMismatch { expected: 5, found: 1, .. }));
    }

    #[test]
    fn test_remove_edge_shifts_ids() {
        let engine = sample();
        let result = engine.remove_edge(1).unwrap();
        assert_eq!(result.edge_map, vec![0, 2, 3]);
        assert_eq!(result.engine.edge_list(), vec![(0, 1), (2, 3), (1, 3)]);
        assert_eq!(engine.remove_edge(10).unwrap_err(), GraphError::EdgeNotFound(10));
    }

    #[test]
    fn test_label_components() {
        let engine = sample();
        let labels = engine.label_components();
        assert_eq!(labels.labels, vec![0, 0, 0, 0, 1]);
        assert_eq!(labels.counts, vec![4, 1]);
    }
}
