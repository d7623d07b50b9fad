//! Derived edge line mesh
//!
//! Every edge's coordinate geometry becomes a polyline: consecutive samples
//! are joined by a segment. The mesh is computed lazily from the graph and
//! cached until the next mutation.

use super::store::stack_list;
use crate::graph::engine::GraphEngine;
use crate::graph::store::{Graph, GraphResult, COORDINATES};
use crate::graph::types::EdgeId;
use ndarray::Array2;

/// Line segments over all edge geometry samples
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeMesh {
    /// Sample coordinates, edges stacked in edge id order
    pub vertices: Array2<f64>,
    /// Pairs of rows in `vertices`
    pub segments: Vec<[usize; 2]>,
    /// Owning edge of every segment
    pub segment_edges: Vec<EdgeId>,
}

impl EdgeMesh {
    /// Build from stacked samples and the per-edge sample counts
    pub fn from_polylines(vertices: Array2<f64>, lengths: &[usize]) -> Self {
        let mut segments = Vec::new();
        let mut segment_edges = Vec::new();
        let mut offset = 0;
        for (edge, &len) in lengths.iter().enumerate() {
            for i in offset..(offset + len).saturating_sub(1) {
                segments.push([i, i + 1]);
                segment_edges.push(edge);
            }
            offset += len;
        }
        EdgeMesh {
            vertices,
            segments,
            segment_edges,
        }
    }

    pub fn n_segments(&self) -> usize {
        self.segments.len()
    }

    /// Segments belonging to one edge
    pub fn edge_segments(&self, edge: EdgeId) -> impl Iterator<Item = &[usize; 2]> + '_ {
        self.segments
            .iter()
            .zip(&self.segment_edges)
            .filter(move |(_, e)| **e == edge)
            .map(|(segment, _)| segment)
    }
}

impl<E: GraphEngine> Graph<E> {
    /// Line mesh of the edge coordinate geometry, cached until the next mutation
    pub fn edge_mesh(&self) -> GraphResult<&EdgeMesh> {
        if let Some(mesh) = self.mesh_cache.get() {
            return Ok(mesh);
        }
        let list = self.edge_geometry(COORDINATES)?;
        let lengths: Vec<usize> = list.iter().map(|a| a.nrows()).collect();
        let vertices = stack_list(&list)?;
        Ok(self.mesh_cache.get_or_init(|| EdgeMesh::from_polylines(vertices, &lengths)))
    }
}
