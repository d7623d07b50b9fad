//! Shared topology representation for graph algorithms
//!
//! Provides a read-only, dense view of the graph topology for algorithm execution.

/// Dense vertex index type
pub type VertexIndex = usize;

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// Edge ids are positions in the edge list the topology was built from, so
/// `out_edges`/`in_edges` can be used to address per-edge attribute arrays.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CsrTopology {
    /// Number of vertices
    pub vertex_count: usize,

    /// Offsets into `out_targets`. Size = vertex_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target vertex indices
    pub out_targets: Vec<VertexIndex>,
    /// Edge ids aligned with `out_targets`
    pub out_edges: Vec<usize>,

    /// Offsets into `in_sources`. Size = vertex_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source vertex indices
    pub in_sources: Vec<VertexIndex>,
    /// Edge ids aligned with `in_sources`
    pub in_edges: Vec<usize>,
}

impl CsrTopology {
    /// Build the CSR structure from an edge list.
    ///
    /// Edges are bucketed per vertex in ascending edge id order. Endpoints
    /// must be `< vertex_count`.
    pub fn from_edges(vertex_count: usize, edges: &[(VertexIndex, VertexIndex)]) -> Self {
        let mut out_offsets = vec![0usize; vertex_count + 1];
        let mut in_offsets = vec![0usize; vertex_count + 1];
        for &(s, t) in edges {
            out_offsets[s + 1] += 1;
            in_offsets[t + 1] += 1;
        }
        for i in 0..vertex_count {
            out_offsets[i + 1] += out_offsets[i];
            in_offsets[i + 1] += in_offsets[i];
        }

        let mut out_targets = vec![0; edges.len()];
        let mut out_edges = vec![0; edges.len()];
        let mut in_sources = vec![0; edges.len()];
        let mut in_edges = vec![0; edges.len()];
        let mut out_fill = out_offsets.clone();
        let mut in_fill = in_offsets.clone();

        for (e, &(s, t)) in edges.iter().enumerate() {
            out_targets[out_fill[s]] = t;
            out_edges[out_fill[s]] = e;
            out_fill[s] += 1;

            in_sources[in_fill[t]] = s;
            in_edges[in_fill[t]] = e;
            in_fill[t] += 1;
        }

        CsrTopology {
            vertex_count,
            out_offsets,
            out_targets,
            out_edges,
            in_offsets,
            in_sources,
            in_edges,
        }
    }

    /// Number of edges
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    /// Get the out-degree of a vertex
    pub fn out_degree(&self, idx: VertexIndex) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the in-degree of a vertex
    pub fn in_degree(&self, idx: VertexIndex) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Total degree, self loops count twice
    pub fn degree(&self, idx: VertexIndex) -> usize {
        self.out_degree(idx) + self.in_degree(idx)
    }

    /// Get outgoing neighbors (successors) of a vertex
    pub fn successors(&self, idx: VertexIndex) -> &[VertexIndex] {
        &self.out_targets[self.out_offsets[idx]..self.out_offsets[idx + 1]]
    }

    /// Get incoming neighbors (predecessors) of a vertex
    pub fn predecessors(&self, idx: VertexIndex) -> &[VertexIndex] {
        &self.in_sources[self.in_offsets[idx]..self.in_offsets[idx + 1]]
    }

    /// Edge ids leaving a vertex, aligned with `successors`
    pub fn out_edge_ids(&self, idx: VertexIndex) -> &[usize] {
        &self.out_edges[self.out_offsets[idx]..self.out_offsets[idx + 1]]
    }

    /// Edge ids entering a vertex, aligned with `predecessors`
    pub fn in_edge_ids(&self, idx: VertexIndex) -> &[usize] {
        &self.in_edges[self.in_offsets[idx]..self.in_offsets[idx + 1]]
    }
}
