//! Binary morphology on vertex and edge labels
//!
//! Every operator works in synchronous rounds: the set of elements holding
//! `value` is taken at the start of a round and expanded by one hop.
//! Dilation propagates `true`, erosion propagates `false`.

use crate::filter::check_label_len;
use crate::graph::engine::GraphEngine;
use crate::graph::store::{Graph, GraphError, GraphResult};
use rustc_hash::FxHashSet;
use std::fmt;
use std::str::FromStr;

/// How vertex erosion treats the graph boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErosionBoundary {
    /// Only vertices adjacent to a `false` vertex are eroded
    #[default]
    Closed,
    /// Vertices of degree at most one also count as touching the background
    Leaves,
}

impl fmt::Display for ErosionBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErosionBoundary::Closed => write!(f, "closed"),
            ErosionBoundary::Leaves => write!(f, "leaves"),
        }
    }
}

impl FromStr for ErosionBoundary {
    type Err = GraphError;

    fn from_str(s: &str) -> GraphResult<Self> {
        match s {
            "closed" => Ok(ErosionBoundary::Closed),
            "leaves" => Ok(ErosionBoundary::Leaves),
            other => Err(GraphError::InvalidArgument(format!(
                "erosion boundary must be 'closed' or 'leaves', got '{}'",
                other
            ))),
        }
    }
}

fn check_steps(steps: usize) -> GraphResult<()> {
    if steps == 0 {
        return Err(GraphError::InvalidArgument(
            "propagation steps must be at least 1".to_string(),
        ));
    }
    Ok(())
}

impl<E: GraphEngine> Graph<E> {
    /// Set every neighbour of a vertex labeled `value` to `value`, `steps` times
    pub fn vertex_propagate<T: Clone + PartialEq>(
        &self,
        label: &[T],
        value: &T,
        steps: usize,
    ) -> GraphResult<Vec<T>> {
        check_label_len("vertex label", self.n_vertices(), label.len())?;
        check_steps(steps)?;
        let mut label = label.to_vec();
        for _ in 0..steps {
            self.propagate_round(&mut label, value);
        }
        Ok(label)
    }

    /// One round over adjacency in both directions, so that erosion stays
    /// the dual of dilation on directed graphs
    fn propagate_round<T: Clone + PartialEq>(&self, label: &mut [T], value: &T) {
        let seeds: Vec<usize> = (0..label.len()).filter(|&v| label[v] == *value).collect();
        for v in seeds {
            let out = self.engine.out_neighbours(v);
            let inc = self.engine.in_neighbours(v);
            for u in out.into_iter().chain(inc) {
                label[u] = value.clone();
            }
        }
    }

    pub fn vertex_dilate_binary(&self, label: &[bool], steps: usize) -> GraphResult<Vec<bool>> {
        self.vertex_propagate(label, &true, steps)
    }

    /// Erosion with [`ErosionBoundary::Closed`]: only vertices adjacent to a
    /// `false` vertex are cleared, so an all-true label is left unchanged.
    /// Use [`vertex_erode_binary_with`](Self::vertex_erode_binary_with) and
    /// [`ErosionBoundary::Leaves`] to also erode from degree one endpoints.
    pub fn vertex_erode_binary(&self, label: &[bool], steps: usize) -> GraphResult<Vec<bool>> {
        self.vertex_erode_binary_with(label, steps, ErosionBoundary::Closed)
    }

    /// Erosion with an explicit boundary rule
    pub fn vertex_erode_binary_with(
        &self,
        label: &[bool],
        steps: usize,
        boundary: ErosionBoundary,
    ) -> GraphResult<Vec<bool>> {
        if boundary == ErosionBoundary::Closed {
            return self.vertex_propagate(label, &false, steps);
        }
        check_label_len("vertex label", self.n_vertices(), label.len())?;
        check_steps(steps)?;
        let leaves: Vec<usize> = (0..self.n_vertices())
            .filter(|&v| self.engine.degree(v) <= 1)
            .collect();
        let mut label = label.to_vec();
        for _ in 0..steps {
            self.propagate_round(&mut label, &false);
            for &v in &leaves {
                label[v] = false;
            }
        }
        Ok(label)
    }

    /// Erode then dilate
    pub fn vertex_open_binary(&self, label: &[bool], steps: usize) -> GraphResult<Vec<bool>> {
        let eroded = self.vertex_erode_binary(label, steps)?;
        self.vertex_dilate_binary(&eroded, steps)
    }

    /// Dilate then erode
    pub fn vertex_close_binary(&self, label: &[bool], steps: usize) -> GraphResult<Vec<bool>> {
        let dilated = self.vertex_dilate_binary(label, steps)?;
        self.vertex_erode_binary(&dilated, steps)
    }

    /// Grow a vertex filter by `steps` hops
    pub fn expand_vertex_filter(&self, vertex_filter: &[bool], steps: usize) -> GraphResult<Vec<bool>> {
        self.vertex_dilate_binary(vertex_filter, steps)
    }

    /// Set every edge touching an endpoint of an edge labeled `value` to
    /// `value`, `steps` times. `None` returns the label unchanged.
    pub fn edge_propagate<T: Clone + PartialEq>(
        &self,
        label: &[T],
        value: &T,
        steps: Option<usize>,
    ) -> GraphResult<Vec<T>> {
        check_label_len("edge label", self.n_edges(), label.len())?;
        let mut label = label.to_vec();
        let steps = match steps {
            Some(steps) => steps,
            None => return Ok(label),
        };
        check_steps(steps)?;

        let connectivity = self.edge_connectivity();
        for _ in 0..steps {
            let vertices: FxHashSet<usize> = connectivity
                .iter()
                .zip(&label)
                .filter(|(_, l)| *l == value)
                .flat_map(|(&(s, t), _)| [s, t])
                .collect();
            for v in vertices {
                for e in self.engine.incident_edges(v) {
                    label[e] = value.clone();
                }
            }
        }
        Ok(label)
    }

    pub fn edge_dilate_binary(&self, label: &[bool], steps: Option<usize>) -> GraphResult<Vec<bool>> {
        self.edge_propagate(label, &true, steps)
    }

    pub fn edge_erode_binary(&self, label: &[bool], steps: Option<usize>) -> GraphResult<Vec<bool>> {
        self.edge_propagate(label, &false, steps)
    }

    pub fn edge_open_binary(&self, label: &[bool], steps: Option<usize>) -> GraphResult<Vec<bool>> {
        let eroded = self.edge_erode_binary(label, steps)?;
        self.edge_dilate_binary(&eroded, steps)
    }

    pub fn edge_close_binary(&self, label: &[bool], steps: Option<usize>) -> GraphResult<Vec<bool>> {
        let dilated = self.edge_dilate_binary(label, steps)?;
        self.edge_erode_binary(&dilated, steps)
    }
}
