//! Sub-graphs, views, label mapping and property transforms
//!
//! Filters are boolean masks aligned to the current vertex or edge ids.
//! [`Graph::sub_graph`] renumbers densely and compacts packed geometry;
//! [`Graph::view`] borrows the graph and keeps every id and range as is.

use crate::geometry::GeometryValues;
use crate::graph::engine::GraphEngine;
use crate::graph::storage::Column;
use crate::graph::store::{Graph, GraphError, GraphResult};
use crate::graph::types::{EdgeId, GeometryMode, VertexId};
use crate::graph::view::GraphView;
use ndarray::Array2;
use spatial_graph_algorithms::ComponentLabels;
use std::str::FromStr;
use tracing::{debug, info};

/// How a vertex filter maps onto edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeFilterMode {
    /// Both endpoints must pass
    #[default]
    Both,
    /// At least one endpoint must pass
    Either,
}

impl FromStr for EdgeFilterMode {
    type Err = GraphError;

    fn from_str(s: &str) -> GraphResult<Self> {
        match s {
            "both" | "and" => Ok(EdgeFilterMode::Both),
            "either" | "or" => Ok(EdgeFilterMode::Either),
            other => Err(GraphError::InvalidArgument(format!(
                "edge filter mode must be one of both, either, and, or; got '{}'",
                other
            ))),
        }
    }
}

/// How incident edge values are combined onto a vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelReduction {
    #[default]
    Max,
    Min,
    Sum,
    Mean,
}

impl LabelReduction {
    fn reduce(self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        match self {
            LabelReduction::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            LabelReduction::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
            LabelReduction::Sum => values.iter().sum(),
            LabelReduction::Mean => values.iter().sum::<f64>() / values.len() as f64,
        }
    }
}

impl FromStr for LabelReduction {
    type Err = GraphError;

    fn from_str(s: &str) -> GraphResult<Self> {
        match s {
            "max" => Ok(LabelReduction::Max),
            "min" => Ok(LabelReduction::Min),
            "sum" => Ok(LabelReduction::Sum),
            "mean" => Ok(LabelReduction::Mean),
            other => Err(GraphError::InvalidArgument(format!(
                "label reduction must be one of max, min, sum, mean; got '{}'",
                other
            ))),
        }
    }
}

/// Per-axis bound used by spatial slicing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SliceBound {
    /// No restriction
    #[default]
    Full,
    /// Half-open `[start, stop)`, either side optional
    Range { start: Option<f64>, stop: Option<f64> },
    /// Coordinate must equal the value
    Exact(f64),
}

impl SliceBound {
    pub fn range(start: f64, stop: f64) -> Self {
        SliceBound::Range {
            start: Some(start),
            stop: Some(stop),
        }
    }

    pub fn contains(&self, x: f64) -> bool {
        match *self {
            SliceBound::Full => true,
            SliceBound::Range { start, stop } => {
                start.map_or(true, |s| s <= x) && stop.map_or(true, |s| x < s)
            }
            SliceBound::Exact(v) => x == v,
        }
    }
}

/// Vertex mask of the points inside all per-axis bounds
pub fn slice_filter(coordinates: &Array2<f64>, bounds: &[SliceBound]) -> GraphResult<Vec<bool>> {
    if bounds.len() > coordinates.ncols() {
        return Err(GraphError::InvalidArgument(format!(
            "{} slice bounds given for {}-d coordinates",
            bounds.len(),
            coordinates.ncols()
        )));
    }
    Ok(coordinates
        .rows()
        .into_iter()
        .map(|point| bounds.iter().zip(point.iter()).all(|(b, &x)| b.contains(x)))
        .collect())
}

fn float_vectors<'a>(column: &'a Column, name: &str) -> GraphResult<&'a Array2<f64>> {
    column.as_float_vectors().ok_or_else(|| {
        GraphError::InvalidArgument(format!(
            "property '{}' must be a float vector column to be transformed, found {}",
            name,
            column.type_name()
        ))
    })
}

fn transform_rows<F>(transformation: &F, values: &Array2<f64>) -> GraphResult<Array2<f64>>
where
    F: Fn(&Array2<f64>) -> Array2<f64>,
{
    let transformed = transformation(values);
    if transformed.nrows() != values.nrows() {
        return Err(GraphError::DimensionMismatch {
            what: "transformed rows",
            expected: values.nrows(),
            found: transformed.nrows(),
        });
    }
    Ok(transformed)
}

pub(crate) fn check_label_len(what: &'static str, expected: usize, found: usize) -> GraphResult<()> {
    if expected != found {
        return Err(GraphError::DimensionMismatch { what, expected, found });
    }
    Ok(())
}

impl<E: GraphEngine> Graph<E> {
    /// Independent graph of the vertices and edges passing the filters,
    /// renumbered densely in original order
    pub fn sub_graph(
        &self,
        vertex_filter: Option<&[bool]>,
        edge_filter: Option<&[bool]>,
    ) -> GraphResult<Graph<E>> {
        let reindexed = self.engine.filter(vertex_filter, edge_filter)?;
        let mut graph = self.clone();
        graph.apply_reindex(reindexed)?;
        graph.resize_edge_geometry()?;
        debug!(
            "Extracted sub-graph with {} vertices and {} edges",
            graph.n_vertices(),
            graph.n_edges()
        );
        Ok(graph)
    }

    /// Borrowed view of the vertices and edges passing the filters
    pub fn view(
        &self,
        vertex_filter: Option<&[bool]>,
        edge_filter: Option<&[bool]>,
    ) -> GraphResult<GraphView<'_, E>> {
        GraphView::new(self, vertex_filter, edge_filter)
    }

    /// Drop vertices without edges
    pub fn remove_isolated_vertices(&mut self) -> GraphResult<()> {
        let keep: Vec<bool> = self.vertex_degrees().into_iter().map(|d| d > 0).collect();
        let removed = keep.iter().filter(|&&k| !k).count();
        if removed > 0 {
            *self = self.sub_graph(Some(&keep), None)?;
        }
        info!("Removed {} isolated vertices", removed);
        Ok(())
    }

    /// Drop edges whose endpoints both have degree one, then any vertices
    /// left isolated. Degrees are taken before anything is removed.
    pub fn remove_isolated_edges(&mut self) -> GraphResult<()> {
        let degrees = self.vertex_degrees();
        let keep: Vec<bool> = self
            .edge_connectivity()
            .into_iter()
            .map(|(s, t)| !(degrees[s] == 1 && degrees[t] == 1))
            .collect();
        let removed = keep.iter().filter(|&&k| !k).count();
        if removed > 0 {
            *self = self.sub_graph(None, Some(&keep))?;
        }
        info!("Removed {} isolated edges", removed);
        self.remove_isolated_vertices()
    }

    pub fn remove_self_loops(&mut self) -> GraphResult<()> {
        let keep: Vec<bool> = self.edge_connectivity().into_iter().map(|(s, t)| s != t).collect();
        if keep.iter().any(|&k| !k) {
            *self = self.sub_graph(None, Some(&keep))?;
        }
        Ok(())
    }

    /// Connected component label of every vertex with per-label vertex counts
    pub fn label_components(&self) -> ComponentLabels {
        self.engine.label_components()
    }

    fn largest_component_filter(&self) -> Vec<bool> {
        let components = self.label_components();
        match components.largest() {
            Some(label) => {
                debug!(
                    "Largest of {} components has label {} with {} vertices",
                    components.component_count(),
                    label,
                    components.counts[label]
                );
                components.mask(label)
            }
            None => Vec::new(),
        }
    }

    /// Sub-graph of the component with the most vertices (lowest label on ties)
    pub fn largest_component(&self) -> GraphResult<Graph<E>> {
        let keep = self.largest_component_filter();
        self.sub_graph(Some(&keep), None)
    }

    pub fn largest_component_view(&self) -> GraphResult<GraphView<'_, E>> {
        let keep = self.largest_component_filter();
        self.view(Some(&keep), None)
    }

    /// Vertex mask of the points inside the per-axis coordinate bounds
    pub fn sub_slice_vertex_filter(&self, bounds: &[SliceBound]) -> GraphResult<Vec<bool>> {
        slice_filter(self.vertex_coordinates()?, bounds)
    }

    /// Sub-graph of the vertices inside the per-axis coordinate bounds
    pub fn sub_slice(&self, bounds: &[SliceBound]) -> GraphResult<Graph<E>> {
        let keep = self.sub_slice_vertex_filter(bounds)?;
        self.sub_graph(Some(&keep), None)
    }

    /// Edge mask of the edges whose edge coordinates lie inside the bounds
    pub fn sub_slice_edge_filter(&self, bounds: &[SliceBound]) -> GraphResult<Vec<bool>> {
        slice_filter(self.edge_coordinates()?, bounds)
    }

    /// Vertex label of every edge's source
    pub fn edge_source_label<T: Clone>(&self, vertex_label: &[T]) -> GraphResult<Vec<T>> {
        check_label_len("vertex label", self.n_vertices(), vertex_label.len())?;
        Ok(self
            .edge_connectivity()
            .into_iter()
            .map(|(s, _)| vertex_label[s].clone())
            .collect())
    }

    /// Vertex label of every edge's target
    pub fn edge_target_label<T: Clone>(&self, vertex_label: &[T]) -> GraphResult<Vec<T>> {
        check_label_len("vertex label", self.n_vertices(), vertex_label.len())?;
        Ok(self
            .edge_connectivity()
            .into_iter()
            .map(|(_, t)| vertex_label[t].clone())
            .collect())
    }

    pub fn vertex_filter_to_edge_filter(
        &self,
        vertex_filter: &[bool],
        mode: EdgeFilterMode,
    ) -> GraphResult<Vec<bool>> {
        check_label_len("vertex filter", self.n_vertices(), vertex_filter.len())?;
        Ok(self
            .edge_connectivity()
            .into_iter()
            .map(|(s, t)| match mode {
                EdgeFilterMode::Both => vertex_filter[s] && vertex_filter[t],
                EdgeFilterMode::Either => vertex_filter[s] || vertex_filter[t],
            })
            .collect())
    }

    /// Vertices touching at least one labeled edge
    pub fn edge_to_vertex_label_or(&self, edge_label: &[bool]) -> GraphResult<Vec<bool>> {
        check_label_len("edge label", self.n_edges(), edge_label.len())?;
        let mut label = vec![false; self.n_vertices()];
        for ((s, t), _) in self
            .edge_connectivity()
            .into_iter()
            .zip(edge_label)
            .filter(|(_, &l)| l)
        {
            label[s] = true;
            label[t] = true;
        }
        Ok(label)
    }

    /// Edges whose endpoints are both labeled
    pub fn vertex_to_edge_label(&self, vertex_label: &[bool]) -> GraphResult<Vec<bool>> {
        self.vertex_filter_to_edge_filter(vertex_label, EdgeFilterMode::Both)
    }

    /// Mean of the endpoint values of every edge
    pub fn vertex_to_edge_label_mean(&self, vertex_label: &[f64]) -> GraphResult<Vec<f64>> {
        self.vertex_to_edge_property(vertex_label, |s, t| (s + t) / 2.0, None)
    }

    /// Combine the source and target values of every edge with `mapping`.
    ///
    /// With `vertices`, only the edges touching one of them are mapped, in
    /// edge id order (see [`vertex_ids_to_connectivity`](Self::vertex_ids_to_connectivity)).
    pub fn vertex_to_edge_property<T, U, F>(
        &self,
        vertex_property: &[T],
        mapping: F,
        vertices: Option<&[VertexId]>,
    ) -> GraphResult<Vec<U>>
    where
        F: Fn(&T, &T) -> U,
    {
        check_label_len("vertex property", self.n_vertices(), vertex_property.len())?;
        let connectivity = match vertices {
            Some(vertices) => self.vertex_ids_to_connectivity(vertices),
            None => self.edge_connectivity(),
        };
        Ok(connectivity
            .into_iter()
            .map(|(s, t)| mapping(&vertex_property[s], &vertex_property[t]))
            .collect())
    }

    /// Reduce the values of the edges reaching every vertex.
    ///
    /// Undirected graphs use all incident edges, directed graphs the
    /// in-edges. Vertices without such edges get 0.
    pub fn edge_to_vertex_label(
        &self,
        edge_label: &[f64],
        method: LabelReduction,
    ) -> GraphResult<Vec<f64>> {
        check_label_len("edge label", self.n_edges(), edge_label.len())?;
        let directed = self.is_directed();
        Ok((0..self.n_vertices())
            .map(|v| {
                let edges = if directed {
                    self.engine.in_edges(v).to_vec()
                } else {
                    self.engine.incident_edges(v)
                };
                let values: Vec<f64> = edges.into_iter().map(|e| edge_label[e]).collect();
                method.reduce(&values)
            })
            .collect())
    }

    /// Endpoints of every edge with at least one endpoint in `vertices`
    pub fn vertex_ids_to_connectivity(&self, vertices: &[VertexId]) -> Vec<(VertexId, VertexId)> {
        let mut selected = vec![false; self.n_vertices()];
        for &v in vertices {
            if let Some(slot) = selected.get_mut(v) {
                *slot = true;
            }
        }
        self.edge_connectivity()
            .into_iter()
            .filter(|&(s, t)| selected[s] || selected[t])
            .collect()
    }

    /// Ids of the edges with at least one endpoint in `vertices`
    pub fn vertex_ids_to_edges(&self, vertices: &[VertexId]) -> Vec<EdgeId> {
        let mut edges: Vec<EdgeId> = vertices
            .iter()
            .filter(|&&v| self.engine.has_vertex(v))
            .flat_map(|&v| self.engine.incident_edges(v))
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }

    /// Apply a coordinate transform to vertex, edge and edge geometry
    /// properties. Every entry maps a source name to the name the result is
    /// stored under (use the same name to transform in place).
    ///
    /// All results are computed and checked before anything is written, and
    /// the transform must keep the number of rows.
    pub fn transform_properties<F>(
        &mut self,
        transformation: F,
        vertex_properties: &[(&str, &str)],
        edge_properties: &[(&str, &str)],
        edge_geometry: &[(&str, &str)],
    ) -> GraphResult<()>
    where
        F: Fn(&Array2<f64>) -> Array2<f64>,
    {
        let mut vertex_results = Vec::with_capacity(vertex_properties.len());
        for &(source, target) in vertex_properties {
            let values = float_vectors(self.vertex_property(source)?, source)?;
            vertex_results.push((target, transform_rows(&transformation, values)?));
        }

        let mut edge_results = Vec::with_capacity(edge_properties.len());
        for &(source, target) in edge_properties {
            let values = float_vectors(self.edge_property(source)?, source)?;
            edge_results.push((target, transform_rows(&transformation, values)?));
        }

        let mut geometry_results = Vec::with_capacity(edge_geometry.len());
        for &(source, target) in edge_geometry {
            let values = match self.edge_geometry_mode() {
                GeometryMode::Packed => {
                    let flat = self.edge_geometry_flat(source)?;
                    GeometryValues::from(transform_rows(&transformation, &flat)?)
                }
                GeometryMode::Scattered => {
                    let list = self.edge_geometry(source)?;
                    let mut transformed = Vec::with_capacity(list.len());
                    for samples in &list {
                        transformed.push(transform_rows(&transformation, samples)?);
                    }
                    GeometryValues::List(transformed)
                }
            };
            geometry_results.push((target, values));
        }

        info!(
            "Transforming {} vertex, {} edge and {} edge geometry properties",
            vertex_results.len(),
            edge_results.len(),
            geometry_results.len()
        );
        for (target, values) in vertex_results {
            self.define_vertex_property(target, values)?;
        }
        for (target, values) in edge_results {
            self.define_edge_property(target, values)?;
        }
        for (target, values) in geometry_results {
            self.set_edge_geometry(target, values)?;
        }
        Ok(())
    }
}
