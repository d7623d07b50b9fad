//! Edge geometry storage
//!
//! Each edge may carry polyline geometry: a variable number of fixed-width
//! samples per named attribute (coordinates, radii, ...). Two layouts:
//!
//! - packed (`graph` mode): one flat array per attribute in the graph table
//!   plus an `n_edges x 2` integer edge attribute of `[start, end)` ranges;
//! - scattered (`edge` mode): one sample array per edge in an edge attribute.
//!
//! Conversion between layouts is lossless. In packed mode all attributes
//! share the same ranges.

use super::ranges::{
    compact, compute_ranges, packed_len, range_lengths, ranges_from_array, ranges_to_array,
    remap, validate, GeometryRange,
};
use crate::graph::engine::GraphEngine;
use crate::graph::property::GraphProperty;
use crate::graph::storage::Column;
use crate::graph::store::{Graph, GraphError, GraphResult, COORDINATES};
use crate::graph::types::{EdgeId, GeometryMode, PropertyKind};
use ndarray::{s, Array2};
use tracing::{debug, warn};

/// Attribute name prefix for edge geometry
pub const GEOMETRY_PREFIX: &str = "edge_geometry_";
/// Edge attribute holding packed geometry ranges
pub const GEOMETRY_INDICES: &str = "edge_geometry_indices";

/// Input for [`Graph::set_edge_geometry`]
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryValues {
    /// One sample array per edge
    List(Vec<Array2<f64>>),
    /// All samples stacked, with per-edge ranges. Without ranges the current
    /// ranges of the graph are reused.
    Flat {
        values: Array2<f64>,
        ranges: Option<Vec<GeometryRange>>,
    },
}

impl GeometryValues {
    /// Per-edge scalar samples (e.g. radii) as width-1 arrays
    pub fn from_scalars(per_edge: Vec<Vec<f64>>) -> Self {
        GeometryValues::List(
            per_edge
                .into_iter()
                .map(|samples| Array2::from_shape_fn((samples.len(), 1), |(i, _)| samples[i]))
                .collect(),
        )
    }
}

impl From<Vec<Array2<f64>>> for GeometryValues {
    fn from(list: Vec<Array2<f64>>) -> Self {
        GeometryValues::List(list)
    }
}

impl From<Array2<f64>> for GeometryValues {
    fn from(values: Array2<f64>) -> Self {
        GeometryValues::Flat { values, ranges: None }
    }
}

impl From<(Array2<f64>, Vec<GeometryRange>)> for GeometryValues {
    fn from((values, ranges): (Array2<f64>, Vec<GeometryRange>)) -> Self {
        GeometryValues::Flat {
            values,
            ranges: Some(ranges),
        }
    }
}

fn geometry_key(name: &str) -> String {
    format!("{}{}", GEOMETRY_PREFIX, name)
}

/// Common sample width of a list, ignoring edges without samples
fn sample_width(list: &[Array2<f64>]) -> GraphResult<usize> {
    let width = list
        .iter()
        .find(|a| a.nrows() > 0)
        .or_else(|| list.first())
        .map(|a| a.ncols())
        .unwrap_or(0);
    for samples in list.iter().filter(|a| a.nrows() > 0) {
        if samples.ncols() != width {
            return Err(GraphError::DimensionMismatch {
                what: "geometry sample width",
                expected: width,
                found: samples.ncols(),
            });
        }
    }
    Ok(width)
}

/// Stack per-edge samples into one array
fn stack_samples(list: &[Array2<f64>], width: usize) -> Array2<f64> {
    let total = list.iter().map(|a| a.nrows()).sum();
    let mut flat = Array2::zeros((total, width));
    let mut offset = 0;
    for samples in list {
        let n = samples.nrows();
        if n > 0 {
            flat.slice_mut(s![offset..offset + n, ..]).assign(samples);
        }
        offset += n;
    }
    flat
}

/// Stack per-edge samples after checking their widths agree
pub(crate) fn stack_list(list: &[Array2<f64>]) -> GraphResult<Array2<f64>> {
    Ok(stack_samples(list, sample_width(list)?))
}

/// Split a packed array into per-edge samples
fn split_samples(values: &Array2<f64>, ranges: &[GeometryRange]) -> Vec<Array2<f64>> {
    ranges
        .iter()
        .map(|r| values.slice(s![r.as_range(), ..]).to_owned())
        .collect()
}

impl<E: GraphEngine> Graph<E> {
    /// Names of all edge geometry attributes, without the storage prefix
    pub fn edge_geometry_names(&self) -> Vec<String> {
        let keys: Vec<&str> = match self.geometry_mode {
            GeometryMode::Packed => self.graph_properties.keys().map(String::as_str).collect(),
            GeometryMode::Scattered => self.edge_properties.names().collect(),
        };
        keys.into_iter()
            .filter(|k| *k != GEOMETRY_INDICES)
            .filter_map(|k| k.strip_prefix(GEOMETRY_PREFIX))
            .map(str::to_string)
            .collect()
    }

    pub fn has_edge_geometry(&self, name: &str) -> bool {
        let key = geometry_key(name);
        match self.geometry_mode {
            GeometryMode::Packed => self.graph_properties.contains_key(&key),
            GeometryMode::Scattered => self.edge_properties.contains(&key),
        }
    }

    fn packed_array(&self, name: &str) -> GraphResult<&Array2<f64>> {
        let key = geometry_key(name);
        let property = self
            .graph_properties
            .get(&key)
            .ok_or_else(|| GraphError::PropertyNotFound {
                kind: PropertyKind::Graph,
                name: key.clone(),
            })?;
        property
            .as_array()
            .and_then(Column::as_float_vectors)
            .ok_or_else(|| GraphError::Consistency(format!("packed geometry '{}' is not a float array", key)))
    }

    fn scattered_list(&self, name: &str) -> GraphResult<&[Array2<f64>]> {
        let key = geometry_key(name);
        let column = self.column(PropertyKind::Edge, &key)?;
        column
            .as_samples()
            .ok_or_else(|| GraphError::Consistency(format!("edge geometry '{}' is not a sample column", key)))
    }

    /// Ranges stored in packed mode, if any geometry is set
    fn stored_ranges(&self) -> GraphResult<Option<Vec<GeometryRange>>> {
        match self.edge_properties.column(GEOMETRY_INDICES) {
            Some(column) => {
                let array = column.as_integer_vectors().ok_or_else(|| {
                    GraphError::Consistency("geometry indices are not an integer array".to_string())
                })?;
                Ok(Some(ranges_from_array(array)?))
            }
            None => Ok(None),
        }
    }

    /// Per-edge `[start, end)` ranges into the packed arrays
    ///
    /// In scattered mode the ranges a packed layout would use are computed
    /// from the sample counts of the coordinates (or first) attribute.
    pub fn edge_geometry_indices(&self) -> GraphResult<Vec<GeometryRange>> {
        match self.geometry_mode {
            GeometryMode::Packed => self.stored_ranges()?.ok_or_else(|| GraphError::PropertyNotFound {
                kind: PropertyKind::Edge,
                name: GEOMETRY_INDICES.to_string(),
            }),
            GeometryMode::Scattered => {
                let names = self.edge_geometry_names();
                let name = names
                    .iter()
                    .find(|n| n.as_str() == COORDINATES)
                    .or_else(|| names.first())
                    .ok_or_else(|| GraphError::PropertyNotFound {
                        kind: PropertyKind::Edge,
                        name: geometry_key(COORDINATES),
                    })?;
                Ok(compute_ranges(&self.edge_geometry_lengths(name)?))
            }
        }
    }

    /// Number of samples per edge for an attribute
    pub fn edge_geometry_lengths(&self, name: &str) -> GraphResult<Vec<usize>> {
        match self.geometry_mode {
            GeometryMode::Packed => {
                self.packed_array(name)?;
                Ok(range_lengths(&self.edge_geometry_indices()?))
            }
            GeometryMode::Scattered => Ok(self.scattered_list(name)?.iter().map(|a| a.nrows()).collect()),
        }
    }

    /// Geometry of every edge as one sample array per edge
    pub fn edge_geometry(&self, name: &str) -> GraphResult<Vec<Array2<f64>>> {
        match self.geometry_mode {
            GeometryMode::Packed => {
                let values = self.packed_array(name)?;
                let ranges = self.edge_geometry_indices()?;
                validate(&ranges, values.nrows())?;
                Ok(split_samples(values, &ranges))
            }
            GeometryMode::Scattered => Ok(self.scattered_list(name)?.to_vec()),
        }
    }

    /// Geometry of every edge as one flat array
    ///
    /// In packed mode this is the backing array itself, addressed by
    /// [`edge_geometry_indices`](Self::edge_geometry_indices).
    pub fn edge_geometry_flat(&self, name: &str) -> GraphResult<Array2<f64>> {
        match self.geometry_mode {
            GeometryMode::Packed => Ok(self.packed_array(name)?.clone()),
            GeometryMode::Scattered => {
                stack_list(self.scattered_list(name)?)
            }
        }
    }

    /// Geometry of a single edge
    pub fn edge_geometry_of(&self, name: &str, edge: EdgeId) -> GraphResult<Array2<f64>> {
        self.check_edge(edge)?;
        match self.geometry_mode {
            GeometryMode::Packed => {
                let values = self.packed_array(name)?;
                let ranges = self.edge_geometry_indices()?;
                let range = ranges[edge];
                validate(&[range], values.nrows())?;
                Ok(values.slice(s![range.as_range(), ..]).to_owned())
            }
            GeometryMode::Scattered => Ok(self.scattered_list(name)?[edge].clone()),
        }
    }

    /// Set an edge geometry attribute for all edges
    pub fn set_edge_geometry(&mut self, name: &str, values: impl Into<GeometryValues>) -> GraphResult<()> {
        let n_edges = self.n_edges();
        let values = values.into();
        if let GeometryValues::List(list) = &values {
            check_count(n_edges, list.len())?;
            sample_width(list)?;
        }
        if let GeometryValues::Flat { ranges: Some(ranges), .. } = &values {
            check_count(n_edges, ranges.len())?;
        }

        match self.geometry_mode {
            GeometryMode::Packed => {
                let (flat, ranges) = match values {
                    GeometryValues::List(list) => {
                        let width = sample_width(&list)?;
                        let ranges = compute_ranges(&list.iter().map(|a| a.nrows()).collect::<Vec<_>>());
                        (stack_samples(&list, width), Some(ranges))
                    }
                    GeometryValues::Flat { values, ranges: Some(ranges) } => {
                        validate(&ranges, values.nrows())?;
                        (values, Some(ranges))
                    }
                    GeometryValues::Flat { values, ranges: None } => {
                        let current = self.stored_ranges()?.ok_or_else(|| {
                            GraphError::InvalidArgument(
                                "flat edge geometry needs ranges when none are stored".to_string(),
                            )
                        })?;
                        validate(&current, values.nrows())?;
                        (values, None)
                    }
                };
                self.commit_packed(name, flat, ranges)
            }
            GeometryMode::Scattered => {
                let list = match values {
                    GeometryValues::List(list) => list,
                    GeometryValues::Flat { values, ranges } => {
                        let ranges = match ranges {
                            Some(ranges) => ranges,
                            None => self.edge_geometry_indices()?,
                        };
                        check_count(n_edges, ranges.len())?;
                        validate(&ranges, values.nrows())?;
                        split_samples(&values, &ranges)
                    }
                };
                self.put_column(PropertyKind::Edge, &geometry_key(name), Column::Samples(list), false)
            }
        }
    }

    /// Write one packed attribute, moving the other attributes when the
    /// ranges change position. Lengths of existing attributes must not change.
    fn commit_packed(
        &mut self,
        name: &str,
        flat: Array2<f64>,
        ranges: Option<Vec<GeometryRange>>,
    ) -> GraphResult<()> {
        let mut moved = Vec::new();
        if let Some(new_ranges) = &ranges {
            if let Some(old_ranges) = self.stored_ranges()? {
                if &old_ranges != new_ranges {
                    for other in self.edge_geometry_names().into_iter().filter(|n| n != name) {
                        if range_lengths(&old_ranges) != range_lengths(new_ranges) {
                            return Err(GraphError::Consistency(format!(
                                "edge geometry '{}' has different per-edge lengths than '{}'",
                                other, name
                            )));
                        }
                        let remapped = remap(&old_ranges, new_ranges, self.packed_array(&other)?)?;
                        moved.push((other, remapped));
                    }
                }
            }
        }

        for (other, remapped) in moved {
            self.define_graph_property(&geometry_key(&other), Column::FloatVector(remapped));
        }
        if let Some(ranges) = ranges {
            self.put_column(
                PropertyKind::Edge,
                GEOMETRY_INDICES,
                Column::IntegerVector(ranges_to_array(&ranges)),
                false,
            )?;
        }
        self.define_graph_property(&geometry_key(name), Column::FloatVector(flat));
        Ok(())
    }

    /// Set the geometry of one edge. Only possible in scattered mode.
    pub fn set_edge_geometry_of(&mut self, name: &str, edge: EdgeId, values: Array2<f64>) -> GraphResult<()> {
        if self.geometry_mode == GeometryMode::Packed {
            return Err(GraphError::UnsupportedOperation(
                "setting the geometry of a single edge requires edge geometry mode 'edge'".to_string(),
            ));
        }
        self.check_edge(edge)?;
        let key = geometry_key(name);
        if !self.edge_properties.contains(&key) {
            let empty = vec![Array2::zeros((0, values.ncols())); self.n_edges()];
            self.put_column(PropertyKind::Edge, &key, Column::Samples(empty), false)?;
        }
        let list = self.scattered_list(name)?;
        let width = sample_width(list)?;
        if list.iter().any(|a| a.nrows() > 0) && values.nrows() > 0 && values.ncols() != width {
            return Err(GraphError::DimensionMismatch {
                what: "geometry sample width",
                expected: width,
                found: values.ncols(),
            });
        }
        let mut list = list.to_vec();
        list[edge] = values;
        self.put_column(PropertyKind::Edge, &key, Column::Samples(list), true)
    }

    /// Switch the geometry layout, converting all attributes losslessly
    pub fn set_edge_geometry_mode(&mut self, mode: GeometryMode) -> GraphResult<()> {
        if mode == self.geometry_mode {
            return Ok(());
        }
        let names = self.edge_geometry_names();
        debug!(
            "Converting {} edge geometry attributes from '{}' to '{}'",
            names.len(),
            self.geometry_mode,
            mode
        );

        match mode {
            GeometryMode::Scattered => {
                let mut lists = Vec::with_capacity(names.len());
                for name in &names {
                    lists.push((name.clone(), self.edge_geometry(name)?));
                }
                for (name, list) in lists {
                    self.graph_properties.shift_remove(&geometry_key(&name));
                    self.edge_properties
                        .insert(geometry_key(&name), Column::Samples(list))?;
                }
                self.edge_properties.remove(GEOMETRY_INDICES);
            }
            GeometryMode::Packed => {
                let mut packed = Vec::with_capacity(names.len());
                let mut shared: Option<Vec<usize>> = None;
                for name in &names {
                    let list = self.scattered_list(name)?;
                    let lengths: Vec<usize> = list.iter().map(|a| a.nrows()).collect();
                    match &shared {
                        Some(expected) if *expected != lengths => {
                            return Err(GraphError::Consistency(format!(
                                "edge geometry '{}' has different per-edge lengths than '{}'",
                                name, names[0]
                            )));
                        }
                        Some(_) => {}
                        None => shared = Some(lengths),
                    }
                    packed.push((name.clone(), stack_samples(list, sample_width(list)?)));
                }
                for (name, flat) in packed {
                    self.edge_properties.remove(&geometry_key(&name));
                    self.graph_properties
                        .insert(geometry_key(&name), GraphProperty::Array(Column::FloatVector(flat)));
                }
                if let Some(lengths) = shared {
                    self.edge_properties
                        .insert(GEOMETRY_INDICES, Column::IntegerVector(ranges_to_array(&compute_ranges(&lengths))))?;
                }
            }
        }

        self.geometry_mode = mode;
        self.invalidate_caches();
        Ok(())
    }

    /// Compact packed geometry after edges were removed: ranges become
    /// contiguous again and unreferenced samples are dropped.
    ///
    /// Every attribute is remapped before anything is written.
    pub fn resize_edge_geometry(&mut self) -> GraphResult<()> {
        if self.geometry_mode != GeometryMode::Packed {
            return Ok(());
        }
        let old_ranges = match self.stored_ranges()? {
            Some(ranges) => ranges,
            None => return Ok(()),
        };
        let new_ranges = compact(&old_ranges);
        let total = packed_len(&new_ranges);

        let mut remapped = Vec::new();
        for name in self.edge_geometry_names() {
            let values = self.packed_array(&name)?;
            if old_ranges == new_ranges && values.nrows() == total {
                continue;
            }
            remapped.push((name.clone(), remap(&old_ranges, &new_ranges, values)?));
        }
        if old_ranges == new_ranges && remapped.is_empty() {
            return Ok(());
        }

        debug!("Resized packed edge geometry to {} samples", total);
        for (name, values) in remapped {
            self.define_graph_property(&geometry_key(&name), Column::FloatVector(values));
        }
        self.put_column(
            PropertyKind::Edge,
            GEOMETRY_INDICES,
            Column::IntegerVector(ranges_to_array(&new_ranges)),
            true,
        )
    }

    /// Remove one geometry attribute, or all of them with `None`
    pub fn remove_edge_geometry(&mut self, name: Option<&str>) -> GraphResult<()> {
        let names = match name {
            Some(name) => {
                if !self.has_edge_geometry(name) {
                    return Err(GraphError::PropertyNotFound {
                        kind: PropertyKind::Edge,
                        name: geometry_key(name),
                    });
                }
                vec![name.to_string()]
            }
            None => self.edge_geometry_names(),
        };
        for name in &names {
            let key = geometry_key(name);
            match self.geometry_mode {
                GeometryMode::Packed => {
                    self.graph_properties.shift_remove(&key);
                }
                GeometryMode::Scattered => {
                    self.edge_properties.remove(&key);
                }
            }
        }
        if self.edge_geometry_names().is_empty() {
            self.edge_properties.remove(GEOMETRY_INDICES);
        }
        self.invalidate_caches();
        Ok(())
    }

    /// Broadcast a per-edge property over every sample of that edge's
    /// geometry, storing it as geometry attribute `name` (defaults to the
    /// property name).
    pub fn edge_geometry_from_edge_property(&mut self, property: &str, name: Option<&str>) -> GraphResult<()> {
        let lengths = range_lengths(&self.edge_geometry_indices()?);
        let column = self.edge_property(property)?;
        let rows: Vec<Vec<f64>> = match column {
            Column::Float(v) => v.iter().map(|&x| vec![x]).collect(),
            Column::Integer(v) => v.iter().map(|&x| vec![x as f64]).collect(),
            Column::Boolean(v) => v.iter().map(|&x| vec![if x { 1.0 } else { 0.0 }]).collect(),
            Column::FloatVector(a) => a.rows().into_iter().map(|r| r.to_vec()).collect(),
            Column::IntegerVector(a) => a
                .rows()
                .into_iter()
                .map(|r| r.iter().map(|&x| x as f64).collect())
                .collect(),
            other => {
                return Err(GraphError::InvalidArgument(format!(
                    "cannot broadcast a {} edge property over geometry",
                    other.type_name()
                )))
            }
        };
        let width = rows.first().map(Vec::len).unwrap_or(1);

        let mut values = Array2::zeros((lengths.iter().sum(), width));
        let mut offset = 0;
        for (row, &len) in rows.iter().zip(&lengths) {
            for i in offset..offset + len {
                for (j, &x) in row.iter().enumerate() {
                    values[[i, j]] = x;
                }
            }
            offset += len;
        }
        let ranges = compute_ranges(&lengths);
        self.set_edge_geometry(name.unwrap_or(property), GeometryValues::Flat {
            values,
            ranges: Some(ranges),
        })
    }

    /// Edges whose coordinate geometry does not start at the source vertex
    /// coordinate and end at the target vertex coordinate
    pub fn inconsistent_edge_geometries(&self) -> GraphResult<Vec<EdgeId>> {
        let geometry = self.edge_geometry(COORDINATES)?;
        let vertices = self.vertex_coordinates()?;
        let mut inconsistent = Vec::new();
        for (edge, (source, target)) in self.edge_connectivity().into_iter().enumerate() {
            let samples = &geometry[edge];
            let n = samples.nrows();
            let consistent = n > 0 && samples.row(0) == vertices.row(source) && samples.row(n - 1) == vertices.row(target);
            if !consistent {
                inconsistent.push(edge);
            }
        }
        if !inconsistent.is_empty() {
            warn!("{} edges have geometry inconsistent with vertex coordinates", inconsistent.len());
        }
        Ok(inconsistent)
    }

    /// Whether every edge's geometry runs from its source to its target vertex
    pub fn is_edge_geometry_consistent(&self) -> GraphResult<bool> {
        Ok(self.inconsistent_edge_geometries()?.is_empty())
    }
}

fn check_count(expected: usize, found: usize) -> GraphResult<()> {
    if expected != found {
        return Err(GraphError::DimensionMismatch {
            what: "edge geometry count",
            expected,
            found,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn samples(rows: usize, start: f64) -> Array2<f64> {
        Array2::from_shape_fn((rows, 3), |(i, j)| start + i as f64 + j as f64 * 0.1)
    }

    fn four_edges() -> Graph {
        let mut graph = Graph::new();
        graph.add_vertices(10);
        graph.add_edges(&[(0, 1), (2, 3), (4, 5), (6, 7)]).unwrap();
        let list = vec![samples(3, 0.0), samples(4, 10.0), samples(5, 20.0), samples(6, 30.0)];
        graph.set_edge_geometry(COORDINATES, list).unwrap();
        graph
    }

    #[test]
    fn test_packed_ranges() {
        let graph = four_edges();
        let expected: Vec<GeometryRange> = [(0, 3), (3, 7), (7, 12), (12, 18)]
            .into_iter()
            .map(GeometryRange::from)
            .collect();
        assert_eq!(graph.edge_geometry_indices().unwrap(), expected);
        assert_eq!(graph.edge_geometry_flat(COORDINATES).unwrap().nrows(), 18);
        assert_eq!(graph.edge_geometry_names(), vec![COORDINATES.to_string()]);
        assert_eq!(graph.edge_geometry_of(COORDINATES, 1).unwrap(), samples(4, 10.0));
    }

    #[test]
    fn test_single_edge_set_requires_scattered() {
        let mut graph = four_edges();
        let err = graph.set_edge_geometry_of(COORDINATES, 0, samples(2, 0.0)).unwrap_err();
        assert!(matches!(err, GraphError::UnsupportedOperation(_)));

        graph.set_edge_geometry_mode(GeometryMode::Scattered).unwrap();
        graph.set_edge_geometry_of(COORDINATES, 0, samples(2, 5.0)).unwrap();
        assert_eq!(graph.edge_geometry_lengths(COORDINATES).unwrap(), vec![2, 4, 5, 6]);
    }

    #[test]
    fn test_flat_values_reuse_ranges() {
        let mut graph = four_edges();
        let radii = Array2::from_elem((18, 1), 0.5);
        graph.set_edge_geometry("radii", radii).unwrap();
        assert_eq!(graph.edge_geometry_lengths("radii").unwrap(), vec![3, 4, 5, 6]);

        let err = graph.set_edge_geometry("bad", Array2::<f64>::zeros((4, 1))).unwrap_err();
        assert!(matches!(err, GraphError::Consistency(_)));
    }

    #[test]
    fn test_changing_lengths_with_other_attributes_fails() {
        let mut graph = four_edges();
        graph.set_edge_geometry("radii", Array2::from_elem((18, 1), 1.0)).unwrap();
        let list = vec![samples(1, 0.0), samples(1, 0.0), samples(1, 0.0), samples(1, 0.0)];
        let err = graph.set_edge_geometry(COORDINATES, list).unwrap_err();
        assert!(matches!(err, GraphError::Consistency(_)));
    }

    #[test]
    fn test_mode_conversion_is_lossless() {
        let mut graph = four_edges();
        let before = graph.edge_geometry(COORDINATES).unwrap();

        graph.set_edge_geometry_mode(GeometryMode::Scattered).unwrap();
        assert!(!graph.has_edge_property(GEOMETRY_INDICES));
        assert_eq!(graph.edge_geometry(COORDINATES).unwrap(), before);

        graph.set_edge_geometry_mode(GeometryMode::Packed).unwrap();
        assert_eq!(graph.edge_geometry(COORDINATES).unwrap(), before);
        assert_eq!(graph.edge_geometry_lengths(COORDINATES).unwrap(), vec![3, 4, 5, 6]);
    }

    #[test]
    fn test_remove_edge_compacts_geometry() {
        let mut graph = four_edges();
        graph.remove_edge(1).unwrap();
        let ranges = graph.edge_geometry_indices().unwrap();
        assert_eq!(range_lengths(&ranges), vec![3, 5, 6]);
        assert_eq!(ranges[1], GeometryRange::new(3, 8));
        assert_eq!(graph.edge_geometry_flat(COORDINATES).unwrap().nrows(), 14);
        assert_eq!(graph.edge_geometry_of(COORDINATES, 1).unwrap(), samples(5, 20.0));
    }

    #[test]
    fn test_remove_geometry_drops_indices() {
        let mut graph = four_edges();
        graph.remove_edge_geometry(Some(COORDINATES)).unwrap();
        assert!(!graph.has_edge_property(GEOMETRY_INDICES));
        assert!(graph.remove_edge_geometry(Some(COORDINATES)).is_err());
    }

    #[test]
    fn test_from_edge_property() {
        let mut graph = four_edges();
        graph.define_edge_property("label", vec![1i64, 2, 3, 4]).unwrap();
        graph.edge_geometry_from_edge_property("label", None).unwrap();
        let labels = graph.edge_geometry("label").unwrap();
        assert_eq!(labels[2], Array2::from_elem((5, 1), 3.0));
    }

    #[test]
    fn test_consistency_check() {
        let mut graph = Graph::new();
        graph.add_vertices(2);
        graph.add_edge(0, 1).unwrap();
        graph.set_vertex_coordinates(array![[0.0, 0.0], [2.0, 0.0]]).unwrap();
        graph
            .set_edge_geometry(COORDINATES, vec![array![[0.0, 0.0], [1.0, 0.5], [2.0, 0.0]]])
            .unwrap();
        assert_eq!(graph.is_edge_geometry_consistent(), Ok(true));

        graph
            .set_edge_geometry(COORDINATES, vec![array![[2.0, 0.0], [0.0, 0.0]]])
            .unwrap();
        assert_eq!(graph.inconsistent_edge_geometries(), Ok(vec![0]));
    }
}
