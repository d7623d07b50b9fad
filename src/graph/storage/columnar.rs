//! Columnar storage for vertex and edge properties.
//!
//! Every attribute is one typed array keyed positionally by vertex or edge id,
//! so whole-array reads and writes never go through per-element objects.

use crate::graph::store::{GraphError, GraphResult};
use crate::graph::PropertyValue;
use indexmap::IndexMap;
use ndarray::{s, Array2, ArrayView1, Axis, LinalgScalar};
use serde::{Deserialize, Serialize};

/// A single property column.
///
/// Fixed-width vectors are stored as 2-D arrays (one row per element),
/// variable-length vectors as a vector of vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Boolean(Vec<bool>),
    Integer(Vec<i64>),
    Float(Vec<f64>),
    String(Vec<String>),
    IntegerVector(Array2<i64>),
    FloatVector(Array2<f64>),
    IntegerList(Vec<Vec<i64>>),
    FloatList(Vec<Vec<f64>>),
    /// Per element a variable number of fixed-width samples
    Samples(Vec<Array2<f64>>),
}

impl Column {
    /// Number of elements (rows)
    pub fn len(&self) -> usize {
        match self {
            Column::Boolean(v) => v.len(),
            Column::Integer(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::String(v) => v.len(),
            Column::IntegerVector(a) => a.nrows(),
            Column::FloatVector(a) => a.nrows(),
            Column::IntegerList(v) => v.len(),
            Column::FloatList(v) => v.len(),
            Column::Samples(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Column::Boolean(_) => "Boolean",
            Column::Integer(_) => "Integer",
            Column::Float(_) => "Float",
            Column::String(_) => "String",
            Column::IntegerVector(_) => "IntegerVector",
            Column::FloatVector(_) => "FloatVector",
            Column::IntegerList(_) => "IntegerList",
            Column::FloatList(_) => "FloatList",
            Column::Samples(_) => "Samples",
        }
    }

    /// Row width for fixed-width vector columns
    pub fn width(&self) -> Option<usize> {
        match self {
            Column::IntegerVector(a) => Some(a.ncols()),
            Column::FloatVector(a) => Some(a.ncols()),
            _ => None,
        }
    }

    /// Empty column able to hold `value`, sized `len` and filled with defaults.
    ///
    /// Used when a property is defined for a single element before the rest
    /// of the array exists.
    pub fn default_like(value: &PropertyValue, len: usize) -> GraphResult<Self> {
        let column = match value {
            PropertyValue::Boolean(_) => Column::Boolean(vec![false; len]),
            PropertyValue::Integer(_) => Column::Integer(vec![0; len]),
            PropertyValue::Float(_) => Column::Float(vec![0.0; len]),
            PropertyValue::String(_) => Column::String(vec![String::new(); len]),
            PropertyValue::IntegerVector(v) => Column::IntegerVector(Array2::zeros((len, v.len()))),
            PropertyValue::FloatVector(v) => Column::FloatVector(Array2::zeros((len, v.len()))),
            PropertyValue::Samples(s) => Column::Samples(vec![Array2::zeros((0, s.ncols())); len]),
            PropertyValue::Null => {
                return Err(GraphError::InvalidArgument(
                    "cannot infer a property type from null".to_string(),
                ))
            }
        };
        Ok(column)
    }

    pub fn get(&self, idx: usize) -> Option<PropertyValue> {
        if idx >= self.len() {
            return None;
        }
        let value = match self {
            Column::Boolean(v) => PropertyValue::Boolean(v[idx]),
            Column::Integer(v) => PropertyValue::Integer(v[idx]),
            Column::Float(v) => PropertyValue::Float(v[idx]),
            Column::String(v) => PropertyValue::String(v[idx].clone()),
            Column::IntegerVector(a) => PropertyValue::IntegerVector(a.row(idx).to_vec()),
            Column::FloatVector(a) => PropertyValue::FloatVector(a.row(idx).to_vec()),
            Column::IntegerList(v) => PropertyValue::IntegerVector(v[idx].clone()),
            Column::FloatList(v) => PropertyValue::FloatVector(v[idx].clone()),
            Column::Samples(v) => PropertyValue::Samples(v[idx].clone()),
        };
        Some(value)
    }

    /// Overwrite one element. The value must match the column type; integers
    /// are widened into float columns.
    pub fn set(&mut self, idx: usize, value: PropertyValue) -> GraphResult<()> {
        let len = self.len();
        if idx >= len {
            return Err(GraphError::InvalidArgument(format!(
                "element {} out of bounds for column of length {}",
                idx, len
            )));
        }
        let type_name = self.type_name();
        match (self, value) {
            (Column::Boolean(v), PropertyValue::Boolean(val)) => v[idx] = val,
            (Column::Integer(v), PropertyValue::Integer(val)) => v[idx] = val,
            (Column::Float(v), PropertyValue::Float(val)) => v[idx] = val,
            (Column::Float(v), PropertyValue::Integer(val)) => v[idx] = val as f64,
            (Column::String(v), PropertyValue::String(val)) => v[idx] = val,
            (Column::IntegerVector(a), PropertyValue::IntegerVector(val)) => {
                check_width(a.ncols(), val.len())?;
                a.row_mut(idx).assign(&ArrayView1::from(&val[..]));
            }
            (Column::FloatVector(a), PropertyValue::FloatVector(val)) => {
                check_width(a.ncols(), val.len())?;
                a.row_mut(idx).assign(&ArrayView1::from(&val[..]));
            }
            (Column::IntegerList(v), PropertyValue::IntegerVector(val)) => v[idx] = val,
            (Column::FloatList(v), PropertyValue::FloatVector(val)) => v[idx] = val,
            (Column::Samples(v), PropertyValue::Samples(val)) => v[idx] = val,
            (_, other) => {
                return Err(GraphError::InvalidArgument(format!(
                    "cannot store {} in a {} column",
                    other.type_name(),
                    type_name
                )))
            }
        }
        Ok(())
    }

    /// New column holding the given rows, in the given order.
    pub fn select(&self, rows: &[usize]) -> Column {
        fn pick<T: Clone>(v: &[T], rows: &[usize]) -> Vec<T> {
            rows.iter().map(|&r| v[r].clone()).collect()
        }
        match self {
            Column::Boolean(v) => Column::Boolean(pick(v, rows)),
            Column::Integer(v) => Column::Integer(pick(v, rows)),
            Column::Float(v) => Column::Float(pick(v, rows)),
            Column::String(v) => Column::String(pick(v, rows)),
            Column::IntegerVector(a) => Column::IntegerVector(a.select(Axis(0), rows)),
            Column::FloatVector(a) => Column::FloatVector(a.select(Axis(0), rows)),
            Column::IntegerList(v) => Column::IntegerList(pick(v, rows)),
            Column::FloatList(v) => Column::FloatList(pick(v, rows)),
            Column::Samples(v) => Column::Samples(pick(v, rows)),
        }
    }

    /// Grow with default elements or truncate to `len` rows.
    pub fn resize(&mut self, len: usize) {
        match self {
            Column::Boolean(v) => v.resize(len, false),
            Column::Integer(v) => v.resize(len, 0),
            Column::Float(v) => v.resize(len, 0.0),
            Column::String(v) => v.resize(len, String::new()),
            Column::IntegerVector(a) => *a = resize_rows(a, len),
            Column::FloatVector(a) => *a = resize_rows(a, len),
            Column::IntegerList(v) => v.resize(len, Vec::new()),
            Column::FloatList(v) => v.resize(len, Vec::new()),
            Column::Samples(v) => {
                let width = v.first().map(|s| s.ncols()).unwrap_or(0);
                v.resize(len, Array2::zeros((0, width)));
            }
        }
    }

    pub fn as_booleans(&self) -> Option<&[bool]> {
        match self {
            Column::Boolean(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_integers(&self) -> Option<&[i64]> {
        match self {
            Column::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_floats(&self) -> Option<&[f64]> {
        match self {
            Column::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_integer_vectors(&self) -> Option<&Array2<i64>> {
        match self {
            Column::IntegerVector(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_float_vectors(&self) -> Option<&Array2<f64>> {
        match self {
            Column::FloatVector(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_samples(&self) -> Option<&[Array2<f64>]> {
        match self {
            Column::Samples(v) => Some(v),
            _ => None,
        }
    }
}

fn check_width(expected: usize, found: usize) -> GraphResult<()> {
    if expected != found {
        return Err(GraphError::DimensionMismatch {
            what: "vector width",
            expected,
            found,
        });
    }
    Ok(())
}

fn resize_rows<T: LinalgScalar>(a: &Array2<T>, len: usize) -> Array2<T> {
    let keep = a.nrows().min(len);
    let mut resized = Array2::zeros((len, a.ncols()));
    resized.slice_mut(s![..keep, ..]).assign(&a.slice(s![..keep, ..]));
    resized
}

fn stack_rows<T: LinalgScalar>(rows: &[Vec<T>], width: usize) -> Array2<T> {
    let mut stacked = Array2::zeros((rows.len(), width));
    for (i, row) in rows.iter().enumerate() {
        stacked.row_mut(i).assign(&ArrayView1::from(&row[..]));
    }
    stacked
}

/// Infer the storage layout from per-element rows: equal widths become a
/// fixed-width 2-D column, ragged rows a list column.
impl From<Vec<Vec<f64>>> for Column {
    fn from(rows: Vec<Vec<f64>>) -> Self {
        match uniform_width(&rows) {
            Some(width) => Column::FloatVector(stack_rows(&rows, width)),
            None => Column::FloatList(rows),
        }
    }
}

impl From<Vec<Vec<i64>>> for Column {
    fn from(rows: Vec<Vec<i64>>) -> Self {
        match uniform_width(&rows) {
            Some(width) => Column::IntegerVector(stack_rows(&rows, width)),
            None => Column::IntegerList(rows),
        }
    }
}

/// Common non-zero width of all rows; empty input or zero-width rows are
/// treated as ragged so the element count is not lost.
fn uniform_width<T>(rows: &[Vec<T>]) -> Option<usize> {
    let width = rows.first()?.len();
    if width == 0 {
        return None;
    }
    rows.iter().all(|r| r.len() == width).then_some(width)
}

impl From<Vec<bool>> for Column {
    fn from(v: Vec<bool>) -> Self {
        Column::Boolean(v)
    }
}

impl From<Vec<i64>> for Column {
    fn from(v: Vec<i64>) -> Self {
        Column::Integer(v)
    }
}

impl From<Vec<i32>> for Column {
    fn from(v: Vec<i32>) -> Self {
        Column::Integer(v.into_iter().map(i64::from).collect())
    }
}

impl From<Vec<f64>> for Column {
    fn from(v: Vec<f64>) -> Self {
        Column::Float(v)
    }
}

impl From<Vec<String>> for Column {
    fn from(v: Vec<String>) -> Self {
        Column::String(v)
    }
}

impl From<Array2<f64>> for Column {
    fn from(a: Array2<f64>) -> Self {
        Column::FloatVector(a)
    }
}

impl From<Array2<i64>> for Column {
    fn from(a: Array2<i64>) -> Self {
        Column::IntegerVector(a)
    }
}

impl From<Vec<Array2<f64>>> for Column {
    fn from(v: Vec<Array2<f64>>) -> Self {
        Column::Samples(v)
    }
}

/// Manages the property columns of one table (vertices or edges).
///
/// All columns have exactly `len` rows. Column order is insertion order.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyTable {
    /// Number of rows every column must have
    len: usize,
    /// Mapping from property name -> Column
    columns: IndexMap<String, Column>,
}

impl PropertyTable {
    pub fn new(len: usize) -> Self {
        PropertyTable {
            len,
            columns: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Optimized batch read for a single property
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Insert or replace a whole column. Its length must match the table.
    pub fn insert(&mut self, name: impl Into<String>, column: Column) -> GraphResult<()> {
        if column.len() != self.len {
            return Err(GraphError::DimensionMismatch {
                what: "property length",
                expected: self.len,
                found: column.len(),
            });
        }
        self.columns.insert(name.into(), column);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Option<Column> {
        self.columns.shift_remove(name)
    }

    pub fn get_value(&self, name: &str, idx: usize) -> Option<PropertyValue> {
        self.columns.get(name).and_then(|col| col.get(idx))
    }

    /// Set one element, creating the column with defaults when absent.
    pub fn define_value(&mut self, name: &str, idx: usize, value: PropertyValue) -> GraphResult<()> {
        if let Some(col) = self.columns.get_mut(name) {
            return col.set(idx, value);
        }
        let mut col = Column::default_like(&value, self.len)?;
        col.set(idx, value)?;
        self.columns.insert(name.to_string(), col);
        Ok(())
    }

    /// Set one element of an existing column.
    pub fn set_value(&mut self, name: &str, idx: usize, value: PropertyValue) -> Option<GraphResult<()>> {
        self.columns.get_mut(name).map(|col| col.set(idx, value))
    }

    /// Grow every column with defaults (or truncate) to `len` rows.
    pub fn resize(&mut self, len: usize) {
        for col in self.columns.values_mut() {
            col.resize(len);
        }
        self.len = len;
    }

    /// New table keeping the given rows, in order.
    pub fn select(&self, rows: &[usize]) -> PropertyTable {
        PropertyTable {
            len: rows.len(),
            columns: self
                .columns
                .iter()
                .map(|(name, col)| (name.clone(), col.select(rows)))
                .collect(),
        }
    }

    /// Drop one row, shifting subsequent rows down.
    pub fn remove_row(&mut self, row: usize) {
        let keep: Vec<usize> = (0..self.len).filter(|&r| r != row).collect();
        *self = self.select(&keep);
    }
}
