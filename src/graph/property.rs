//! Property value types for vertices, edges and the graph itself
//!
//! A [`PropertyValue`] is a single element of an attribute array; whole
//! arrays live in [`Column`](super::storage::Column)s.

use super::storage::Column;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Single property element over the closed set of supported kinds
///
/// Supports:
/// - Boolean, Integer (i64), Float (f64), String scalars
/// - Integer/Float vectors (one row of a fixed-width or variable-length column)
/// - Samples: a variable-length run of fixed-width samples (one edge's geometry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    IntegerVector(Vec<i64>),
    FloatVector(Vec<f64>),
    Samples(Array2<f64>),
    Null,
}

impl PropertyValue {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get float value, widening integers
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            PropertyValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer_vector(&self) -> Option<&[i64]> {
        match self {
            PropertyValue::IntegerVector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float_vector(&self) -> Option<&[f64]> {
        match self {
            PropertyValue::FloatVector(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_samples(&self) -> Option<&Array2<f64>> {
        match self {
            PropertyValue::Samples(s) => Some(s),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Boolean(_) => "Boolean",
            PropertyValue::Integer(_) => "Integer",
            PropertyValue::Float(_) => "Float",
            PropertyValue::String(_) => "String",
            PropertyValue::IntegerVector(_) => "IntegerVector",
            PropertyValue::FloatVector(_) => "FloatVector",
            PropertyValue::Samples(_) => "Samples",
            PropertyValue::Null => "Null",
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{}", fl),
            PropertyValue::String(s) => write!(f, "\"{}\"", s),
            PropertyValue::IntegerVector(v) => write!(f, "{:?}", v),
            PropertyValue::FloatVector(v) => write!(f, "{:?}", v),
            PropertyValue::Samples(s) => write!(f, "Samples({}x{})", s.nrows(), s.ncols()),
            PropertyValue::Null => write!(f, "null"),
        }
    }
}

// Convenience conversions
impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<usize> for PropertyValue {
    fn from(i: usize) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<Vec<i64>> for PropertyValue {
    fn from(v: Vec<i64>) -> Self {
        PropertyValue::IntegerVector(v)
    }
}

impl From<Vec<f64>> for PropertyValue {
    fn from(v: Vec<f64>) -> Self {
        PropertyValue::FloatVector(v)
    }
}

impl<const N: usize> From<[f64; N]> for PropertyValue {
    fn from(v: [f64; N]) -> Self {
        PropertyValue::FloatVector(v.to_vec())
    }
}

impl From<Array1<f64>> for PropertyValue {
    fn from(v: Array1<f64>) -> Self {
        PropertyValue::FloatVector(v.to_vec())
    }
}

impl From<Array2<f64>> for PropertyValue {
    fn from(s: Array2<f64>) -> Self {
        PropertyValue::Samples(s)
    }
}

/// Entry of the graph-level attribute table: either a single value or a
/// whole array (packed geometry lives here).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GraphProperty {
    Value(PropertyValue),
    Array(Column),
}

impl GraphProperty {
    pub fn as_value(&self) -> Option<&PropertyValue> {
        match self {
            GraphProperty::Value(v) => Some(v),
            GraphProperty::Array(_) => None,
        }
    }

    pub fn as_array(&self) -> Option<&Column> {
        match self {
            GraphProperty::Array(c) => Some(c),
            GraphProperty::Value(_) => None,
        }
    }
}

impl From<PropertyValue> for GraphProperty {
    fn from(value: PropertyValue) -> Self {
        GraphProperty::Value(value)
    }
}

impl From<Column> for GraphProperty {
    fn from(column: Column) -> Self {
        GraphProperty::Array(column)
    }
}
