//! Packed geometry ranges
//!
//! In packed mode every edge owns a half-open row range `[start, end)` into
//! the flat per-attribute arrays. After filtering, the surviving ranges have
//! gaps; [`compact`] recomputes contiguous ranges and [`remap`] moves the data.

use crate::graph::store::{GraphError, GraphResult};
use ndarray::{s, Array2, LinalgScalar};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Row range of one edge's samples in a packed array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GeometryRange {
    pub start: usize,
    pub end: usize,
}

impl GeometryRange {
    pub fn new(start: usize, end: usize) -> Self {
        GeometryRange { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<(usize, usize)> for GeometryRange {
    fn from((start, end): (usize, usize)) -> Self {
        GeometryRange { start, end }
    }
}

/// Contiguous ranges for the given per-edge lengths
///
/// `ranges[i] = (sum(lengths[..i]), sum(lengths[..=i]))`
pub fn compute_ranges(lengths: &[usize]) -> Vec<GeometryRange> {
    let mut offset = 0;
    lengths
        .iter()
        .map(|&len| {
            let range = GeometryRange::new(offset, offset + len);
            offset += len;
            range
        })
        .collect()
}

pub fn range_lengths(ranges: &[GeometryRange]) -> Vec<usize> {
    ranges.iter().map(GeometryRange::len).collect()
}

/// Gap-free ranges with the same per-edge lengths. Idempotent.
pub fn compact(ranges: &[GeometryRange]) -> Vec<GeometryRange> {
    compute_ranges(&range_lengths(ranges))
}

/// Number of rows a packed array needs to hold every range
pub fn packed_len(ranges: &[GeometryRange]) -> usize {
    ranges.iter().map(|r| r.end).max().unwrap_or(0)
}

/// Check every range is well formed and lies within `len` rows
pub fn validate(ranges: &[GeometryRange], len: usize) -> GraphResult<()> {
    for (edge, range) in ranges.iter().enumerate() {
        if range.start > range.end || range.end > len {
            return Err(GraphError::Consistency(format!(
                "geometry range [{}, {}) of edge {} is invalid for {} samples",
                range.start, range.end, edge, len
            )));
        }
    }
    Ok(())
}

/// Copy each old range of `values` into the corresponding new range of a
/// fresh array sized by `new_ranges`.
///
/// All ranges are validated before any data is written: counts must match,
/// per-edge lengths must match, and old ranges must lie inside `values`.
pub fn remap<T: LinalgScalar>(
    old_ranges: &[GeometryRange],
    new_ranges: &[GeometryRange],
    values: &Array2<T>,
) -> GraphResult<Array2<T>> {
    if old_ranges.len() != new_ranges.len() {
        return Err(GraphError::Consistency(format!(
            "cannot remap {} geometry ranges onto {}",
            old_ranges.len(),
            new_ranges.len()
        )));
    }
    validate(old_ranges, values.nrows())?;
    for (edge, (old, new)) in old_ranges.iter().zip(new_ranges).enumerate() {
        if new.start > new.end || old.len() != new.len() {
            return Err(GraphError::Consistency(format!(
                "geometry range of edge {} changes length from {} to {}",
                edge,
                old.len(),
                new.len()
            )));
        }
    }

    let mut remapped = Array2::zeros((packed_len(new_ranges), values.ncols()));
    for (old, new) in old_ranges.iter().zip(new_ranges) {
        remapped
            .slice_mut(s![new.as_range(), ..])
            .assign(&values.slice(s![old.as_range(), ..]));
    }
    Ok(remapped)
}

/// Encode ranges as an `n x 2` integer array (the stored `indices` attribute)
pub fn ranges_to_array(ranges: &[GeometryRange]) -> Array2<i64> {
    let mut array = Array2::zeros((ranges.len(), 2));
    for (i, range) in ranges.iter().enumerate() {
        array[[i, 0]] = range.start as i64;
        array[[i, 1]] = range.end as i64;
    }
    array
}

/// Decode an `n x 2` integer array into ranges
pub fn ranges_from_array(array: &Array2<i64>) -> GraphResult<Vec<GeometryRange>> {
    if array.ncols() != 2 {
        return Err(GraphError::DimensionMismatch {
            what: "geometry indices width",
            expected: 2,
            found: array.ncols(),
        });
    }
    array
        .rows()
        .into_iter()
        .enumerate()
        .map(|(edge, row)| {
            let (start, end) = (row[0], row[1]);
            if start < 0 || end < start {
                return Err(GraphError::Consistency(format!(
                    "geometry range [{}, {}) of edge {} is invalid",
                    start, end, edge
                )));
            }
            Ok(GeometryRange::new(start as usize, end as usize))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn ranges(pairs: &[(usize, usize)]) -> Vec<GeometryRange> {
        pairs.iter().copied().map(GeometryRange::from).collect()
    }

    #[test]
    fn test_compute_ranges() {
        assert_eq!(compute_ranges(&[3, 4, 5, 6]), ranges(&[(0, 3), (3, 7), (7, 12), (12, 18)]));
        assert_eq!(compute_ranges(&[0, 2, 0]), ranges(&[(0, 0), (0, 2), (2, 2)]));
        assert!(compute_ranges(&[]).is_empty());
    }

    #[test]
    fn test_compact_is_idempotent_and_preserves_lengths() {
        let gappy = ranges(&[(3, 7), (12, 18), (20, 20)]);
        let compacted = compact(&gappy);
        assert_eq!(compacted, ranges(&[(0, 4), (4, 10), (10, 10)]));
        assert_eq!(range_lengths(&compacted), range_lengths(&gappy));
        assert_eq!(compact(&compacted), compacted);
    }

    #[test]
    fn test_remap_moves_rows() {
        let values = array![[0.0], [1.0], [2.0], [3.0], [4.0], [5.0]];
        let old = ranges(&[(1, 3), (4, 6)]);
        let new = compact(&old);
        let remapped = remap(&old, &new, &values).unwrap();
        assert_eq!(remapped, array![[1.0], [2.0], [4.0], [5.0]]);
    }

    #[test]
    fn test_remap_rejects_length_change_without_writing() {
        let values = array![[0.0], [1.0], [2.0]];
        let old = ranges(&[(0, 1), (1, 3)]);
        let new = ranges(&[(0, 1), (1, 2)]);
        let err = remap(&old, &new, &values).unwrap_err();
        assert!(matches!(err, GraphError::Consistency(_)));
    }

    #[test]
    fn test_remap_rejects_out_of_bounds() {
        let values = array![[0.0], [1.0]];
        let old = ranges(&[(0, 4)]);
        let new = ranges(&[(0, 4)]);
        assert!(matches!(remap(&old, &new, &values), Err(GraphError::Consistency(_))));
    }

    #[test]
    fn test_array_encoding() {
        let original = ranges(&[(0, 3), (3, 7)]);
        let array = ranges_to_array(&original);
        assert_eq!(array, array![[0, 3], [3, 7]]);
        assert_eq!(ranges_from_array(&array).unwrap(), original);
        assert!(ranges_from_array(&array![[3, 1]]).is_err());
        assert!(ranges_from_array(&array![[0, 1, 2]]).is_err());
    }
}
