//! Edge geometry: packed ranges, the dual-mode store and the derived line mesh

pub mod mesh;
pub mod ranges;
pub mod store;

pub use mesh::EdgeMesh;
pub use ranges::{compact, compute_ranges, range_lengths, remap, GeometryRange};
pub use store::{GeometryValues, GEOMETRY_INDICES, GEOMETRY_PREFIX};
