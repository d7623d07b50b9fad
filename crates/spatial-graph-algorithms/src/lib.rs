pub mod common;
pub mod components;

pub use common::{CsrTopology, VertexIndex};
pub use components::{connected_components, ComponentLabels};
