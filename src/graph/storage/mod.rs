pub mod columnar;

pub use columnar::{Column, PropertyTable};
