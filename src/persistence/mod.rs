//! Whole-graph persistence
//!
//! A graph is saved as one file holding every attribute table, the edge
//! geometry mode and, in packed mode, the flat geometry arrays with their
//! `indices` edge attribute. See [`snapshot`] for the byte layout.

pub mod snapshot;

pub use snapshot::{decode, encode, GraphSnapshot, SnapshotOptions};

use crate::graph::engine::GraphEngine;
use crate::graph::store::{Graph, GraphError};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Persistence errors
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Corrupted graph file: {0}")]
    Corrupted(String),

    #[error("Unsupported graph file version {0}")]
    UnsupportedVersion(u16),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Save a graph to `path` with default options (compressed)
pub fn save<E: GraphEngine>(path: impl AsRef<Path>, graph: &Graph<E>) -> PersistenceResult<()> {
    save_with(path, graph, &SnapshotOptions::default())
}

pub fn save_with<E: GraphEngine>(
    path: impl AsRef<Path>,
    graph: &Graph<E>,
    options: &SnapshotOptions,
) -> PersistenceResult<()> {
    let path = path.as_ref();
    let bytes = encode(graph, options)?;
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    info!(
        "Saved graph with {} vertices and {} edges to {:?} ({} bytes)",
        graph.n_vertices(),
        graph.n_edges(),
        path,
        bytes.len()
    );
    Ok(())
}

/// Load a graph saved with [`save`]
pub fn load<E: GraphEngine>(path: impl AsRef<Path>) -> PersistenceResult<Graph<E>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let graph: Graph<E> = decode(&bytes)?;
    info!(
        "Loaded graph with {} vertices and {} edges from {:?}",
        graph.n_vertices(),
        graph.n_edges(),
        path
    );
    Ok(graph)
}

impl<E: GraphEngine> Graph<E> {
    pub fn save(&self, path: impl AsRef<Path>) -> PersistenceResult<()> {
        save(path, self)
    }

    pub fn load(path: impl AsRef<Path>) -> PersistenceResult<Self> {
        load(path)
    }
}
