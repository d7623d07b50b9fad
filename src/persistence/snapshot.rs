//! Graph snapshot file format
//!
//! ```text
//! +-------+---------+-------+-----------------+-------------+---------+
//! | magic | version | flags | sha256(payload) | payload len | payload |
//! | SPGR  | u16 LE  | u8    | 32 bytes        | u64 LE      | bytes   |
//! +-------+---------+-------+-----------------+-------------+---------+
//! ```
//!
//! The payload is a bincode encoded [`GraphSnapshot`], gzip compressed when
//! [`FLAG_GZIP`] is set.

use super::{PersistenceError, PersistenceResult};
use crate::graph::engine::GraphEngine;
use crate::graph::property::GraphProperty;
use crate::graph::storage::PropertyTable;
use crate::graph::store::Graph;
use crate::graph::types::{GeometryMode, VertexId};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::cell::OnceCell;
use std::io::{Read, Write};

pub const MAGIC: &[u8; 4] = b"SPGR";
pub const FORMAT_VERSION: u16 = 1;
pub const FLAG_GZIP: u8 = 0b0000_0001;

const DIGEST_LEN: usize = 32;
const HEADER_LEN: usize = 4 + 2 + 1 + DIGEST_LEN + 8;

/// Options controlling how a snapshot is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotOptions {
    pub compress: bool,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        SnapshotOptions { compress: true }
    }
}

/// Engine independent logical content of a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub directed: bool,
    pub vertex_count: usize,
    pub edges: Vec<(VertexId, VertexId)>,
    pub vertex_properties: PropertyTable,
    pub edge_properties: PropertyTable,
    pub graph_properties: IndexMap<String, GraphProperty>,
    pub geometry_mode: GeometryMode,
}

impl GraphSnapshot {
    pub fn capture<E: GraphEngine>(graph: &Graph<E>) -> Self {
        GraphSnapshot {
            directed: graph.is_directed(),
            vertex_count: graph.n_vertices(),
            edges: graph.edge_connectivity(),
            vertex_properties: graph.vertex_properties.clone(),
            edge_properties: graph.edge_properties.clone(),
            graph_properties: graph.graph_properties.clone(),
            geometry_mode: graph.geometry_mode,
        }
    }

    /// Rebuild a graph on any engine
    pub fn restore<E: GraphEngine>(self) -> PersistenceResult<Graph<E>> {
        if self.vertex_properties.len() != self.vertex_count {
            return Err(PersistenceError::Corrupted(format!(
                "vertex table has {} rows for {} vertices",
                self.vertex_properties.len(),
                self.vertex_count
            )));
        }
        if self.edge_properties.len() != self.edges.len() {
            return Err(PersistenceError::Corrupted(format!(
                "edge table has {} rows for {} edges",
                self.edge_properties.len(),
                self.edges.len()
            )));
        }

        let mut engine = E::with_direction(self.directed);
        engine.add_vertices(self.vertex_count);
        engine.add_edges(&self.edges)?;
        Ok(Graph {
            engine,
            vertex_properties: self.vertex_properties,
            edge_properties: self.edge_properties,
            graph_properties: self.graph_properties,
            geometry_mode: self.geometry_mode,
            mesh_cache: OnceCell::new(),
        })
    }
}

/// Serialize a graph into the snapshot file format
pub fn encode<E: GraphEngine>(graph: &Graph<E>, options: &SnapshotOptions) -> PersistenceResult<Vec<u8>> {
    let raw = bincode::serialize(&GraphSnapshot::capture(graph))?;
    let (payload, flags) = if options.compress {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&raw)?;
        (encoder.finish()?, FLAG_GZIP)
    } else {
        (raw, 0)
    };

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.push(flags);
    bytes.extend_from_slice(&Sha256::digest(&payload));
    bytes.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Parse the snapshot file format back into a graph
pub fn decode<E: GraphEngine>(bytes: &[u8]) -> PersistenceResult<Graph<E>> {
    if bytes.len() < HEADER_LEN {
        return Err(PersistenceError::Corrupted(format!(
            "file is {} bytes, shorter than the {} byte header",
            bytes.len(),
            HEADER_LEN
        )));
    }
    let (header, payload) = bytes.split_at(HEADER_LEN);
    if &header[0..4] != MAGIC {
        return Err(PersistenceError::Corrupted("bad magic".to_string()));
    }
    let version = u16::from_le_bytes([header[4], header[5]]);
    if version != FORMAT_VERSION {
        return Err(PersistenceError::UnsupportedVersion(version));
    }
    let flags = header[6];
    let digest = &header[7..7 + DIGEST_LEN];
    let mut len_bytes = [0u8; 8];
    len_bytes.copy_from_slice(&header[7 + DIGEST_LEN..HEADER_LEN]);
    let len = u64::from_le_bytes(len_bytes) as usize;

    if payload.len() != len {
        return Err(PersistenceError::Corrupted(format!(
            "payload is {} bytes, header says {}",
            payload.len(),
            len
        )));
    }
    if Sha256::digest(payload).as_slice() != digest {
        return Err(PersistenceError::Corrupted("payload digest mismatch".to_string()));
    }

    let raw = if flags & FLAG_GZIP != 0 {
        let mut raw = Vec::new();
        GzDecoder::new(payload).read_to_end(&mut raw)?;
        raw
    } else {
        payload.to_vec()
    };
    let snapshot: GraphSnapshot = bincode::deserialize(&raw)?;
    snapshot.restore()
}
