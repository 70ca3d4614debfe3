//! Cluster analysis module

pub mod disjoint;
pub mod engine;

use serde::{Serialize, Deserialize};
use thiserror::Error;

pub use disjoint::DisjointSets;
pub use engine::GreedyClusterEngine;

/// Errors surfaced by the clustering core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClusterError {
    /// Structural violation of the documented input format
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Node id used outside the valid range [1, N]
    #[error("node id {id} outside valid range [1, {node_count}]")]
    OutOfRange { id: u32, node_count: usize },

    /// Requested cluster count cannot be reached
    #[error("cannot reach {requested} clusters over {node_count} nodes")]
    InsufficientClusters { requested: usize, node_count: usize },
}

/// Represents one cluster of the final partition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    /// Identifier for this cluster (its root node id)
    pub id: u32,

    /// Members of this cluster (node ids)
    pub members: Vec<u32>,

    /// Size of the cluster
    pub size: usize,
}
