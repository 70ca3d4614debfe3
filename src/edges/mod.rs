//! Candidate edge sources feeding the greedy merge engine

pub mod explicit;
pub mod hamming;

use serde::{Serialize, Deserialize};

pub use explicit::ExplicitEdgeSource;
pub use hamming::ImplicitHammingSource;

/// Weighted undirected edge between two node ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint
    pub u: u32,

    /// Second endpoint
    pub v: u32,

    /// Non-negative edge cost (the distance between the endpoints)
    pub cost: u64,
}
