//! Fully-enumerated weighted edge lists

use crate::cluster::ClusterError;
use crate::edges::Edge;

/// Validated edge list held in ascending cost order
pub struct ExplicitEdgeSource {
    /// Edges, stable-sorted by cost at load time
    edges: Vec<Edge>,

    /// Number of nodes the edges range over
    node_count: usize,
}

impl ExplicitEdgeSource {
    /// Validate and sort an edge list over nodes 1..=`node_count`
    pub fn load(mut edges: Vec<Edge>, node_count: usize) -> Result<Self, ClusterError> {
        if node_count == 0 {
            return Err(ClusterError::MalformedInput(
                "node count must be positive".to_string(),
            ));
        }

        for edge in &edges {
            if edge.u == 0
                || edge.u as usize > node_count
                || edge.v == 0
                || edge.v as usize > node_count
            {
                return Err(ClusterError::MalformedInput(format!(
                    "edge ({}, {}) references a node outside [1, {}]",
                    edge.u, edge.v, node_count
                )));
            }
            if edge.u == edge.v {
                return Err(ClusterError::MalformedInput(format!(
                    "self-loop on node {}",
                    edge.u
                )));
            }
        }

        // Stable sort keeps equal-cost edges in input order, so repeated
        // runs visit ties identically
        edges.sort_by_key(|edge| edge.cost);

        Ok(Self { edges, node_count })
    }

    /// Number of nodes the source was built for
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of edges held
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in non-decreasing cost order
    pub fn sorted_ascending(&self) -> &[Edge] {
        &self.edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(u: u32, v: u32, cost: u64) -> Edge {
        Edge { u, v, cost }
    }

    #[test]
    fn test_load_sorts_by_ascending_cost() {
        let source = ExplicitEdgeSource::load(
            vec![edge(1, 2, 9), edge(2, 3, 1), edge(1, 3, 4)],
            3,
        )
        .unwrap();
        let costs: Vec<u64> = source.sorted_ascending().iter().map(|e| e.cost).collect();
        assert_eq!(costs, vec![1, 4, 9]);
    }

    #[test]
    fn test_load_keeps_tied_costs_in_input_order() {
        let source = ExplicitEdgeSource::load(
            vec![edge(1, 2, 7), edge(3, 4, 7), edge(2, 3, 7)],
            4,
        )
        .unwrap();
        let pairs: Vec<(u32, u32)> = source
            .sorted_ascending()
            .iter()
            .map(|e| (e.u, e.v))
            .collect();
        assert_eq!(pairs, vec![(1, 2), (3, 4), (2, 3)]);
    }

    #[test]
    fn test_load_rejects_out_of_range_ids() {
        let result = ExplicitEdgeSource::load(vec![edge(1, 5, 2)], 4);
        assert!(matches!(result, Err(ClusterError::MalformedInput(_))));
        let result = ExplicitEdgeSource::load(vec![edge(0, 2, 2)], 4);
        assert!(matches!(result, Err(ClusterError::MalformedInput(_))));
    }

    #[test]
    fn test_load_rejects_self_loops_and_empty_graphs() {
        let result = ExplicitEdgeSource::load(vec![edge(2, 2, 1)], 4);
        assert!(matches!(result, Err(ClusterError::MalformedInput(_))));
        let result = ExplicitEdgeSource::load(Vec::new(), 0);
        assert!(matches!(result, Err(ClusterError::MalformedInput(_))));
    }
}
