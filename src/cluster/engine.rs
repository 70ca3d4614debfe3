//! Greedy single-linkage merge engine

use std::collections::HashMap;

use crate::cluster::{Cluster, ClusterError, DisjointSets};
use crate::edges::{Edge, ExplicitEdgeSource, ImplicitHammingSource};

/// Drives DisjointSets unions over a candidate edge stream
///
/// The engine starts from N singleton clusters and only ever merges; the
/// cluster count decreases monotonically until the query's stopping point.
pub struct GreedyClusterEngine {
    sets: DisjointSets,
}

impl GreedyClusterEngine {
    /// Create an engine over `node_count` singleton clusters
    pub fn new(node_count: usize) -> Self {
        Self {
            sets: DisjointSets::new(node_count),
        }
    }

    /// Current number of clusters
    pub fn cluster_count(&self) -> usize {
        self.sets.cluster_count()
    }

    /// Maximum spacing of a clustering with `target_k` clusters
    ///
    /// Pulls edges in ascending cost order, merging endpoints that sit in
    /// different clusters until exactly `target_k` clusters remain. The
    /// spacing is the cost of the first remaining edge that still connects
    /// two different clusters.
    pub fn spacing_for_target_k(
        &mut self,
        source: &ExplicitEdgeSource,
        target_k: usize,
    ) -> Result<u64, ClusterError> {
        self.check_node_count(source.node_count())?;
        let node_count = self.sets.node_count();

        // k = 1 has no cross-cluster edge left to witness the spacing
        if target_k < 2 || target_k > node_count {
            return Err(ClusterError::InsufficientClusters {
                requested: target_k,
                node_count,
            });
        }

        let mut edges = source.sorted_ascending().iter();

        while self.sets.cluster_count() > target_k {
            match edges.next() {
                Some(edge) => {
                    self.sets.union_roots(edge.u, edge.v);
                }
                None => {
                    return Err(ClusterError::InsufficientClusters {
                        requested: target_k,
                        node_count,
                    });
                }
            }
        }

        log::debug!(
            "Reached {} clusters, scanning for the spacing witness",
            target_k
        );

        // The first cross-cluster edge in the remaining stream is the
        // cheapest separation the final clustering still keeps
        for edge in edges {
            if self.sets.find_root(edge.u) != self.sets.find_root(edge.v) {
                return Ok(edge.cost);
            }
        }

        Err(ClusterError::MalformedInput(format!(
            "no cross-cluster edge remains after reaching {} clusters; \
             the edge list does not describe a complete graph",
            target_k
        )))
    }

    /// Largest cluster count whose clustering keeps spacing >= `min_spacing`
    ///
    /// Merges every candidate pair at Hamming distance below `min_spacing`,
    /// one distance class at a time in ascending order. `min_spacing` of 1
    /// performs no merges at all; values above 3 are rejected because the
    /// source never enumerates pairs at distance 3 or more.
    pub fn max_k_for_min_spacing(
        &mut self,
        source: &ImplicitHammingSource,
        min_spacing: u32,
    ) -> Result<usize, ClusterError> {
        self.check_node_count(source.node_count())?;

        if min_spacing < 1 {
            return Err(ClusterError::MalformedInput(
                "min_spacing must be at least 1".to_string(),
            ));
        }
        if min_spacing > 3 {
            return Err(ClusterError::MalformedInput(format!(
                "min_spacing {} is not supported: candidate generation \
                 stops at Hamming distance 2",
                min_spacing
            )));
        }
        if min_spacing == 1 {
            return Ok(self.sets.cluster_count());
        }

        // Distance class 0: nodes sharing an identical label
        let duplicates = source.duplicate_pairs();
        log::info!("Merging {} duplicate-label pairs", duplicates.len());
        for &(a, b) in duplicates {
            self.sets.union_roots(a, b);
        }

        for distance in 1..min_spacing {
            let pairs = source.candidates_at_distance(distance);
            log::info!(
                "Merging {} candidate pairs at Hamming distance {}",
                pairs.len(),
                distance
            );
            for (a, b) in pairs {
                self.sets.union_roots(a, b);
            }
        }

        Ok(self.sets.cluster_count())
    }

    /// Total cost of a minimum spanning tree of the edge list
    ///
    /// Kruskal scan: accept every edge that merges two clusters, stop once
    /// N - 1 edges have been accepted.
    pub fn minimum_spanning_tree_cost(
        &mut self,
        source: &ExplicitEdgeSource,
    ) -> Result<u64, ClusterError> {
        self.check_node_count(source.node_count())?;
        let node_count = self.sets.node_count();

        let mut total_cost = 0u64;
        let mut accepted = 0usize;

        for edge in source.sorted_ascending() {
            if self.sets.union_roots(edge.u, edge.v) {
                total_cost += edge.cost;
                accepted += 1;
                if accepted == node_count - 1 {
                    break;
                }
            }
        }

        if accepted != node_count - 1 {
            return Err(ClusterError::MalformedInput(format!(
                "edge list spans only part of the graph: {} of {} tree edges found",
                accepted,
                node_count - 1
            )));
        }

        Ok(total_cost)
    }

    /// Read the final partition out of the DisjointSets state
    pub fn clusters(&mut self) -> Vec<Cluster> {
        let mut members_by_root: HashMap<u32, Vec<u32>> = HashMap::new();

        for id in 1..=self.sets.node_count() as u32 {
            let root = self.sets.find_root(id);
            members_by_root.entry(root).or_default().push(id);
        }

        let mut clusters: Vec<Cluster> = members_by_root
            .into_iter()
            .map(|(root, members)| Cluster {
                id: root,
                size: members.len(),
                members,
            })
            .collect();

        // Sort clusters by size (largest first), root id as tiebreak
        clusters.sort_by(|a, b| b.size.cmp(&a.size).then(a.id.cmp(&b.id)));
        clusters
    }

    fn check_node_count(&self, source_nodes: usize) -> Result<(), ClusterError> {
        if source_nodes != self.sets.node_count() {
            return Err(ClusterError::MalformedInput(format!(
                "source describes {} nodes but the engine was built for {}",
                source_nodes,
                self.sets.node_count()
            )));
        }
        Ok(())
    }
}

/// Maximum spacing of a `target_k`-clustering of the given edge list
pub fn spacing_for_target_k(
    edges: Vec<Edge>,
    node_count: usize,
    target_k: usize,
) -> Result<u64, ClusterError> {
    let source = ExplicitEdgeSource::load(edges, node_count)?;
    let mut engine = GreedyClusterEngine::new(node_count);
    engine.spacing_for_target_k(&source, target_k)
}

/// Largest cluster count keeping spacing >= `min_spacing` over bit labels
pub fn max_k_for_min_spacing(
    labels: Vec<u64>,
    bit_width: u32,
    min_spacing: u32,
) -> Result<usize, ClusterError> {
    let source = ImplicitHammingSource::load(labels, bit_width)?;
    let node_count = source.node_count();
    let mut engine = GreedyClusterEngine::new(node_count);
    engine.max_k_for_min_spacing(&source, min_spacing)
}
