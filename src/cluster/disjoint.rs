//! Union-Find data structure driving the greedy merge loop

use crate::cluster::ClusterError;

/// Union-Find over node ids 1..=N with union by size and path compression
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i; slot 0 is unused)
    parent: Vec<u32>,

    /// Cluster sizes, valid only at root nodes
    size: Vec<u32>,

    /// Current number of distinct roots
    cluster_count: usize,
}

impl DisjointSets {
    /// Create a new DisjointSets structure with `node_count` singleton clusters
    pub fn new(node_count: usize) -> Self {
        let mut parent = Vec::with_capacity(node_count + 1);

        // Initialize each node as its own cluster
        for i in 0..=node_count as u32 {
            parent.push(i);
        }

        Self {
            parent,
            size: vec![1; node_count + 1],
            cluster_count: node_count,
        }
    }

    /// Number of nodes the structure was created for
    pub fn node_count(&self) -> usize {
        self.parent.len() - 1
    }

    /// Current number of distinct clusters
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Find the root of the cluster containing `id`
    pub fn find(&mut self, id: u32) -> Result<u32, ClusterError> {
        self.check_bounds(id)?;
        Ok(self.find_root(id))
    }

    /// Union the clusters containing `a` and `b`; returns whether a merge occurred
    pub fn union(&mut self, a: u32, b: u32) -> Result<bool, ClusterError> {
        self.check_bounds(a)?;
        self.check_bounds(b)?;
        Ok(self.union_roots(a, b))
    }

    /// Size of the cluster containing `id`
    pub fn cluster_size(&mut self, id: u32) -> Result<u32, ClusterError> {
        let root = self.find(id)?;
        Ok(self.size[root as usize])
    }

    fn check_bounds(&self, id: u32) -> Result<(), ClusterError> {
        if id == 0 || id as usize >= self.parent.len() {
            return Err(ClusterError::OutOfRange {
                id,
                node_count: self.node_count(),
            });
        }
        Ok(())
    }

    /// Unchecked find for callers whose ids were validated at load time
    pub(crate) fn find_root(&mut self, id: u32) -> u32 {
        let parent = self.parent[id as usize];
        if parent != id {
            // Path compression: point directly at the root
            let root = self.find_root(parent);
            self.parent[id as usize] = root;
            return root;
        }
        parent
    }

    /// Unchecked union for callers whose ids were validated at load time
    pub(crate) fn union_roots(&mut self, a: u32, b: u32) -> bool {
        let root_a = self.find_root(a);
        let root_b = self.find_root(b);

        if root_a == root_b {
            return false; // Already in the same cluster
        }

        // Union by size: attach the smaller cluster under the larger one
        let size_a = self.size[root_a as usize];
        let size_b = self.size[root_b as usize];

        let (big, small) = if size_a >= size_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };

        self.parent[small as usize] = big;
        self.size[big as usize] = size_a + size_b;
        self.cluster_count -= 1;

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_with_singletons() {
        let mut sets = DisjointSets::new(5);
        assert_eq!(sets.node_count(), 5);
        assert_eq!(sets.cluster_count(), 5);
        for id in 1..=5 {
            assert_eq!(sets.find(id).unwrap(), id);
            assert_eq!(sets.cluster_size(id).unwrap(), 1);
        }
    }

    #[test]
    fn test_union_reduces_cluster_count_by_one() {
        let mut sets = DisjointSets::new(6);
        assert!(sets.union(1, 2).unwrap());
        assert!(sets.union(3, 4).unwrap());
        assert!(sets.union(1, 3).unwrap());
        // Three successful unions on six singletons leave 6 - 3 clusters
        assert_eq!(sets.cluster_count(), 3);
    }

    #[test]
    fn test_redundant_union_is_a_noop() {
        let mut sets = DisjointSets::new(4);
        assert!(sets.union(1, 2).unwrap());
        let root_before = sets.find(2).unwrap();
        assert!(!sets.union(2, 1).unwrap());
        assert_eq!(sets.cluster_count(), 3);
        assert_eq!(sets.find(2).unwrap(), root_before);
    }

    #[test]
    fn test_find_is_idempotent_between_unions() {
        let mut sets = DisjointSets::new(8);
        sets.union(1, 2).unwrap();
        sets.union(2, 3).unwrap();
        let root = sets.find(3).unwrap();
        assert_eq!(sets.find(3).unwrap(), root);
        assert_eq!(sets.find(1).unwrap(), root);
        assert_eq!(sets.find(2).unwrap(), root);
        // An unrelated union leaves this cluster untouched
        sets.union(5, 6).unwrap();
        assert_eq!(sets.find(3).unwrap(), root);
    }

    #[test]
    fn test_union_by_size_attaches_smaller_under_larger() {
        let mut sets = DisjointSets::new(5);
        sets.union(1, 2).unwrap();
        sets.union(1, 3).unwrap();
        let big_root = sets.find(1).unwrap();
        // The singleton joins the three-node cluster, keeping its root
        sets.union(4, 1).unwrap();
        assert_eq!(sets.find(4).unwrap(), big_root);
        assert_eq!(sets.cluster_size(4).unwrap(), 4);
        assert_eq!(sets.cluster_size(1).unwrap(), 4);
    }

    #[test]
    fn test_out_of_range_ids_are_rejected() {
        let mut sets = DisjointSets::new(3);
        assert_eq!(
            sets.find(0),
            Err(ClusterError::OutOfRange { id: 0, node_count: 3 })
        );
        assert_eq!(
            sets.find(4),
            Err(ClusterError::OutOfRange { id: 4, node_count: 3 })
        );
        assert!(sets.union(1, 4).is_err());
        assert_eq!(sets.cluster_count(), 3);
    }
}
