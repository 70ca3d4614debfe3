//! Implicit Hamming-distance candidate generation
//!
//! The implicit regime never materializes the full pairwise distance
//! matrix. Instead, every node's label is indexed once, and candidate pairs
//! at Hamming distance 1 and 2 are found by flipping one or two bits of
//! each label and probing the index: bit_width + C(bit_width, 2) + 1
//! lookups per node, independent of the node count squared.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use itertools::Itertools;
use rayon::prelude::*;

use crate::cluster::ClusterError;
use crate::config::PARALLEL_CHUNK_SIZE;

/// Bit-label index generating candidate pairs grouped by distance class
pub struct ImplicitHammingSource {
    /// Label of node k at index k - 1
    labels: Vec<u64>,

    /// Width of every label in bits
    bit_width: u32,

    /// Label value -> first node id seen with that label
    representatives: HashMap<u64, u32>,

    /// Distance-0 pairs (representative, later node with the same label)
    duplicates: Vec<(u32, u32)>,
}

impl ImplicitHammingSource {
    /// Index a label vector; `labels[k - 1]` is the label of node k
    pub fn load(labels: Vec<u64>, bit_width: u32) -> Result<Self, ClusterError> {
        if labels.is_empty() {
            return Err(ClusterError::MalformedInput(
                "at least one label is required".to_string(),
            ));
        }
        if bit_width == 0 || bit_width > 64 {
            return Err(ClusterError::MalformedInput(format!(
                "bit width {} outside [1, 64]",
                bit_width
            )));
        }

        let mask = if bit_width == 64 {
            u64::MAX
        } else {
            (1u64 << bit_width) - 1
        };

        let mut representatives = HashMap::with_capacity(labels.len());
        let mut duplicates = Vec::new();

        for (idx, &label) in labels.iter().enumerate() {
            if label & !mask != 0 {
                return Err(ClusterError::MalformedInput(format!(
                    "label {:#b} of node {} does not fit in {} bits",
                    label,
                    idx + 1,
                    bit_width
                )));
            }

            let node = idx as u32 + 1;
            match representatives.entry(label) {
                Entry::Occupied(entry) => duplicates.push((*entry.get(), node)),
                Entry::Vacant(entry) => {
                    entry.insert(node);
                }
            }
        }

        Ok(Self {
            labels,
            bit_width,
            representatives,
            duplicates,
        })
    }

    /// Number of labelled nodes
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    /// Width of every label in bits
    pub fn bit_width(&self) -> u32 {
        self.bit_width
    }

    /// Distance class 0: pairs of nodes sharing an identical label
    pub fn duplicate_pairs(&self) -> &[(u32, u32)] {
        &self.duplicates
    }

    /// Candidate pairs at exact Hamming distance `distance`
    ///
    /// Pairs link each node to the representative of the flipped label, so
    /// both orientations of a pair can appear; union idempotence in the
    /// consumer absorbs the duplication. Class order matters to callers
    /// (0 before 1 before 2); order within a class does not.
    pub fn candidates_at_distance(&self, distance: u32) -> Vec<(u32, u32)> {
        let masks = self.flip_masks(distance);
        self.scan_with_masks(&masks)
    }

    /// XOR masks flipping every choice of `distance` bit positions
    fn flip_masks(&self, distance: u32) -> Vec<u64> {
        (0..self.bit_width)
            .combinations(distance as usize)
            .map(|bits| {
                bits.into_iter()
                    .fold(0u64, |mask, bit| mask | (1u64 << bit))
            })
            .collect()
    }

    /// Probe the label index for every node and flip mask
    ///
    /// Nodes are scanned in parallel chunks; each chunk collects matches
    /// into a local buffer and the buffers are concatenated afterwards, so
    /// the shared index is only ever read.
    fn scan_with_masks(&self, masks: &[u64]) -> Vec<(u32, u32)> {
        let node_count = self.labels.len();
        let num_chunks = (node_count + PARALLEL_CHUNK_SIZE - 1) / PARALLEL_CHUNK_SIZE;

        let chunk_results: Vec<Vec<(u32, u32)>> = (0..num_chunks)
            .into_par_iter()
            .map(|chunk_idx| {
                let start = chunk_idx * PARALLEL_CHUNK_SIZE;
                let end = std::cmp::min(start + PARALLEL_CHUNK_SIZE, node_count);

                let mut local_pairs = Vec::new();
                for idx in start..end {
                    let node = idx as u32 + 1;
                    let label = self.labels[idx];

                    for &flip in masks {
                        if let Some(&other) = self.representatives.get(&(label ^ flip)) {
                            if other != node {
                                local_pairs.push((node, other));
                            }
                        }
                    }
                }
                local_pairs
            })
            .collect();

        chunk_results.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_pairs(mut pairs: Vec<(u32, u32)>) -> Vec<(u32, u32)> {
        // Normalize orientation before comparing
        for pair in &mut pairs {
            if pair.0 > pair.1 {
                *pair = (pair.1, pair.0);
            }
        }
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }

    #[test]
    fn test_distance_one_and_two_classes() {
        // 000, 001, 110: distances 1 (1-2), 2 (1-3), 3 (2-3)
        let source = ImplicitHammingSource::load(vec![0b000, 0b001, 0b110], 3).unwrap();

        assert!(source.duplicate_pairs().is_empty());
        assert_eq!(
            sorted_pairs(source.candidates_at_distance(1)),
            vec![(1, 2)]
        );
        assert_eq!(
            sorted_pairs(source.candidates_at_distance(2)),
            vec![(1, 3)]
        );
    }

    #[test]
    fn test_distance_three_pairs_are_never_generated() {
        let source = ImplicitHammingSource::load(vec![0b000, 0b111], 3).unwrap();
        assert!(source.candidates_at_distance(1).is_empty());
        assert!(source.candidates_at_distance(2).is_empty());
    }

    #[test]
    fn test_duplicate_labels_recorded_at_load() {
        let source =
            ImplicitHammingSource::load(vec![0b0101, 0b1111, 0b0101, 0b0101], 4).unwrap();
        // Later occurrences pair with the first node carrying the label
        assert_eq!(source.duplicate_pairs(), &[(1, 3), (1, 4)]);
    }

    #[test]
    fn test_pairs_point_at_label_representatives() {
        // Nodes 1 and 2 share a label; node 3 is one bit away
        let source = ImplicitHammingSource::load(vec![0b00, 0b00, 0b01], 2).unwrap();
        let pairs = sorted_pairs(source.candidates_at_distance(1));
        // Node 3's probe of label 00 resolves to the representative, node 1;
        // node 2 still reaches node 3 through its own probe
        assert_eq!(pairs, vec![(1, 3), (2, 3)]);
    }

    #[test]
    fn test_load_rejects_bad_widths_and_oversized_labels() {
        assert!(matches!(
            ImplicitHammingSource::load(vec![0b1], 0),
            Err(ClusterError::MalformedInput(_))
        ));
        assert!(matches!(
            ImplicitHammingSource::load(vec![0b1], 65),
            Err(ClusterError::MalformedInput(_))
        ));
        assert!(matches!(
            ImplicitHammingSource::load(vec![0b100], 2),
            Err(ClusterError::MalformedInput(_))
        ));
        assert!(matches!(
            ImplicitHammingSource::load(Vec::new(), 2),
            Err(ClusterError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_full_width_labels_are_accepted() {
        let source = ImplicitHammingSource::load(vec![u64::MAX, u64::MAX - 1], 64).unwrap();
        assert_eq!(source.bit_width(), 64);
        assert_eq!(
            sorted_pairs(source.candidates_at_distance(1)),
            vec![(1, 2)]
        );
    }
}
