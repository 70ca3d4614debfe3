//! Results persistence module

use anyhow::Result;
use crate::cluster::Cluster;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use serde_json::{json, to_string_pretty, Value};

/// Headline figures of one analysis run
pub enum AnalysisSummary {
    /// Max-spacing query over an explicit edge list
    Spacing {
        node_count: usize,
        edge_count: usize,
        target_clusters: usize,
        spacing: u64,
    },

    /// Max-cluster-count query over Hamming-labelled nodes
    MaxClusters {
        node_count: usize,
        bit_width: u32,
        min_spacing: u32,
        cluster_count: usize,
    },

    /// Minimum spanning tree cost over an explicit edge list
    MstCost {
        node_count: usize,
        edge_count: usize,
        total_cost: u64,
    },
}

impl AnalysisSummary {
    fn to_json(&self) -> Value {
        match self {
            AnalysisSummary::Spacing {
                node_count,
                edge_count,
                target_clusters,
                spacing,
            } => json!({
                "mode": "spacing",
                "node_count": node_count,
                "edge_count": edge_count,
                "target_clusters": target_clusters,
                "spacing": spacing,
            }),
            AnalysisSummary::MaxClusters {
                node_count,
                bit_width,
                min_spacing,
                cluster_count,
            } => json!({
                "mode": "max_clusters",
                "node_count": node_count,
                "bit_width": bit_width,
                "min_spacing": min_spacing,
                "cluster_count": cluster_count,
            }),
            AnalysisSummary::MstCost {
                node_count,
                edge_count,
                total_cost,
            } => json!({
                "mode": "mst_cost",
                "node_count": node_count,
                "edge_count": edge_count,
                "total_cost": total_cost,
            }),
        }
    }
}

/// Save analysis results to the specified directory
pub fn save_results(
    summary: &AnalysisSummary,
    clusters: &[Cluster],
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving {} clusters to {}", clusters.len(), output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(summary, clusters, output_dir)?;
    save_clusters(clusters, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save summary information
fn save_summary(
    summary: &AnalysisSummary,
    clusters: &[Cluster],
    output_dir: &str,
) -> Result<()> {
    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let contents = json!({
        "run": summary.to_json(),
        "cluster_stats": {
            "cluster_count": clusters.len(),
            "clustered_nodes": clusters.iter().map(|c| c.size).sum::<usize>(),
            "largest_cluster_size": clusters.first().map_or(0, |c| c.size),
            "smallest_cluster_size": clusters.last().map_or(0, |c| c.size),
        }
    });

    file.write_all(to_string_pretty(&contents)?.as_bytes())?;

    Ok(())
}

/// Save cluster membership
fn save_clusters(clusters: &[Cluster], output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("all_clusters.json");
    let mut file = File::create(path)?;

    let contents = json!({
        "clusters": clusters.iter().map(|c| {
            json!({
                "id": c.id,
                "size": c.size,
                "members": c.members,
            })
        }).collect::<Vec<_>>()
    });

    file.write_all(to_string_pretty(&contents)?.as_bytes())?;

    Ok(())
}
