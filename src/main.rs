use anyhow::Result;
use clap::{Parser, Subcommand};
use std::time::Instant;

mod config;
mod data;
mod edges;
mod cluster;
mod storage;

use config::Config;

#[derive(Parser, Debug)]
#[clap(
    name = "cluster-spacing-analyzer",
    about = "Greedy max-spacing clustering of weighted and Hamming-labelled graphs"
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Output directory for results
    #[clap(long, global = true, default_value = "cluster_results")]
    output_dir: String,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, global = true, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Max spacing of a k-clustering over an explicit weighted edge list
    Spacing {
        /// Path to the edge list file
        #[clap(long)]
        input: String,

        /// Target number of clusters
        #[clap(long, default_value = "4")]
        clusters: usize,
    },

    /// Largest cluster count keeping a minimum spacing over bit-labelled nodes
    MaxClusters {
        /// Path to the bit-label file
        #[clap(long)]
        input: String,

        /// Smallest spacing the final clustering must keep
        #[clap(long, default_value = "3")]
        min_spacing: u32,
    },

    /// Total cost of a minimum spanning tree of the edge list
    MstCost {
        /// Path to the edge list file
        #[clap(long)]
        input: String,
    },
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    // Set number of threads
    let num_threads = if args.threads > 0 {
        args.threads
    } else {
        // If threads = 0, use all available cores
        num_cpus::get()
    };

    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let start = Instant::now();

    match &args.command {
        Command::Spacing { input, clusters } => {
            let config = Config::new(*clusters, Config::default().min_spacing, args.output_dir.clone());
            run_spacing(input, &config)?;
        }
        Command::MaxClusters { input, min_spacing } => {
            let config = Config::new(Config::default().target_clusters, *min_spacing, args.output_dir.clone());
            run_max_clusters(input, &config)?;
        }
        Command::MstCost { input } => {
            run_mst_cost(input, &args.output_dir)?;
        }
    }

    log::info!("Analysis complete in {:.3}s", start.elapsed().as_secs_f64());

    Ok(())
}

/// Max-spacing query: load edges, merge down to the target, report spacing
fn run_spacing(input: &str, config: &Config) -> Result<()> {
    // 1. Load data
    let (edge_records, node_count) = data::explicit::load_edge_list(input)?;
    let edge_count = edge_records.len();

    // 2. Validate and sort
    let source = edges::ExplicitEdgeSource::load(edge_records, node_count)?;

    // 3. Merge down to the target cluster count
    let mut engine = cluster::GreedyClusterEngine::new(node_count);
    let spacing = engine.spacing_for_target_k(&source, config.target_clusters)?;

    log::info!(
        "Max spacing of a {}-clustering: {}",
        config.target_clusters,
        spacing
    );

    // 4. Save results
    let clusters = engine.clusters();
    let summary = storage::AnalysisSummary::Spacing {
        node_count,
        edge_count,
        target_clusters: config.target_clusters,
        spacing,
    };
    storage::save_results(&summary, &clusters, &config.output_dir)?;

    Ok(())
}

/// Max-clusters query: load labels, merge all close pairs, report the count
fn run_max_clusters(input: &str, config: &Config) -> Result<()> {
    // 1. Load data
    let (labels, bit_width) = data::labels::load_label_records(input)?;
    let node_count = labels.len();

    // 2. Index labels for candidate generation
    let source = edges::ImplicitHammingSource::load(labels, bit_width)?;

    // 3. Merge every pair below the spacing threshold
    let mut engine = cluster::GreedyClusterEngine::new(node_count);
    let cluster_count = engine.max_k_for_min_spacing(&source, config.min_spacing)?;

    log::info!(
        "Largest clustering with spacing >= {}: {} clusters",
        config.min_spacing,
        cluster_count
    );

    // 4. Save results
    let clusters = engine.clusters();
    let summary = storage::AnalysisSummary::MaxClusters {
        node_count,
        bit_width,
        min_spacing: config.min_spacing,
        cluster_count,
    };
    storage::save_results(&summary, &clusters, &config.output_dir)?;

    Ok(())
}

/// MST query: load edges, run the Kruskal scan, report the tree cost
fn run_mst_cost(input: &str, output_dir: &str) -> Result<()> {
    let (edge_records, node_count) = data::explicit::load_edge_list(input)?;
    let edge_count = edge_records.len();

    let source = edges::ExplicitEdgeSource::load(edge_records, node_count)?;

    let mut engine = cluster::GreedyClusterEngine::new(node_count);
    let total_cost = engine.minimum_spanning_tree_cost(&source)?;

    log::info!("Minimum spanning tree cost: {}", total_cost);

    let clusters = engine.clusters();
    let summary = storage::AnalysisSummary::MstCost {
        node_count,
        edge_count,
        total_cost,
    };
    storage::save_results(&summary, &clusters, output_dir)?;

    Ok(())
}
