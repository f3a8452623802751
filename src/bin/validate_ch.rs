use std::{fs::File, io::BufReader, path::PathBuf, time::Duration};

use anyhow::Context;
use clap::Parser;
use dynamic_ch::{
    graphs::graph_factory,
    search::ch::contracted_graph::ContractedGraph,
    utility::{average_timing, generate_test_cases, random_requests, validate_and_time},
};
use log::info;

/// Compares CH queries against plain Dijkstra on random requests.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph in .fmi or .gr format
    #[arg(short, long)]
    graph: PathBuf,
    /// Contracted graph in .bincode format
    #[arg(short, long)]
    contracted_graph: PathBuf,
    /// Number of random requests
    #[arg(short, long, default_value_t = 1_000)]
    number_of_requests: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let graph = graph_factory::from_file(&args.graph)?;

    let reader = BufReader::new(
        File::open(&args.contracted_graph)
            .with_context(|| format!("opening {}", args.contracted_graph.display()))?,
    );
    let contracted_graph: ContractedGraph = bincode::deserialize_from(reader)?;
    anyhow::ensure!(
        contracted_graph.number_of_vertices() == graph.number_of_vertices(),
        "graph has {} vertices but the contracted graph has {}",
        graph.number_of_vertices(),
        contracted_graph.number_of_vertices()
    );

    let requests = random_requests(
        graph.number_of_vertices(),
        args.number_of_requests,
        &mut rand::thread_rng(),
    );
    let test_cases = generate_test_cases(&graph, &requests);

    let results = validate_and_time(&test_cases, &contracted_graph, &graph, 1e-3)
        .map_err(anyhow::Error::msg)?;

    info!(
        "All correct. Took {:?} per query averaged over {} queries",
        Duration::from_secs_f64(average_timing(&results)),
        results.len()
    );

    Ok(())
}
