use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
    time::Instant,
};

use anyhow::Context;
use clap::Parser;
use dynamic_ch::{
    graphs::graph_factory,
    search::ch::{
        observer::ContractionStatistics,
        preprocessor::{CHPreProcessor, PreProcessorConfig},
        weight::ContractedSearchSpace,
        witness::DijkstraWitnessCalculator,
    },
    utility::get_progressbar,
};
use log::info;

/// Contracts a graph and writes the contracted graph to disk.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Infile in .fmi or .gr format
    #[arg(short, long)]
    graph: PathBuf,
    /// Outfile in .bincode format
    #[arg(short, long)]
    contracted_graph: PathBuf,
    /// Preprocessor configuration in .json format
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximal number of arcs on a witness path
    #[arg(long, default_value_t = 100)]
    hop_limit: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config: PreProcessorConfig = match &args.config {
        Some(path) => {
            let reader = BufReader::new(
                File::open(path).with_context(|| format!("opening {}", path.display()))?,
            );
            serde_json::from_reader(reader)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => PreProcessorConfig::default(),
    };
    info!("Using {:?}", config);

    let start = Instant::now();
    let graph = graph_factory::from_file(&args.graph)?;
    info!("Loading the graph took {:?}", start.elapsed());

    let witness = DijkstraWitnessCalculator::new(args.hop_limit);
    let mut statistics = ContractionStatistics::default();
    let mut preprocessor = CHPreProcessor::new(graph, ContractedSearchSpace::new(witness), witness)
        .with_config(config)
        .with_observer(&mut statistics);

    let bar = get_progressbar("Contracting", preprocessor.graph().number_of_vertices() as u64);
    let start = Instant::now();
    preprocessor.start_with_progress(1_000, |progress| bar.set_position(progress.contracted as u64))?;
    bar.finish();
    info!("Contracting took {:?}", start.elapsed());

    let contracted_graph = preprocessor.into_contracted_graph();
    info!(
        "{} shortcuts, {} core vertices, average degree at contraction {:.2}",
        contracted_graph.number_of_shortcuts(),
        contracted_graph.core().len(),
        statistics.average_degree()
    );

    let writer = BufWriter::new(
        File::create(&args.contracted_graph)
            .with_context(|| format!("creating {}", args.contracted_graph.display()))?,
    );
    bincode::serialize_into(writer, &contracted_graph)?;

    Ok(())
}
