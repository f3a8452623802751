use std::time::Instant;

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rand::Rng;
use rayon::prelude::*;

use crate::{
    graphs::{dynamic_graph::DynamicGraph, Weight},
    search::{
        path::{validate_path, ShortestPathRequest, ShortestPathTestCase, ShortestPathTestTimingResult},
        PathFinding,
    },
};

pub fn get_progressbar(job_name: &str, len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_message(job_name.to_string());
    bar.set_style(
        ProgressStyle::with_template(" {msg} {wide_bar} {human_pos}/{human_len} eta: {eta_precise}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

/// Random requests with `source != target` whenever the graph has more than
/// one vertex.
pub fn random_requests<R: Rng>(
    number_of_vertices: u32,
    number_of_requests: u32,
    rng: &mut R,
) -> Vec<ShortestPathRequest> {
    if number_of_vertices == 0 {
        return Vec::new();
    }

    (0..number_of_requests)
        .map(|_| {
            let source = rng.gen_range(0..number_of_vertices);
            if number_of_vertices == 1 {
                return ShortestPathRequest { source, target: 0 };
            }

            // guarantee that source != target.
            let mut target = rng.gen_range(0..number_of_vertices - 1);
            if target >= source {
                target += 1;
            }
            ShortestPathRequest { source, target }
        })
        .collect()
}

/// Answers every request with plain Dijkstra on `graph`.
pub fn generate_test_cases(
    graph: &DynamicGraph,
    requests: &[ShortestPathRequest],
) -> Vec<ShortestPathTestCase> {
    requests
        .par_iter()
        .progress_with(get_progressbar("Generating test cases", requests.len() as u64))
        .map(|&request| ShortestPathTestCase {
            request,
            weight: graph.shortest_path_weight(request.source, request.target),
        })
        .collect()
}

/// Queries `path_finder` for every test case, validates the answer on `graph`
/// and measures the query time.
pub fn validate_and_time(
    test_cases: &[ShortestPathTestCase],
    path_finder: &dyn PathFinding,
    graph: &DynamicGraph,
    tolerance: Weight,
) -> Result<Vec<ShortestPathTestTimingResult>, String> {
    test_cases
        .par_iter()
        .progress_with(get_progressbar("Validating", test_cases.len() as u64))
        .map(|test_case| -> Result<ShortestPathTestTimingResult, String> {
            let start = Instant::now();
            let path = path_finder.shortest_path(test_case.request.source, test_case.request.target);
            let timing_in_seconds = start.elapsed().as_secs_f64();

            validate_path(graph, test_case, &path, tolerance).map_err(|error| {
                format!(
                    "{} -> {}: {}",
                    test_case.request.source, test_case.request.target, error
                )
            })?;

            Ok(ShortestPathTestTimingResult {
                test_case: test_case.clone(),
                timing_in_seconds,
            })
        })
        .collect()
}

pub fn average_timing(results: &[ShortestPathTestTimingResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results
        .iter()
        .map(|result| result.timing_in_seconds)
        .sum::<f64>()
        / results.len() as f64
}
