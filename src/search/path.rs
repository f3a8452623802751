use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::graphs::{dynamic_graph::DynamicGraph, VertexId, Weight};

/// Represents a path in a graph.
///
/// This struct encapsulates the vertices that form a path in the graph and the
/// total weight associated with traversing this path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub vertices: Vec<VertexId>,
    pub weight: Weight,
}

/// Represents a request for finding a shortest path in a graph.
///
/// This struct is used to encapsulate the information required to find a path
/// from a source vertex to a target vertex in a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathRequest {
    pub source: VertexId,
    pub target: VertexId,
}

/// Represents a request for validating a shortest path in a graph.
///
/// This struct is used to encapsulate a shortest path request along with the
/// weight of a shortest path, if there exists one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortestPathTestCase {
    pub request: ShortestPathRequest,
    pub weight: Option<Weight>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShortestPathTestTimingResult {
    pub test_case: ShortestPathTestCase,
    pub timing_in_seconds: f64,
}

/// Checks a path against a test case on the original graph.
///
/// Every consecutive pair must be connected by a traversable arc and the arc
/// weights have to add up to the expected weight. `tolerance` is relative to
/// the expected weight, but never smaller than `tolerance` itself.
pub fn validate_path(
    graph: &DynamicGraph,
    validation: &ShortestPathTestCase,
    path: &Option<Path>,
    tolerance: Weight,
) -> Result<(), String> {
    let (path, weight) = match (path, validation.weight) {
        (None, None) => return Ok(()),
        (Some(_), None) => return Err("a path was found where there should be none".to_string()),
        (None, Some(_)) => return Err("no path is found but there should be one".to_string()),
        (Some(path), Some(weight)) => (path, weight),
    };

    let tolerance = tolerance * weight.abs().max(1.0);
    if (path.weight - weight).abs() > tolerance {
        return Err(format!(
            "wrong path weight, expected {} but got {}",
            weight, path.weight
        ));
    }

    // Ensure fist and last vertex of path are source and target of request.
    if path.vertices.first() != Some(&validation.request.source) {
        return Err("first vertex of path is not source of request".to_string());
    }
    if path.vertices.last() != Some(&validation.request.target) {
        return Err("last vertex of path is not target of request".to_string());
    }

    // check if there is an arc between consecutive path vertices.
    let mut true_weight = 0.0;
    for (&tail, &head) in path.vertices.iter().tuple_windows() {
        match graph.min_arc(tail, head) {
            Some(arc) => true_weight += arc.weight,
            None => return Err(format!("no arc between {} and {} found", tail, head)),
        }
    }

    if (true_weight - weight).abs() > tolerance {
        return Err(format!(
            "arcs of the path add up to {} instead of {}",
            true_weight, weight
        ));
    }

    Ok(())
}
