use crate::graphs::{dynamic_graph::DynamicGraph, ArcData, TaillessArc, VertexId};

use super::witness::WitnessCalculator;

/// Shortcut between two neighbours `x` and `y` of `vertex`, seen from `x`.
///
/// `x` and `y` are arcs stored at `vertex`. Returns `None` if no path
/// `x -> vertex -> y` or `y -> vertex -> x` exists at all. Otherwise the
/// returned arc has its forward flag set if `x -> y` needs a shortcut and its
/// backward flag set if `y -> x` needs one; both flags are cleared if
/// witnesses cover both directions.
pub fn shortcut_between<W: WitnessCalculator + ?Sized>(
    graph: &DynamicGraph,
    witness: &W,
    vertex: VertexId,
    x: &TaillessArc,
    y: &TaillessArc,
) -> Option<ArcData> {
    // parallel arcs to the same neighbour would result in a loop
    if x.head == y.head {
        return None;
    }

    let x_to_y = x.data.backward && y.data.forward;
    let y_to_x = y.data.backward && x.data.forward;
    if !(x_to_y || y_to_x) {
        return None;
    }

    let weight = x.data.weight + y.data.weight;
    let forward = x_to_y && !witness.exists(graph, x.head, y.head, vertex, weight);
    let backward = y_to_x && !witness.exists(graph, y.head, x.head, vertex, weight);

    Some(ArcData::shortcut(weight, forward, backward, vertex))
}

/// Simulates the contraction of `vertex`. Returns the shortcuts, stored at the
/// first vertex of each tuple, that contracting it would insert.
pub fn simulate_contraction<W: WitnessCalculator + ?Sized>(
    graph: &DynamicGraph,
    witness: &W,
    vertex: VertexId,
) -> Vec<(VertexId, TaillessArc)> {
    let arcs = graph.arcs(vertex);
    let mut shortcuts = Vec::new();

    // every unordered pair of arcs once
    for x in 1..arcs.len() {
        for y in 0..x {
            if let Some(data) = shortcut_between(graph, witness, vertex, &arcs[x], &arcs[y]) {
                if data.is_traversable() {
                    shortcuts.push((
                        arcs[x].head,
                        TaillessArc {
                            head: arcs[y].head,
                            data,
                        },
                    ));
                }
            }
        }
    }

    shortcuts
}

/// Number of arcs contracting `vertex` would add minus the number it would
/// remove. Each shortcut and each removed edge is stored at both endpoints.
pub fn edge_difference<W: WitnessCalculator + ?Sized>(
    graph: &DynamicGraph,
    witness: &W,
    vertex: VertexId,
) -> i64 {
    let added = 2 * simulate_contraction(graph, witness, vertex).len() as i64;
    let removed = graph.degree(vertex) as i64;

    added - removed
}
