use ahash::{HashMap, HashMapExt};
use serde::{Deserialize, Serialize};

use crate::{
    graphs::{dynamic_graph::DynamicGraph, VertexId, Weight},
    search::collections::{
        dijkstra_data::{DijkstraData, DijkstraDataHashMap},
        vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
        vertex_expanded_data::{VertexExpandedData, VertexExpandedDataHashSet},
    },
};

/// Decides whether a shortcut `from -> via -> to` is superfluous.
///
/// Implementations must only answer `true` if a path `from -> to` of weight
/// at most `max_weight` avoiding `via` exists in the current graph. Missing a
/// witness is harmless, it only costs an extra shortcut.
pub trait WitnessCalculator {
    fn exists(
        &self,
        graph: &DynamicGraph,
        from: VertexId,
        to: VertexId,
        via: VertexId,
        max_weight: Weight,
    ) -> bool;
}

/// Bounded one-directional Dijkstra over forward arcs.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DijkstraWitnessCalculator {
    /// Paths with more arcs than this are not explored.
    pub hop_limit: u32,
    /// The search gives up after this many expanded vertices.
    pub max_settled: usize,
}

impl Default for DijkstraWitnessCalculator {
    fn default() -> Self {
        DijkstraWitnessCalculator {
            hop_limit: 100,
            max_settled: usize::MAX,
        }
    }
}

impl DijkstraWitnessCalculator {
    pub fn new(hop_limit: u32) -> DijkstraWitnessCalculator {
        DijkstraWitnessCalculator {
            hop_limit,
            ..Default::default()
        }
    }

    pub fn with_max_settled(mut self, max_settled: usize) -> DijkstraWitnessCalculator {
        self.max_settled = max_settled;
        self
    }
}

impl WitnessCalculator for DijkstraWitnessCalculator {
    fn exists(
        &self,
        graph: &DynamicGraph,
        from: VertexId,
        to: VertexId,
        via: VertexId,
        max_weight: Weight,
    ) -> bool {
        if from == via || to == via {
            return false;
        }

        let mut data = DijkstraDataHashMap::new();
        let mut expanded = VertexExpandedDataHashSet::new();
        let mut queue = VertexDistanceQueueBinaryHeap::new();
        let mut hops = HashMap::new();

        data.set_distance(from, 0.0);
        queue.insert(from, 0.0);
        hops.insert(from, 0u32);

        while let Some((tail, distance_tail)) = queue.pop() {
            if expanded.expand(tail) {
                continue;
            }
            if distance_tail > max_weight {
                return false;
            }
            if tail == to {
                return true;
            }
            if expanded.number_of_expanded_vertices() >= self.max_settled {
                return false;
            }

            let hops_tail = hops.get(&tail).copied().unwrap_or(0);
            if hops_tail >= self.hop_limit {
                continue;
            }

            for arc in graph.arcs(tail).iter().filter(|arc| arc.data.forward) {
                if arc.head == via {
                    continue;
                }

                let current_distance_head = data.get_distance(arc.head).unwrap_or(Weight::INFINITY);
                let alternative_distance_head = distance_tail + arc.data.weight;
                if alternative_distance_head < current_distance_head
                    && alternative_distance_head <= max_weight
                {
                    data.set_distance(arc.head, alternative_distance_head);
                    queue.insert(arc.head, alternative_distance_head);
                    hops.insert(arc.head, hops_tail + 1);
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0 -> 1 -> 2 with weights 3 and 4, optional direct edge 0 -> 2
    fn chain(direct: Option<Weight>) -> DynamicGraph {
        let mut graph = DynamicGraph::new();
        graph.add_edge(0, 1, 3.0, true, false);
        graph.add_edge(1, 2, 4.0, true, false);
        if let Some(weight) = direct {
            graph.add_edge(0, 2, weight, true, false);
        }
        graph
    }

    #[test]
    fn finds_direct_witness() {
        let graph = chain(Some(5.0));
        let witness = DijkstraWitnessCalculator::default();

        assert!(witness.exists(&graph, 0, 2, 1, 7.0));
        assert!(witness.exists(&graph, 0, 2, 1, 5.0));
        assert!(!witness.exists(&graph, 0, 2, 1, 4.9));
        // one-way
        assert!(!witness.exists(&graph, 2, 0, 1, 100.0));
    }

    #[test]
    fn never_passes_through_via() {
        let graph = chain(None);
        let witness = DijkstraWitnessCalculator::default();

        assert!(!witness.exists(&graph, 0, 2, 1, 100.0));
        assert!(witness.exists(&graph, 0, 2, 3, 7.0));
    }

    #[test]
    fn hop_limit_only_causes_misses() {
        let mut graph = DynamicGraph::new();
        // long detour 0 -> 3 -> 4 -> 5 -> 2 of weight 4 and a via vertex 1
        graph.add_edge(0, 1, 3.0, true, false);
        graph.add_edge(1, 2, 4.0, true, false);
        graph.add_edge(0, 3, 1.0, true, false);
        graph.add_edge(3, 4, 1.0, true, false);
        graph.add_edge(4, 5, 1.0, true, false);
        graph.add_edge(5, 2, 1.0, true, false);

        assert!(DijkstraWitnessCalculator::new(4).exists(&graph, 0, 2, 1, 7.0));
        assert!(!DijkstraWitnessCalculator::new(3).exists(&graph, 0, 2, 1, 7.0));
        assert!(!DijkstraWitnessCalculator::default()
            .with_max_settled(2)
            .exists(&graph, 0, 2, 1, 7.0));
    }
}
