use super::{
    collections::{
        dijkstra_data::{DijkstraData, DijkstraDataHashMap, DijkstraDataVec},
        vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
        vertex_expanded_data::{
            VertexExpandedData, VertexExpandedDataBitSet, VertexExpandedDataHashSet,
        },
    },
    path::Path,
    PathFinding,
};
use crate::graphs::{dynamic_graph::DynamicGraph, VertexId, Weight};

/// Plain Dijkstra on the forward arcs of `graph`. Without a target the
/// search runs until every reachable vertex is expanded.
pub fn dijkstra_one_to_one(
    graph: &DynamicGraph,
    data: &mut dyn DijkstraData,
    expanded: &mut dyn VertexExpandedData,
    queue: &mut dyn VertexDistanceQueue,
    source: VertexId,
    target: Option<VertexId>,
) {
    data.set_distance(source, 0.0);
    queue.insert(source, 0.0);

    while let Some((tail, distance_tail)) = queue.pop() {
        // The queue has no decrease key operation, skip outdated entries.
        if expanded.expand(tail) {
            continue;
        }
        if Some(tail) == target {
            break;
        }

        for arc in graph.arcs(tail).iter().filter(|arc| arc.data.forward) {
            let current_distance_head = data.get_distance(arc.head).unwrap_or(Weight::INFINITY);
            let alternative_distance_head = distance_tail + arc.data.weight;
            if alternative_distance_head < current_distance_head {
                data.set_distance(arc.head, alternative_distance_head);
                data.set_predecessor(arc.head, tail);
                queue.insert(arc.head, alternative_distance_head);
            }
        }
    }
}

pub fn dijkstra_one_to_all_wrapped(graph: &DynamicGraph, source: VertexId) -> DijkstraDataVec {
    let mut data = DijkstraDataVec::new(graph.number_of_vertices());
    let mut expanded = VertexExpandedDataBitSet::new(graph.number_of_vertices());
    let mut queue = VertexDistanceQueueBinaryHeap::new();

    dijkstra_one_to_one(graph, &mut data, &mut expanded, &mut queue, source, None);

    data
}

pub fn dijkstra_one_to_one_wrapped(
    graph: &DynamicGraph,
    source: VertexId,
    target: VertexId,
) -> Option<Path> {
    let mut data = DijkstraDataHashMap::new();
    let mut expanded = VertexExpandedDataHashSet::new();
    let mut queue = VertexDistanceQueueBinaryHeap::new();

    dijkstra_one_to_one(
        graph,
        &mut data,
        &mut expanded,
        &mut queue,
        source,
        Some(target),
    );

    data.get_path(target)
}

impl PathFinding for DynamicGraph {
    fn shortest_path(&self, source: VertexId, target: VertexId) -> Option<Path> {
        dijkstra_one_to_one_wrapped(self, source, target)
    }

    fn shortest_path_weight(&self, source: VertexId, target: VertexId) -> Option<Weight> {
        self.shortest_path(source, target).map(|path| path.weight)
    }
}
