use super::contracted_graph::ContractedGraph;
use crate::{
    graphs::{dynamic_graph::DynamicGraph, ArcData, VertexId, Weight},
    search::{
        collections::{
            dijkstra_data::{DijkstraData, DijkstraDataHashMap},
            vertex_distance_queue::{VertexDistanceQueue, VertexDistanceQueueBinaryHeap},
            vertex_expanded_data::{VertexExpandedData, VertexExpandedDataHashSet},
        },
        path::Path,
        shortcuts::replace_shortcuts,
        PathFinding,
    },
};

impl PathFinding for ContractedGraph {
    fn shortest_path(&self, source: VertexId, target: VertexId) -> Option<Path> {
        one_to_one_wrapped_path(&self.graph, source, target)
    }

    fn shortest_path_weight(&self, source: VertexId, target: VertexId) -> Option<Weight> {
        one_to_one_wrapped_weight(&self.graph, source, target)
    }
}

/// Direction a search travels the stored arcs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn allows(&self, data: &ArcData) -> bool {
        match self {
            Direction::Forward => data.forward,
            Direction::Backward => data.backward,
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Wrapper that returns the shortest path weight.
pub fn one_to_one_wrapped_weight(
    graph: &DynamicGraph,
    source: VertexId,
    target: VertexId,
) -> Option<Weight> {
    let (_vertex, weight, _forward_data, _backward_data) =
        one_to_one_wrapped(graph, source, target)?;

    Some(weight)
}

/// Wrapper that returns the shortest path with all shortcuts replaced.
pub fn one_to_one_wrapped_path(
    graph: &DynamicGraph,
    source: VertexId,
    target: VertexId,
) -> Option<Path> {
    let (vertex, weight, forward_data, backward_data) = one_to_one_wrapped(graph, source, target)?;

    let mut vertices = forward_data.get_path(vertex)?.vertices; // (source -> vertex)
    let mut backward_vertices = backward_data.get_path(vertex)?.vertices; // (target -> vertex)

    backward_vertices.reverse(); // (vertex -> target)
    vertices.pop(); // remove double vertex ((source -> vertex) -> (vertex -> target))
    vertices.extend(backward_vertices); // get (source -> target)

    replace_shortcuts(&mut vertices, graph);

    Some(Path { vertices, weight })
}

/// Wrapper that returns everything needed to reconstruct the path.
pub fn one_to_one_wrapped(
    graph: &DynamicGraph,
    source: VertexId,
    target: VertexId,
) -> Option<(VertexId, Weight, DijkstraDataHashMap, DijkstraDataHashMap)> {
    let mut forward_data = DijkstraDataHashMap::new();
    let mut forward_expanded = VertexExpandedDataHashSet::new();
    let mut forward_queue = VertexDistanceQueueBinaryHeap::new();

    let mut backward_data = DijkstraDataHashMap::new();
    let mut backward_expanded = VertexExpandedDataHashSet::new();
    let mut backward_queue = VertexDistanceQueueBinaryHeap::new();

    let (vertex, weight) = one_to_one(
        graph,
        &mut forward_data,
        &mut forward_expanded,
        &mut forward_queue,
        &mut backward_data,
        &mut backward_expanded,
        &mut backward_queue,
        source,
        target,
    )?;

    Some((vertex, weight, forward_data, backward_data))
}

/// Bidirectional upward search on a contracted graph.
///
/// Both searches only ever see arcs stored at the vertex they expand, which
/// are the arcs to higher levels. A direction stops once its smallest queued
/// distance can no longer improve the best meeting point.
#[allow(clippy::too_many_arguments)]
pub fn one_to_one(
    graph: &DynamicGraph,
    forward_data: &mut dyn DijkstraData,
    forward_expanded: &mut dyn VertexExpandedData,
    forward_queue: &mut dyn VertexDistanceQueue,
    backward_data: &mut dyn DijkstraData,
    backward_expanded: &mut dyn VertexExpandedData,
    backward_queue: &mut dyn VertexDistanceQueue,
    source: VertexId,
    target: VertexId,
) -> Option<(VertexId, Weight)> {
    forward_data.set_distance(source, 0.0);
    forward_queue.insert(source, 0.0);

    backward_data.set_distance(target, 0.0);
    backward_queue.insert(target, 0.0);

    let mut meeting_vertex_and_weight = None;

    loop {
        let forward_active = is_active(forward_queue, &meeting_vertex_and_weight);
        let backward_active = is_active(backward_queue, &meeting_vertex_and_weight);
        if !forward_active && !backward_active {
            break;
        }

        if forward_active {
            single_search_step(
                graph,
                Direction::Forward,
                forward_data,
                forward_expanded,
                forward_queue,
                backward_data,
                &mut meeting_vertex_and_weight,
            );
        }

        if backward_active {
            single_search_step(
                graph,
                Direction::Backward,
                backward_data,
                backward_expanded,
                backward_queue,
                forward_data,
                &mut meeting_vertex_and_weight,
            );
        }
    }

    meeting_vertex_and_weight
}

fn is_active(
    queue: &dyn VertexDistanceQueue,
    meeting_vertex_and_weight: &Option<(VertexId, Weight)>,
) -> bool {
    let best_weight = meeting_vertex_and_weight.map_or(Weight::INFINITY, |(_vertex, weight)| weight);

    queue
        .peek_distance()
        .is_some_and(|distance| distance < best_weight)
}

/// Single search step in one direction.
fn single_search_step(
    graph: &DynamicGraph,
    direction: Direction,
    direction1_data: &mut dyn DijkstraData,
    direction1_expanded: &mut dyn VertexExpandedData,
    direction1_queue: &mut dyn VertexDistanceQueue,
    direction2_data: &dyn DijkstraData,
    meeting_vertex_and_weight: &mut Option<(VertexId, Weight)>,
) {
    let Some((tail, distance_tail)) = direction1_queue.pop() else {
        return;
    };

    // The queue has no decrease key operation, skip outdated entries.
    if direction1_expanded.expand(tail) {
        return;
    }

    // Stall on demand: a higher vertex that reaches tail cheaper than the
    // current distance proves that tail is not on a shortest path.
    let opposite = direction.opposite();
    for arc in graph
        .arcs(tail)
        .iter()
        .filter(|arc| opposite.allows(&arc.data))
    {
        if let Some(distance_head) = direction1_data.get_distance(arc.head) {
            if distance_head + arc.data.weight < distance_tail {
                return;
            }
        }
    }

    // Meeting vertex logic
    if let Some(direction2_distance_tail) = direction2_data.get_distance(tail) {
        let current_meeting_weight = meeting_vertex_and_weight
            .map(|(_vertex, weight)| weight)
            .unwrap_or(Weight::INFINITY);
        let alternative_meeting_weight = distance_tail + direction2_distance_tail;
        if alternative_meeting_weight < current_meeting_weight {
            *meeting_vertex_and_weight = Some((tail, alternative_meeting_weight));
        }
    }

    // Search logic
    for arc in graph
        .arcs(tail)
        .iter()
        .filter(|arc| direction.allows(&arc.data))
    {
        let current_distance_head = direction1_data
            .get_distance(arc.head)
            .unwrap_or(Weight::INFINITY);
        let alternative_distance_head = distance_tail + arc.data.weight;
        if alternative_distance_head < current_distance_head {
            direction1_data.set_distance(arc.head, alternative_distance_head);
            direction1_data.set_predecessor(arc.head, tail);
            direction1_queue.insert(arc.head, alternative_distance_head);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ch::{
        preprocessor::PreProcessorConfig, weight::EdgeDifference,
        witness::DijkstraWitnessCalculator,
    };

    fn contract(graph: DynamicGraph) -> ContractedGraph {
        ContractedGraph::by_contraction(
            graph,
            EdgeDifference::new(DijkstraWitnessCalculator::default()),
            DijkstraWitnessCalculator::default(),
            PreProcessorConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn line_with_shortcut() {
        let mut graph = DynamicGraph::new();
        graph.add_edge(0, 1, 3.0, true, false);
        graph.add_edge(1, 2, 4.0, true, false);
        graph.add_edge(2, 3, 5.0, true, false);
        let contracted_graph = contract(graph);

        let path = contracted_graph.shortest_path(0, 3).unwrap();
        assert_eq!(path.vertices, vec![0, 1, 2, 3]);
        assert_eq!(path.weight, 12.0);

        assert_eq!(contracted_graph.shortest_path_weight(1, 3), Some(9.0));
        assert_eq!(contracted_graph.shortest_path_weight(3, 0), None);
    }

    #[test]
    fn source_equals_target() {
        let mut graph = DynamicGraph::new();
        graph.add_edge(0, 1, 1.0, true, true);
        let contracted_graph = contract(graph);

        let path = contracted_graph.shortest_path(1, 1).unwrap();
        assert_eq!(path.vertices, vec![1]);
        assert_eq!(path.weight, 0.0);
    }

    #[test]
    fn searches_core_without_contraction() {
        // nothing has been contracted, the query degenerates to a
        // bidirectional Dijkstra
        let mut graph = DynamicGraph::new();
        graph.add_edge(0, 1, 1.0, true, false);
        graph.add_edge(1, 2, 1.0, true, false);
        graph.add_edge(0, 2, 5.0, true, false);
        let contracted_graph = ContractedGraph::new(graph, Vec::new());

        let path = contracted_graph.shortest_path(0, 2).unwrap();
        assert_eq!(path.vertices, vec![0, 1, 2]);
        assert_eq!(path.weight, 2.0);
    }
}
