use itertools::Itertools;

use crate::graphs::{dynamic_graph::DynamicGraph, VertexId};

use super::{contraction::edge_difference, witness::WitnessCalculator};

/// Contraction priority of vertices, lower priorities are contracted first.
///
/// [`super::priority_queue::NEVER_CONTRACT`] marks a vertex that must not be
/// contracted in the current state of the graph. Such a vertex is parked and
/// looked at again once a neighbour is contracted or no other vertex can be
/// selected.
pub trait WeightCalculator {
    fn calculate(&self, graph: &DynamicGraph, vertex: VertexId) -> f32;

    /// Called once `vertex` has been contracted. Its arcs still lead to the
    /// neighbours it had at contraction time.
    fn notify_contracted(&mut self, graph: &DynamicGraph, vertex: VertexId);
}

/// Shortcuts added minus arcs removed by contracting a vertex.
#[derive(Clone, Debug)]
pub struct EdgeDifference<W> {
    witness: W,
}

impl<W: WitnessCalculator> EdgeDifference<W> {
    pub fn new(witness: W) -> EdgeDifference<W> {
        EdgeDifference { witness }
    }
}

impl<W: WitnessCalculator> WeightCalculator for EdgeDifference<W> {
    fn calculate(&self, graph: &DynamicGraph, vertex: VertexId) -> f32 {
        edge_difference(graph, &self.witness, vertex) as f32
    }

    fn notify_contracted(&mut self, _graph: &DynamicGraph, _vertex: VertexId) {}
}

/// Edge difference combined with the number of already contracted neighbours
/// and the depth of the search space below a vertex. Keeps the hierarchy
/// balanced so query search spaces stay small.
#[derive(Clone, Debug)]
pub struct ContractedSearchSpace<W> {
    edge_difference: EdgeDifference<W>,
    contracted_neighbours: Vec<u32>,
    depth: Vec<u32>,
}

impl<W: WitnessCalculator> ContractedSearchSpace<W> {
    pub fn new(witness: W) -> ContractedSearchSpace<W> {
        ContractedSearchSpace {
            edge_difference: EdgeDifference::new(witness),
            contracted_neighbours: Vec::new(),
            depth: Vec::new(),
        }
    }

    pub fn contracted_neighbours(&self, vertex: VertexId) -> u32 {
        self.contracted_neighbours
            .get(vertex as usize)
            .copied()
            .unwrap_or(0)
    }

    pub fn depth(&self, vertex: VertexId) -> u32 {
        self.depth.get(vertex as usize).copied().unwrap_or(0)
    }

    fn ensure_capacity(&mut self, number_of_vertices: usize) {
        if self.depth.len() < number_of_vertices {
            self.contracted_neighbours.resize(number_of_vertices, 0);
            self.depth.resize(number_of_vertices, 0);
        }
    }
}

impl<W: WitnessCalculator> WeightCalculator for ContractedSearchSpace<W> {
    fn calculate(&self, graph: &DynamicGraph, vertex: VertexId) -> f32 {
        let edge_difference = self.edge_difference.calculate(graph, vertex);

        2.0 * edge_difference
            + 2.0 * self.contracted_neighbours(vertex) as f32
            + self.depth(vertex) as f32
    }

    fn notify_contracted(&mut self, graph: &DynamicGraph, vertex: VertexId) {
        self.ensure_capacity(graph.number_of_vertices() as usize);

        let depth = self.depth[vertex as usize] + 1;
        for neighbour in graph.arcs(vertex).iter().map(|arc| arc.head).unique() {
            let neighbour = neighbour as usize;
            self.contracted_neighbours[neighbour] += 1;
            self.depth[neighbour] = self.depth[neighbour].max(depth);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ch::witness::DijkstraWitnessCalculator;

    fn star() -> DynamicGraph {
        // 0 in the middle, connected both ways to 1, 2 and 3
        let mut graph = DynamicGraph::new();
        for leaf in 1..=3 {
            graph.add_edge(0, leaf, 1.0, true, true);
        }
        graph
    }

    #[test]
    fn leaves_are_cheaper_than_centre() {
        let graph = star();
        let calculator = EdgeDifference::new(DijkstraWitnessCalculator::default());

        // three shortcuts between the leaves, each stored twice
        assert_eq!(calculator.calculate(&graph, 0), 6.0 - 3.0);
        assert_eq!(calculator.calculate(&graph, 1), -1.0);
    }

    #[test]
    fn notify_updates_neighbours() {
        let mut graph = star();
        let mut calculator = ContractedSearchSpace::new(DijkstraWitnessCalculator::default());
        let before = calculator.calculate(&graph, 0);

        // contract leaf 1 by hand, it keeps its arc to 0
        graph.delete_arc(0, 1);
        calculator.notify_contracted(&graph, 1);

        assert_eq!(calculator.contracted_neighbours(0), 1);
        assert_eq!(calculator.depth(0), 1);
        assert_eq!(calculator.contracted_neighbours(2), 0);

        // one shortcut pair and one arc less, plus the new counters
        let after = calculator.calculate(&graph, 0);
        assert_eq!(before, 2.0 * 3.0);
        assert_eq!(after, 2.0 * (2.0 - 2.0) + 2.0 + 1.0);
    }

    #[test]
    fn parallel_arcs_count_once() {
        let mut graph = DynamicGraph::new();
        graph.add_edge(0, 1, 1.0, true, true);
        graph.add_edge(0, 1, 3.0, true, false);

        let mut calculator = ContractedSearchSpace::new(DijkstraWitnessCalculator::default());
        graph.delete_arc(0, 1);
        calculator.notify_contracted(&graph, 1);

        assert_eq!(calculator.contracted_neighbours(0), 1);
        assert_eq!(calculator.depth(0), 1);
    }
}
