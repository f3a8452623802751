use serde::{Deserialize, Serialize};

use super::{
    preprocessor::{CHPreProcessor, PreProcessorConfig},
    weight::WeightCalculator,
    witness::WitnessCalculator,
};
use crate::{
    error::ContractionError,
    graphs::{dynamic_graph::DynamicGraph, VertexId},
};

/// Result of a preprocessing run.
///
/// Every contracted vertex keeps the arcs it had at contraction time, all of
/// them leading to vertices on a higher level or in the core. Vertices that
/// were never contracted form the core and keep their arcs to each other.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContractedGraph {
    pub graph: DynamicGraph,
    pub level_to_vertex: Vec<VertexId>,
    pub vertex_to_level: Vec<Option<u32>>,
}

impl ContractedGraph {
    pub fn new(graph: DynamicGraph, level_to_vertex: Vec<VertexId>) -> ContractedGraph {
        let vertex_to_level = vertex_to_level(graph.number_of_vertices(), &level_to_vertex);

        ContractedGraph {
            graph,
            level_to_vertex,
            vertex_to_level,
        }
    }

    /// Contracts `graph` with the given priority and witness search.
    pub fn by_contraction<C, W>(
        graph: DynamicGraph,
        calculator: C,
        witness: W,
        config: PreProcessorConfig,
    ) -> Result<ContractedGraph, ContractionError>
    where
        C: WeightCalculator,
        W: WitnessCalculator,
    {
        let mut preprocessor = CHPreProcessor::new(graph, calculator, witness).with_config(config);
        preprocessor.start()?;

        Ok(preprocessor.into_contracted_graph())
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.graph.number_of_vertices()
    }

    /// Level of `vertex`, `None` if it belongs to the core.
    pub fn level(&self, vertex: VertexId) -> Option<u32> {
        self.vertex_to_level.get(vertex as usize).copied().flatten()
    }

    /// Vertices that have never been contracted.
    pub fn core(&self) -> Vec<VertexId> {
        self.graph
            .vertices()
            .filter(|&vertex| self.level(vertex).is_none())
            .collect()
    }

    /// Number of traversable shortcuts, each counted once although it is
    /// stored at both endpoints.
    pub fn number_of_shortcuts(&self) -> usize {
        self.graph
            .all_arcs()
            .filter(|arc| arc.tail < arc.head)
            .filter(|arc| arc.data.is_shortcut() && arc.data.is_traversable())
            .count()
    }
}

pub fn vertex_to_level(number_of_vertices: u32, level_to_vertex: &[VertexId]) -> Vec<Option<u32>> {
    let mut vertex_to_level = vec![None; number_of_vertices as usize];

    for (level, &vertex) in level_to_vertex.iter().enumerate() {
        vertex_to_level[vertex as usize] = Some(level as u32);
    }

    vertex_to_level
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::ch::{weight::EdgeDifference, witness::DijkstraWitnessCalculator};

    #[test]
    fn missing_levels_form_the_core() {
        let graph = DynamicGraph::with_vertices(4);
        let contracted_graph = ContractedGraph::new(graph, vec![2, 0]);

        assert_eq!(contracted_graph.level(2), Some(0));
        assert_eq!(contracted_graph.level(0), Some(1));
        assert_eq!(contracted_graph.level(1), None);
        assert_eq!(contracted_graph.level(17), None);
        assert_eq!(contracted_graph.core(), vec![1, 3]);
    }

    #[test]
    fn two_way_shortcut_counts_once() {
        let mut graph = DynamicGraph::new();
        graph.add_edge(0, 1, 2.0, true, true);
        graph.add_edge(1, 2, 3.0, true, true);

        let mut preprocessor = CHPreProcessor::new(
            graph,
            EdgeDifference::new(DijkstraWitnessCalculator::default()),
            DijkstraWitnessCalculator::default(),
        );
        preprocessor.contract(1);
        let contracted_graph = preprocessor.into_contracted_graph();

        assert_eq!(contracted_graph.number_of_shortcuts(), 1);
        assert_eq!(contracted_graph.core(), vec![0, 2]);
    }
}
