use ahash::{HashSet, HashSetExt};
use dynamic_ch::{
    graphs::{dynamic_graph::DynamicGraph, VertexId, Weight},
    search::{
        ch::{
            contracted_graph::ContractedGraph,
            preprocessor::{CHPreProcessor, PreProcessorConfig},
            priority_queue::NEVER_CONTRACT,
            weight::{ContractedSearchSpace, EdgeDifference, WeightCalculator},
            witness::DijkstraWitnessCalculator,
        },
        path::{validate_path, ShortestPathRequest, ShortestPathTestCase},
        PathFinding,
    },
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Random sparse graph with integral weights, so that all path weights are
/// exact.
fn random_graph(seed: u64, number_of_vertices: u32, number_of_edges: usize) -> DynamicGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = DynamicGraph::with_vertices(number_of_vertices);
    let mut seen = HashSet::new();

    while seen.len() < number_of_edges {
        let tail = rng.gen_range(0..number_of_vertices);
        let head = rng.gen_range(0..number_of_vertices);
        if tail == head || !seen.insert((tail.min(head), tail.max(head))) {
            continue;
        }

        let weight = rng.gen_range(1..=20) as Weight;
        let backward = rng.gen_bool(0.6);
        graph.add_edge(tail, head, weight, true, backward);
    }

    graph
}

fn assert_matches_dijkstra(graph: &DynamicGraph, contracted_graph: &ContractedGraph) {
    for source in graph.vertices() {
        for target in graph.vertices() {
            let test_case = ShortestPathTestCase {
                request: ShortestPathRequest { source, target },
                weight: graph.shortest_path_weight(source, target),
            };
            let path = contracted_graph.shortest_path(source, target);

            assert_eq!(path.as_ref().map(|path| path.weight), test_case.weight);
            if let Err(error) = validate_path(graph, &test_case, &path, 0.0) {
                panic!("{} -> {}: {}", source, target, error);
            }
        }
    }
}

/// Leaves every seventh vertex uncontracted.
struct KeepCore<C> {
    inner: C,
}

impl<C: WeightCalculator> WeightCalculator for KeepCore<C> {
    fn calculate(&self, graph: &DynamicGraph, vertex: VertexId) -> f32 {
        if vertex % 7 == 0 {
            return NEVER_CONTRACT;
        }
        self.inner.calculate(graph, vertex)
    }

    fn notify_contracted(&mut self, graph: &DynamicGraph, vertex: VertexId) {
        self.inner.notify_contracted(graph, vertex)
    }
}

#[test]
fn edge_difference_preserves_distances() {
    for seed in 0..3 {
        let graph = random_graph(seed, 50, 120);
        let contracted_graph = ContractedGraph::by_contraction(
            graph.clone(),
            EdgeDifference::new(DijkstraWitnessCalculator::default()),
            DijkstraWitnessCalculator::default(),
            PreProcessorConfig::default(),
        )
        .unwrap();

        assert!(contracted_graph.core().is_empty());
        assert_matches_dijkstra(&graph, &contracted_graph);
    }
}

#[test]
fn search_space_preserves_distances_with_small_lookahead() {
    let graph = random_graph(42, 60, 150);
    let witness = DijkstraWitnessCalculator::new(3).with_max_settled(20);
    let contracted_graph = ContractedGraph::by_contraction(
        graph.clone(),
        ContractedSearchSpace::new(witness),
        witness,
        PreProcessorConfig {
            lookahead: 8,
            ..Default::default()
        },
    )
    .unwrap();

    assert_matches_dijkstra(&graph, &contracted_graph);
}

#[test]
fn shortcuts_are_sums_of_the_arcs_they_replace() {
    let graph = random_graph(7, 50, 130);
    let contracted_graph = ContractedGraph::by_contraction(
        graph,
        EdgeDifference::new(DijkstraWitnessCalculator::default()),
        DijkstraWitnessCalculator::default(),
        PreProcessorConfig::default(),
    )
    .unwrap();
    let graph = &contracted_graph.graph;

    let mut number_of_shortcuts = 0;
    for arc in graph.all_arcs().filter(|arc| arc.data.forward) {
        let Some(via) = arc.data.contracted_through else {
            continue;
        };
        number_of_shortcuts += 1;

        // the contracted vertex still holds both halves
        let halves_exist = graph
            .arcs(via)
            .iter()
            .filter(|first| first.head == arc.tail && first.data.backward)
            .any(|first| {
                graph.arcs(via).iter().any(|second| {
                    second.head == arc.head
                        && second.data.forward
                        && first.data.weight + second.data.weight == arc.data.weight
                })
            });
        assert!(halves_exist, "{:?} can not be unpacked", arc);
    }
    assert!(number_of_shortcuts > 0);
}

#[test]
fn hierarchy_is_upward_and_free_of_loops() {
    let graph = random_graph(3, 60, 160);
    let contracted_graph = ContractedGraph::by_contraction(
        graph,
        ContractedSearchSpace::new(DijkstraWitnessCalculator::default()),
        DijkstraWitnessCalculator::default(),
        PreProcessorConfig::default(),
    )
    .unwrap();

    for arc in contracted_graph.graph.all_arcs() {
        assert_ne!(arc.tail, arc.head);

        let level_tail = contracted_graph.level(arc.tail).unwrap();
        let level_head = contracted_graph.level(arc.head).unwrap();
        assert!(level_tail < level_head, "{:?} points downwards", arc);
    }
}

#[test]
fn queries_are_repeatable() {
    let graph = random_graph(11, 40, 90);
    let contracted_graph = ContractedGraph::by_contraction(
        graph.clone(),
        EdgeDifference::new(DijkstraWitnessCalculator::default()),
        DijkstraWitnessCalculator::default(),
        PreProcessorConfig::default(),
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..100 {
        let source = rng.gen_range(0..graph.number_of_vertices());
        let target = rng.gen_range(0..graph.number_of_vertices());

        assert_eq!(
            contracted_graph.shortest_path(source, target),
            contracted_graph.shortest_path(source, target)
        );
    }
}

#[test]
fn uncontracted_core_still_answers_queries() {
    let graph = random_graph(9, 50, 120);
    let mut preprocessor = CHPreProcessor::new(
        graph.clone(),
        KeepCore {
            inner: EdgeDifference::new(DijkstraWitnessCalculator::default()),
        },
        DijkstraWitnessCalculator::default(),
    );
    preprocessor.start().unwrap();
    let contracted_graph = preprocessor.into_contracted_graph();

    let core = contracted_graph.core();
    assert_eq!(core, (0..50u32).filter(|vertex| vertex % 7 == 0).collect::<Vec<_>>());
    assert_eq!(contracted_graph.level_to_vertex.len() + core.len(), 50);

    assert_matches_dijkstra(&graph, &contracted_graph);
}

#[test]
fn contracted_graph_survives_bincode() {
    let graph = random_graph(1, 30, 60);
    let contracted_graph = ContractedGraph::by_contraction(
        graph.clone(),
        EdgeDifference::new(DijkstraWitnessCalculator::default()),
        DijkstraWitnessCalculator::default(),
        PreProcessorConfig::default(),
    )
    .unwrap();

    let bytes = bincode::serialize(&contracted_graph).unwrap();
    let restored: ContractedGraph = bincode::deserialize(&bytes).unwrap();

    assert_eq!(restored.level_to_vertex, contracted_graph.level_to_vertex);
    assert_matches_dijkstra(&graph, &restored);
}
