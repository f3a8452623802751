use std::ops::Range;

use fixedbitset::FixedBitSet;
use itertools::Itertools;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::{
    contracted_graph::ContractedGraph,
    contraction::shortcut_between,
    contraction_state::ContractionState,
    observer::{ContractionObserver, NoopObserver},
    priority_queue::{VertexPriorityQueue, NEVER_CONTRACT},
    weight::WeightCalculator,
    witness::WitnessCalculator,
};
use crate::{
    error::ContractionError,
    graphs::{dynamic_graph::DynamicGraph, VertexId},
};

/// How a vertex compares against its neighbours when testing local
/// minimality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TieBreak {
    /// Only a neighbour with a strictly lower priority blocks a vertex.
    #[default]
    AllowEqual,
    /// Neighbours with an equal priority block a vertex as well. Symmetric
    /// ties then block each other and may end the run with
    /// [`ContractionError::Stuck`].
    StrictlyLower,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreProcessorConfig {
    /// Maximal number of vertices pulled into the queue from the frontier.
    pub lookahead: usize,
    pub tie_break: TieBreak,
}

impl Default for PreProcessorConfig {
    fn default() -> Self {
        PreProcessorConfig {
            lookahead: 10_000,
            tie_break: TieBreak::AllowEqual,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreProcessorState {
    NotStarted,
    Running,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContractionProgress {
    pub contracted: u32,
    pub queued: usize,
    pub total: u32,
}

/// Builds a contraction hierarchy by contracting the vertices of a graph one
/// by one in the order given by a [`WeightCalculator`].
///
/// Contracting a vertex removes the arcs its neighbours have towards it and
/// inserts shortcuts between its neighbours where no witness exists. The
/// contracted vertex keeps its own arcs, which then all lead to vertices that
/// are contracted later (or never). These upward arcs are what the query
/// searches.
pub struct CHPreProcessor<C, W, O = NoopObserver> {
    graph: DynamicGraph,
    calculator: C,
    witness: W,
    observer: O,
    config: PreProcessorConfig,
    queue: VertexPriorityQueue,
    frontier: Range<VertexId>,
    /// Vertices taken from the frontier that had no finite priority or found
    /// no room in the queue.
    parked: FixedBitSet,
    contracted: ContractionState,
    level_to_vertex: Vec<VertexId>,
    state: PreProcessorState,
}

impl<C: WeightCalculator, W: WitnessCalculator> CHPreProcessor<C, W, NoopObserver> {
    pub fn new(graph: DynamicGraph, calculator: C, witness: W) -> Self {
        let frontier = graph.vertices();
        let contracted = ContractionState::new(graph.number_of_vertices());
        let parked = FixedBitSet::with_capacity(graph.number_of_vertices() as usize);

        CHPreProcessor {
            graph,
            calculator,
            witness,
            observer: NoopObserver,
            config: PreProcessorConfig::default(),
            queue: VertexPriorityQueue::new(),
            frontier,
            parked,
            contracted,
            level_to_vertex: Vec::new(),
            state: PreProcessorState::NotStarted,
        }
    }
}

impl<C, W, O> CHPreProcessor<C, W, O>
where
    C: WeightCalculator,
    W: WitnessCalculator,
    O: ContractionObserver,
{
    pub fn with_config(mut self, config: PreProcessorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer<P: ContractionObserver>(self, observer: P) -> CHPreProcessor<C, W, P> {
        CHPreProcessor {
            graph: self.graph,
            calculator: self.calculator,
            witness: self.witness,
            observer,
            config: self.config,
            queue: self.queue,
            frontier: self.frontier,
            parked: self.parked,
            contracted: self.contracted,
            level_to_vertex: self.level_to_vertex,
            state: self.state,
        }
    }

    pub fn state(&self) -> PreProcessorState {
        self.state
    }

    pub fn graph(&self) -> &DynamicGraph {
        &self.graph
    }

    pub fn calculator(&self) -> &C {
        &self.calculator
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn is_contracted(&self, vertex: VertexId) -> bool {
        self.contracted.is_contracted(vertex)
    }

    pub fn level_to_vertex(&self) -> &[VertexId] {
        &self.level_to_vertex
    }

    pub fn into_contracted_graph(self) -> ContractedGraph {
        ContractedGraph::new(self.graph, self.level_to_vertex)
    }

    pub fn start(&mut self) -> Result<(), ContractionError> {
        self.start_with_progress(u32::MAX, |_| {})
    }

    /// Runs the contraction loop until no vertex can be selected anymore.
    /// `progress` is called every `report_every` contractions and once at the
    /// end.
    pub fn start_with_progress<P>(
        &mut self,
        report_every: u32,
        mut progress: P,
    ) -> Result<(), ContractionError>
    where
        P: FnMut(&ContractionProgress),
    {
        if self.state != PreProcessorState::NotStarted {
            return Err(ContractionError::AlreadyStarted);
        }
        self.state = PreProcessorState::Running;

        let total = self.graph.number_of_vertices();
        let report_every = report_every.max(1);
        info!("Start contracting {} vertices", total);

        while let Some(vertex) = self.select_next()? {
            self.contract(vertex);

            let contracted = self.contracted.number_of_contracted();
            if contracted % report_every == 0 {
                progress(&ContractionProgress {
                    contracted,
                    queued: self.queue.len(),
                    total,
                });
            }
        }

        self.state = PreProcessorState::Finished;

        let contracted = self.contracted.number_of_contracted();
        progress(&ContractionProgress {
            contracted,
            queued: self.queue.len(),
            total,
        });
        if contracted < total {
            warn!(
                "Finished contracting, {} vertices remain in the core",
                total - contracted
            );
        } else {
            info!("Finished contracting");
        }

        Ok(())
    }

    fn enqueue(&mut self, vertex: VertexId, priority: f32) {
        self.parked.set(vertex as usize, false);
        self.queue.enqueue(vertex, priority);
    }

    fn park(&mut self, vertex: VertexId) {
        self.queue.remove(vertex);
        self.parked.insert(vertex as usize);
    }

    fn is_parked(&self, vertex: VertexId) -> bool {
        self.parked.contains(vertex as usize)
    }

    /// Pulls vertices from the frontier until the queue holds `lookahead`
    /// vertices. Vertices that must not be contracted right now are parked.
    fn fill_queue(&mut self) {
        while self.queue.len() < self.config.lookahead {
            let Some(vertex) = self.frontier.next() else {
                break;
            };
            if self.contracted.is_contracted(vertex) || self.queue.contains(vertex) {
                continue;
            }

            let priority = self.calculator.calculate(&self.graph, vertex);
            if priority == NEVER_CONTRACT {
                self.park(vertex);
            } else {
                self.enqueue(vertex, priority);
            }
        }
    }

    /// Next vertex to contract, `None` once no contractable vertex is left.
    ///
    /// Every live vertex is either queued, still ahead in the frontier or
    /// parked, and all three are searched before giving up.
    pub fn select_next(&mut self) -> Result<Option<VertexId>, ContractionError> {
        self.fill_queue();

        if let Some(first) = self.queue.peek() {
            if self.can_be_contracted(first) {
                self.queue.remove(first);
                return Ok(Some(first));
            }
        }

        // The minimum is not locally minimal. Walk the queue in order and
        // refresh stale priorities on the way.
        let mut blocked = 0;
        for (vertex, stored_priority) in self.queue.by_priority() {
            let priority = self.calculator.calculate(&self.graph, vertex);
            if priority == NEVER_CONTRACT {
                debug!("{} can not be contracted for now", vertex);
                self.park(vertex);
                continue;
            }
            if priority != stored_priority {
                debug!(
                    "priority of {} was stale ({} instead of {})",
                    vertex, stored_priority, priority
                );
                self.enqueue(vertex, priority);
            }

            if self.is_locally_minimal(vertex, priority) {
                self.queue.remove(vertex);
                return Ok(Some(vertex));
            }
            blocked += 1;
        }

        // Look ahead into vertices that have not been queued yet.
        for vertex in self.frontier.clone() {
            if self.contracted.is_contracted(vertex) || self.queue.contains(vertex) {
                continue;
            }

            let priority = self.calculator.calculate(&self.graph, vertex);
            if priority == NEVER_CONTRACT {
                continue;
            }
            if self.is_locally_minimal(vertex, priority) {
                return Ok(Some(vertex));
            }
            blocked += 1;
        }

        // Parked vertices may have become contractable in the meantime.
        let parked = self.parked.ones().map(|vertex| vertex as VertexId).collect_vec();
        for vertex in parked {
            if self.contracted.is_contracted(vertex) || self.queue.contains(vertex) {
                self.parked.set(vertex as usize, false);
                continue;
            }

            let priority = self.calculator.calculate(&self.graph, vertex);
            if priority == NEVER_CONTRACT {
                continue;
            }
            if self.is_locally_minimal(vertex, priority) {
                self.parked.set(vertex as usize, false);
                return Ok(Some(vertex));
            }
            if self.queue.len() < self.config.lookahead {
                self.enqueue(vertex, priority);
            }
            blocked += 1;
        }

        if blocked == 0 {
            return Ok(None);
        }
        Err(ContractionError::Stuck { remaining: blocked })
    }

    /// Whether `vertex` has a finite priority and no live neighbour has a
    /// lower one, with priorities freshly calculated.
    pub fn can_be_contracted(&self, vertex: VertexId) -> bool {
        let priority = self.calculator.calculate(&self.graph, vertex);
        if priority == NEVER_CONTRACT {
            return false;
        }

        self.is_locally_minimal(vertex, priority)
    }

    fn is_locally_minimal(&self, vertex: VertexId, priority: f32) -> bool {
        self.live_neighbours(vertex).into_iter().all(|neighbour| {
            let neighbour_priority = self.calculator.calculate(&self.graph, neighbour);
            match self.config.tie_break {
                TieBreak::AllowEqual => neighbour_priority >= priority,
                TieBreak::StrictlyLower => neighbour_priority > priority,
            }
        })
    }

    fn live_neighbours(&self, vertex: VertexId) -> Vec<VertexId> {
        self.graph
            .arcs(vertex)
            .iter()
            .map(|arc| arc.head)
            .filter(|&neighbour| neighbour != vertex && !self.contracted.is_contracted(neighbour))
            .unique()
            .collect()
    }

    /// Contracts `vertex`.
    ///
    /// # Panics
    ///
    /// Panics if `vertex` has already been contracted.
    pub fn contract(&mut self, vertex: VertexId) {
        assert!(
            !self.contracted.is_contracted(vertex),
            "vertex {} is already contracted",
            vertex
        );

        let arcs = self.graph.arcs(vertex).to_vec();
        self.observer.before_contraction(vertex, &arcs);

        let neighbours = arcs.iter().map(|arc| arc.head).unique().collect_vec();

        // sever the vertex from the remaining graph
        for &neighbour in neighbours.iter() {
            self.graph.delete_arc(neighbour, vertex);
        }

        let mut number_of_shortcuts = 0;
        for x in 1..arcs.len() {
            for y in 0..x {
                let Some(data) =
                    shortcut_between(&self.graph, &self.witness, vertex, &arcs[x], &arcs[y])
                else {
                    continue;
                };

                let (tail, head) = (arcs[x].head, arcs[y].head);
                // Later contractions only pair up vertices that are neighbours,
                // so keep that relation even if both directions are witnessed.
                if data.is_traversable() || !self.graph.has_neighbour(tail, head) {
                    self.graph.add_arc(tail, head, data);
                    self.graph.add_arc(head, tail, data.reversed());
                    if data.is_traversable() {
                        number_of_shortcuts += 1;
                    }
                }
            }
        }

        self.contracted.set_contracted(vertex);
        self.level_to_vertex.push(vertex);
        self.calculator.notify_contracted(&self.graph, vertex);

        debug!(
            "contracted {} with {} neighbours, {} shortcuts",
            vertex,
            neighbours.len(),
            number_of_shortcuts
        );

        for neighbour in neighbours {
            if self.contracted.is_contracted(neighbour) {
                continue;
            }

            let queued = self.queue.remove(neighbour);
            if !queued {
                // the frontier reaches it anyway
                if !self.is_parked(neighbour) && neighbour >= self.frontier.start {
                    continue;
                }
                if self.queue.len() >= self.config.lookahead {
                    self.park(neighbour);
                    continue;
                }
            }

            let priority = self.calculator.calculate(&self.graph, neighbour);
            if priority == NEVER_CONTRACT {
                self.park(neighbour);
            } else {
                self.enqueue(neighbour, priority);
            }
        }

        self.observer.after_contraction(vertex, &arcs);
    }
}
