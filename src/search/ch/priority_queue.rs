use std::cmp::Reverse;

use keyed_priority_queue::KeyedPriorityQueue;
use ordered_float::OrderedFloat;

use crate::graphs::VertexId;

/// Priority that marks a vertex as not (yet) contractable.
pub const NEVER_CONTRACT: f32 = f32::MAX;

/// Min-priority queue of vertices keyed by vertex id.
///
/// Every vertex is queued at most once, enqueuing it again replaces its
/// priority. Stored priorities may be stale; they are only as fresh as the
/// last call to [`VertexPriorityQueue::enqueue`].
#[derive(Clone)]
pub struct VertexPriorityQueue {
    queue: KeyedPriorityQueue<VertexId, Reverse<OrderedFloat<f32>>>,
}

impl Default for VertexPriorityQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexPriorityQueue {
    pub fn new() -> VertexPriorityQueue {
        VertexPriorityQueue {
            queue: KeyedPriorityQueue::new(),
        }
    }

    pub fn enqueue(&mut self, vertex: VertexId, priority: f32) {
        self.queue.push(vertex, Reverse(OrderedFloat(priority)));
    }

    pub fn remove(&mut self, vertex: VertexId) -> bool {
        self.queue.remove(&vertex).is_some()
    }

    pub fn contains(&self, vertex: VertexId) -> bool {
        self.queue.get_priority(&vertex).is_some()
    }

    /// Stored priority of `vertex`.
    pub fn weight(&self, vertex: VertexId) -> Option<f32> {
        self.queue
            .get_priority(&vertex)
            .map(|Reverse(OrderedFloat(priority))| *priority)
    }

    /// Vertex with the smallest stored priority.
    pub fn peek(&self) -> Option<VertexId> {
        self.queue.peek().map(|(&vertex, _priority)| vertex)
    }

    pub fn pop(&mut self) -> Option<(VertexId, f32)> {
        let (vertex, Reverse(OrderedFloat(priority))) = self.queue.pop()?;
        Some((vertex, priority))
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Snapshot of all entries ordered by ascending stored priority, ties by
    /// vertex id.
    pub fn by_priority(&self) -> Vec<(VertexId, f32)> {
        let mut entries: Vec<_> = self
            .queue
            .iter()
            .map(|(&vertex, Reverse(OrderedFloat(priority)))| (vertex, *priority))
            .collect();
        entries.sort_by(|(vertex_a, priority_a), (vertex_b, priority_b)| {
            priority_a
                .total_cmp(priority_b)
                .then_with(|| vertex_a.cmp(vertex_b))
        });
        entries
    }
}
