use std::{cmp::Reverse, collections::BinaryHeap};

use ordered_float::OrderedFloat;

use crate::graphs::{VertexId, Weight};

/// A trait for a priority queue that manages vertices and their distances.
/// This trait is useful for graph algorithms that need to repeatedly retrieve
/// the vertex with the smallest distance (such as Dijkstra's algorithm).
///
/// The implementing structs might or might not use a decrease key operation.
pub trait VertexDistanceQueue {
    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);

    /// Inserts a vertex with its associated distance into the priority queue.
    fn insert(&mut self, vertex: VertexId, distance: Weight);

    /// Removes and returns the vertex with the smallest distance from the
    /// priority queue or none if the queue is empty.
    fn pop(&mut self) -> Option<(VertexId, Weight)>;

    /// Smallest distance currently in the queue.
    fn peek_distance(&self) -> Option<Weight>;

    fn is_empty(&self) -> bool;
}

/// A priority queue implementation using a Binary Heap.
#[derive(Default)]
pub struct VertexDistanceQueueBinaryHeap {
    heap: BinaryHeap<Reverse<(OrderedFloat<Weight>, VertexId)>>,
}

impl VertexDistanceQueueBinaryHeap {
    pub fn new() -> Self {
        VertexDistanceQueueBinaryHeap {
            heap: BinaryHeap::new(),
        }
    }
}

impl VertexDistanceQueue for VertexDistanceQueueBinaryHeap {
    fn clear(&mut self) {
        self.heap.clear();
    }

    fn insert(&mut self, vertex: VertexId, distance: Weight) {
        self.heap.push(Reverse((OrderedFloat(distance), vertex)));
    }

    fn pop(&mut self) -> Option<(VertexId, Weight)> {
        let Reverse((OrderedFloat(distance), vertex)) = self.heap.pop()?;

        Some((vertex, distance))
    }

    fn peek_distance(&self) -> Option<Weight> {
        self.heap
            .peek()
            .map(|Reverse((OrderedFloat(distance), _vertex))| *distance)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
