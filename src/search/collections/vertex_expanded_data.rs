use ahash::{HashSet, HashSetExt};
use fixedbitset::FixedBitSet;

use crate::graphs::VertexId;

pub trait VertexExpandedData {
    /// Marks `vertex` as expanded and returns whether it already was.
    fn expand(&mut self, vertex: VertexId) -> bool;

    fn is_expanded(&self, vertex: VertexId) -> bool;

    fn clear(&mut self);
}

pub struct VertexExpandedDataBitSet {
    expanded: FixedBitSet,
}

impl VertexExpandedDataBitSet {
    pub fn new(number_of_vertices: u32) -> Self {
        VertexExpandedDataBitSet {
            expanded: FixedBitSet::with_capacity(number_of_vertices as usize),
        }
    }
}

impl VertexExpandedData for VertexExpandedDataBitSet {
    fn expand(&mut self, vertex: VertexId) -> bool {
        self.expanded.put(vertex as usize)
    }

    fn is_expanded(&self, vertex: VertexId) -> bool {
        self.expanded.contains(vertex as usize)
    }

    fn clear(&mut self) {
        self.expanded.clear()
    }
}

#[derive(Default)]
pub struct VertexExpandedDataHashSet {
    expanded: HashSet<VertexId>,
}

impl VertexExpandedDataHashSet {
    pub fn new() -> Self {
        VertexExpandedDataHashSet {
            expanded: HashSet::new(),
        }
    }

    pub fn number_of_expanded_vertices(&self) -> usize {
        self.expanded.len()
    }
}

impl VertexExpandedData for VertexExpandedDataHashSet {
    fn expand(&mut self, vertex: VertexId) -> bool {
        !self.expanded.insert(vertex)
    }

    fn is_expanded(&self, vertex: VertexId) -> bool {
        self.expanded.contains(&vertex)
    }

    fn clear(&mut self) {
        self.expanded.clear();
    }
}
