use fixedbitset::FixedBitSet;

use crate::graphs::VertexId;

/// Which vertices have been contracted during one preprocessing run.
#[derive(Clone, Debug, Default)]
pub struct ContractionState {
    contracted: FixedBitSet,
    number_of_contracted: u32,
}

impl ContractionState {
    pub fn new(number_of_vertices: u32) -> ContractionState {
        ContractionState {
            contracted: FixedBitSet::with_capacity(number_of_vertices as usize),
            number_of_contracted: 0,
        }
    }

    pub fn is_contracted(&self, vertex: VertexId) -> bool {
        self.contracted.contains(vertex as usize)
    }

    /// Marks `vertex` as contracted, growing the set with doubling if the id
    /// lies beyond the current capacity. Returns whether it already was.
    pub fn set_contracted(&mut self, vertex: VertexId) -> bool {
        let index = vertex as usize;
        if index >= self.contracted.len() {
            let capacity = std::cmp::max(index + 1, self.contracted.len() * 2);
            self.contracted.grow(capacity);
        }

        let was_contracted = self.contracted.put(index);
        if !was_contracted {
            self.number_of_contracted += 1;
        }
        was_contracted
    }

    pub fn number_of_contracted(&self) -> u32 {
        self.number_of_contracted
    }
}
