use ahash::{HashMap, HashMapExt};

use crate::{
    graphs::{VertexId, Weight},
    search::path::Path,
};

/// Trait for handling data access in Dijkstra's algorithm.
pub trait DijkstraData {
    /// Clears all stored data, preparing for a new search.
    fn clear(&mut self);

    /// Retrieves the predecessor of a given vertex, if any.
    fn get_predecessor(&self, vertex: VertexId) -> Option<VertexId>;

    /// Sets the predecessor for a given vertex.
    fn set_predecessor(&mut self, vertex: VertexId, predecessor: VertexId);

    /// Retrieves the tentative distance of a given vertex, if it was reached.
    fn get_distance(&self, vertex: VertexId) -> Option<Weight>;

    /// Sets the distance to a given vertex.
    fn set_distance(&mut self, vertex: VertexId, distance: Weight);

    /// Constructs the path to a target vertex, if reachable.
    ///
    /// This function traces back from the target vertex using
    /// predecessor data to build the full path. Returns `None`
    /// if the target vertex is unreachable.
    fn get_path(&self, target: VertexId) -> Option<Path> {
        let weight = self.get_distance(target)?;

        let mut vertices = vec![target];
        let mut predecessor = target;
        while let Some(new_predecessor) = self.get_predecessor(predecessor) {
            predecessor = new_predecessor;
            vertices.push(predecessor);
        }

        // Reverse the path to start from the source vertex.
        vertices.reverse();

        Some(Path { vertices, weight })
    }
}

/// Dense storage for searches that are expected to touch most of the graph.
pub struct DijkstraDataVec {
    predecessors: Vec<VertexId>,
    distances: Vec<Weight>,
}

impl DijkstraDataVec {
    pub fn new(number_of_vertices: u32) -> Self {
        DijkstraDataVec {
            predecessors: vec![VertexId::MAX; number_of_vertices as usize],
            distances: vec![Weight::INFINITY; number_of_vertices as usize],
        }
    }
}

impl DijkstraData for DijkstraDataVec {
    fn clear(&mut self) {
        self.predecessors.fill(VertexId::MAX);
        self.distances.fill(Weight::INFINITY);
    }

    fn get_predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        let predecessor = *self.predecessors.get(vertex as usize)?;

        if predecessor == VertexId::MAX {
            return None;
        }

        Some(predecessor)
    }

    fn set_predecessor(&mut self, vertex: VertexId, predecessor: VertexId) {
        self.predecessors[vertex as usize] = predecessor;
    }

    fn get_distance(&self, vertex: VertexId) -> Option<Weight> {
        let distance = *self.distances.get(vertex as usize)?;

        if distance == Weight::INFINITY {
            return None;
        }

        Some(distance)
    }

    fn set_distance(&mut self, vertex: VertexId, distance: Weight) {
        self.distances[vertex as usize] = distance
    }
}

/// Sparse storage for local searches such as witness searches and CH queries.
#[derive(Default)]
pub struct DijkstraDataHashMap {
    predecessors: HashMap<VertexId, VertexId>,
    distances: HashMap<VertexId, Weight>,
}

impl DijkstraDataHashMap {
    pub fn new() -> Self {
        DijkstraDataHashMap {
            predecessors: HashMap::new(),
            distances: HashMap::new(),
        }
    }
}

impl DijkstraData for DijkstraDataHashMap {
    fn clear(&mut self) {
        self.predecessors.clear();
        self.distances.clear();
    }

    fn get_predecessor(&self, vertex: VertexId) -> Option<VertexId> {
        self.predecessors.get(&vertex).cloned()
    }

    fn set_predecessor(&mut self, vertex: VertexId, predecessor: VertexId) {
        self.predecessors.insert(vertex, predecessor);
    }

    fn get_distance(&self, vertex: VertexId) -> Option<Weight> {
        self.distances.get(&vertex).cloned()
    }

    fn set_distance(&mut self, vertex: VertexId, distance: Weight) {
        self.distances.insert(vertex, distance);
    }
}
