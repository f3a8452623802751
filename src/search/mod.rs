use path::Path;

use crate::graphs::{VertexId, Weight};

pub mod ch;
pub mod collections;
pub mod dijkstra;
pub mod path;
pub mod shortcuts;

pub trait PathFinding: Send + Sync {
    fn shortest_path(&self, source: VertexId, target: VertexId) -> Option<Path>;

    fn shortest_path_weight(&self, source: VertexId, target: VertexId) -> Option<Weight>;
}
