pub mod contracted_graph;
pub mod contraction;
pub mod contraction_state;
pub mod observer;
pub mod pathfinding;
pub mod preprocessor;
pub mod priority_queue;
pub mod weight;
pub mod witness;
