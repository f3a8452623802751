use crate::graphs::{TaillessArc, VertexId};

/// Passive hooks around every single contraction.
///
/// Observers see the vertex and a snapshot of its arcs as they were right
/// before the contraction. They must not influence the contraction itself.
pub trait ContractionObserver {
    fn before_contraction(&mut self, _vertex: VertexId, _arcs: &[TaillessArc]) {}

    fn after_contraction(&mut self, _vertex: VertexId, _arcs: &[TaillessArc]) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl ContractionObserver for NoopObserver {}

/// Collects simple statistics about a preprocessing run.
#[derive(Clone, Debug, Default)]
pub struct ContractionStatistics {
    pub contracted_vertices: u32,
    pub max_degree: usize,
    pub total_degree: usize,
}

impl ContractionStatistics {
    pub fn average_degree(&self) -> f64 {
        if self.contracted_vertices == 0 {
            return 0.0;
        }
        self.total_degree as f64 / self.contracted_vertices as f64
    }
}

impl ContractionObserver for ContractionStatistics {
    fn after_contraction(&mut self, _vertex: VertexId, arcs: &[TaillessArc]) {
        self.contracted_vertices += 1;
        self.max_degree = self.max_degree.max(arcs.len());
        self.total_degree += arcs.len();
    }
}

impl<O: ContractionObserver + ?Sized> ContractionObserver for &mut O {
    fn before_contraction(&mut self, vertex: VertexId, arcs: &[TaillessArc]) {
        (**self).before_contraction(vertex, arcs)
    }

    fn after_contraction(&mut self, vertex: VertexId, arcs: &[TaillessArc]) {
        (**self).after_contraction(vertex, arcs)
    }
}
