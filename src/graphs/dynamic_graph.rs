use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::{ArcData, TaillessArc, VertexId, Weight, WeightedArc};

/// Mutable adjacency list keyed by dense vertex ids.
///
/// Every arc is stored at its tail. An undirected road segment or a one-way
/// street is therefore stored twice, once at each endpoint with mirrored
/// direction flags (see [`DynamicGraph::add_edge`]). Parallel arcs are kept as
/// they are; callers decide whether an insertion is meaningful.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct DynamicGraph {
    arcs: Vec<Vec<TaillessArc>>,
}

impl DynamicGraph {
    pub fn new() -> DynamicGraph {
        DynamicGraph::default()
    }

    pub fn with_vertices(number_of_vertices: u32) -> DynamicGraph {
        DynamicGraph {
            arcs: vec![Vec::new(); number_of_vertices as usize],
        }
    }

    pub fn add_vertex(&mut self) -> VertexId {
        self.arcs.push(Vec::new());
        (self.arcs.len() - 1) as VertexId
    }

    pub fn number_of_vertices(&self) -> u32 {
        self.arcs.len() as u32
    }

    pub fn number_of_arcs(&self) -> usize {
        self.arcs.iter().map(Vec::len).sum()
    }

    /// All vertex ids. The range is cheap to clone, so iteration can be
    /// restarted or scanned ahead at will.
    pub fn vertices(&self) -> Range<VertexId> {
        0..self.number_of_vertices()
    }

    /// Stores a single arc at `tail`.
    pub fn add_arc(&mut self, tail: VertexId, head: VertexId, data: ArcData) {
        // Ensure the arc endpoints are within the bounds of self.arcs.
        let max_endpoint = std::cmp::max(tail, head) as usize;
        if max_endpoint >= self.arcs.len() {
            self.arcs.resize(max_endpoint + 1, Vec::new());
        }

        self.arcs[tail as usize].push(TaillessArc { head, data });
    }

    /// Stores a directed edge once per direction: at `tail` with the given
    /// flags and at `head` with mirrored flags.
    pub fn add_edge(
        &mut self,
        tail: VertexId,
        head: VertexId,
        weight: Weight,
        forward: bool,
        backward: bool,
    ) {
        let data = ArcData::new(weight, forward, backward);
        self.add_arc(tail, head, data);
        self.add_arc(head, tail, data.reversed());
    }

    /// Removes every arc stored at `tail` that points to `head`. Returns the
    /// number of removed arcs.
    pub fn delete_arc(&mut self, tail: VertexId, head: VertexId) -> usize {
        let Some(arcs) = self.arcs.get_mut(tail as usize) else {
            return 0;
        };

        let before = arcs.len();
        arcs.retain(|arc| arc.head != head);
        before - arcs.len()
    }

    /// Arcs stored at `tail` in insertion order. Unknown vertices have none.
    pub fn arcs(&self, tail: VertexId) -> &[TaillessArc] {
        self.arcs
            .get(tail as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_neighbour(&self, tail: VertexId, head: VertexId) -> bool {
        self.arcs(tail).iter().any(|arc| arc.head == head)
    }

    pub fn degree(&self, vertex: VertexId) -> usize {
        self.arcs(vertex).len()
    }

    pub fn all_arcs(&self) -> impl Iterator<Item = WeightedArc> + '_ {
        self.vertices().flat_map(move |tail| {
            self.arcs(tail)
                .iter()
                .map(move |tailless_arc| tailless_arc.set_tail(tail))
        })
    }

    /// Lightest arc usable for travelling from `tail` to `head`.
    ///
    /// Looks at forward arcs stored at `tail` as well as backward arcs stored
    /// at `head`, as after contraction an edge may only survive at the endpoint
    /// that was contracted first.
    pub fn min_arc(&self, tail: VertexId, head: VertexId) -> Option<ArcData> {
        let at_tail = self
            .arcs(tail)
            .iter()
            .filter(|arc| arc.head == head && arc.data.forward)
            .map(|arc| arc.data);
        let at_head = self
            .arcs(head)
            .iter()
            .filter(|arc| arc.head == tail && arc.data.backward)
            .map(|arc| arc.data.reversed());

        at_tail
            .chain(at_head)
            .min_by(|a, b| a.weight.total_cmp(&b.weight))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_stores_both_directions() {
        let mut graph = DynamicGraph::new();
        graph.add_edge(0, 2, 3.0, true, false);

        assert_eq!(graph.number_of_vertices(), 3);
        assert_eq!(graph.arcs(0).len(), 1);
        assert_eq!(graph.arcs(1).len(), 0);

        let at_head = graph.arcs(2)[0];
        assert_eq!(at_head.head, 0);
        assert!(!at_head.data.forward);
        assert!(at_head.data.backward);
        assert_eq!(at_head.data.weight, 3.0);
    }

    #[test]
    fn delete_arc_removes_parallel_arcs_only_at_tail() {
        let mut graph = DynamicGraph::with_vertices(3);
        graph.add_arc(0, 1, ArcData::new(1.0, true, false));
        graph.add_arc(0, 1, ArcData::shortcut(2.0, true, true, 2));
        graph.add_arc(0, 2, ArcData::new(4.0, true, false));
        graph.add_arc(1, 0, ArcData::new(1.0, false, true));

        assert_eq!(graph.delete_arc(0, 1), 2);
        assert!(!graph.has_neighbour(0, 1));
        assert!(graph.has_neighbour(0, 2));
        assert!(graph.has_neighbour(1, 0));
        assert_eq!(graph.delete_arc(0, 1), 0);
        assert_eq!(graph.delete_arc(7, 1), 0);
    }

    #[test]
    fn arcs_keep_insertion_order() {
        let mut graph = DynamicGraph::new();
        let a = graph.add_vertex();
        let b = graph.add_vertex();
        let c = graph.add_vertex();
        graph.add_arc(a, c, ArcData::new(1.0, true, true));
        graph.add_arc(a, b, ArcData::new(1.0, true, true));

        let heads: Vec<_> = graph.arcs(a).iter().map(|arc| arc.head).collect();
        assert_eq!(heads, vec![c, b]);
        assert_eq!(graph.vertices().collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn min_arc_looks_at_both_endpoints() {
        let mut graph = DynamicGraph::with_vertices(2);
        graph.add_arc(0, 1, ArcData::new(5.0, true, false));
        graph.add_arc(1, 0, ArcData::shortcut(3.0, false, true, 7));
        graph.add_arc(1, 0, ArcData::new(1.0, true, false));

        let arc = graph.min_arc(0, 1).unwrap();
        assert_eq!(arc.weight, 3.0);
        assert_eq!(arc.contracted_through, Some(7));
        assert!(arc.forward);

        assert_eq!(graph.min_arc(1, 0).unwrap().weight, 1.0);
    }
}
