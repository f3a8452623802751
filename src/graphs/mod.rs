use serde::{Deserialize, Serialize};

pub mod dynamic_graph;
pub mod graph_factory;

pub type VertexId = u32;
pub type Weight = f32;

/// Payload of a directed arc stored at its tail.
///
/// `forward` means the arc may be travelled from its tail to its head,
/// `backward` means the opposite. After contraction an arc may carry neither
/// flag; it then only records that tail and head are neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArcData {
    pub weight: Weight,
    pub forward: bool,
    pub backward: bool,
    /// The vertex whose contraction produced this arc, `None` for original
    /// arcs.
    pub contracted_through: Option<VertexId>,
}

impl ArcData {
    pub fn new(weight: Weight, forward: bool, backward: bool) -> ArcData {
        ArcData {
            weight,
            forward,
            backward,
            contracted_through: None,
        }
    }

    pub fn shortcut(weight: Weight, forward: bool, backward: bool, via: VertexId) -> ArcData {
        ArcData {
            weight,
            forward,
            backward,
            contracted_through: Some(via),
        }
    }

    /// The same arc seen from its head.
    pub fn reversed(&self) -> ArcData {
        ArcData {
            weight: self.weight,
            forward: self.backward,
            backward: self.forward,
            contracted_through: self.contracted_through,
        }
    }

    pub fn is_shortcut(&self) -> bool {
        self.contracted_through.is_some()
    }

    pub fn is_traversable(&self) -> bool {
        self.forward || self.backward
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaillessArc {
    pub head: VertexId,
    pub data: ArcData,
}

impl TaillessArc {
    pub fn set_tail(&self, tail: VertexId) -> WeightedArc {
        WeightedArc {
            tail,
            head: self.head,
            data: self.data,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedArc {
    pub tail: VertexId,
    pub head: VertexId,
    pub data: ArcData,
}
