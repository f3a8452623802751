use crate::graphs::{dynamic_graph::DynamicGraph, ArcData, VertexId};

/// Replaces every shortcut on `path_with_shortcuts` by the two arcs it was
/// built from, repeatedly, until only original arcs remain.
///
/// The vertex a shortcut was contracted through keeps its arcs to both
/// endpoints, so the lightest traversable arc of every consecutive pair is
/// looked up in the contracted graph itself.
pub fn replace_shortcuts(path_with_shortcuts: &mut Vec<VertexId>, graph: &DynamicGraph) {
    let mut path_without_shortcuts = Vec::new();

    while path_with_shortcuts.len() >= 2 {
        let Some(head) = path_with_shortcuts.pop() else {
            break;
        };
        let Some(&tail) = path_with_shortcuts.last() else {
            break;
        };

        match graph.min_arc(tail, head).and_then(|arc| arc.contracted_through) {
            Some(vertex) => {
                path_with_shortcuts.push(vertex);
                path_with_shortcuts.push(head);
            }
            None => path_without_shortcuts.push(head),
        }
    }
    path_without_shortcuts.extend(path_with_shortcuts.pop());
    path_without_shortcuts.reverse();

    *path_with_shortcuts = path_without_shortcuts;
}

/// The two arcs `tail -> via -> head` a shortcut `tail -> head` replaces.
pub fn unpack_shortcut(
    graph: &DynamicGraph,
    tail: VertexId,
    head: VertexId,
    shortcut: &ArcData,
) -> Option<(ArcData, ArcData)> {
    let via = shortcut.contracted_through?;
    Some((graph.min_arc(tail, via)?, graph.min_arc(via, head)?))
}
