use serde::Serialize;

use crate::graph::{Graph, VertexId, Weight};

/// Anything that recorded a predecessor for each vertex it reached from a fixed source.
pub trait Predecessors {
    fn source(&self) -> VertexId;

    fn parent(&self, vertex: VertexId) -> Option<VertexId>;

    fn vertex_count(&self) -> usize;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path<C> {
    pub vertices: Vec<VertexId>,
    pub cost: C,
}

/// Walks `parent` links back from `destination`. Returns `None` unless the
/// walk ends at the source, so a partial path is never handed out.
pub fn reconstruct<P: Predecessors + ?Sized>(
    tree: &P,
    destination: VertexId,
) -> Option<Vec<VertexId>> {
    if destination >= tree.vertex_count() {
        return None;
    }

    let mut vertices = vec![destination];
    let mut current = destination;
    while let Some(parent) = tree.parent(current) {
        // a parent chain longer than the vertex count has a cycle in it
        if vertices.len() > tree.vertex_count() {
            return None;
        }
        vertices.push(parent);
        current = parent;
    }
    vertices.reverse();

    (vertices.first() == Some(&tree.source())).then_some(vertices)
}

/// Sum of the cheapest edge weights between consecutive vertices, or `None`
/// if two consecutive vertices are not adjacent.
pub fn path_weight(graph: &Graph, vertices: &[VertexId]) -> Option<Weight> {
    vertices
        .windows(2)
        .map(|pair| graph.weight(pair[0], pair[1]))
        .sum()
}
