use std::collections::HashSet;

use itertools::Itertools;

use crate::{
    error::{NetworkError, Result},
    graph::{Edge, Graph, VertexId, Weight},
};

/// Union-find over `[0, n)` with path halving and union by size.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<VertexId>,
    size: Vec<usize>,
    sets: usize,
}

impl DisjointSet {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
            sets: n,
        }
    }

    pub fn find(&mut self, mut vertex: VertexId) -> VertexId {
        while self.parent[vertex] != vertex {
            self.parent[vertex] = self.parent[self.parent[vertex]];
            vertex = self.parent[vertex];
        }
        vertex
    }

    /// Merges the sets of `a` and `b`; `false` if they were already one set.
    pub fn union(&mut self, a: VertexId, b: VertexId) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        if self.size[a] < self.size[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[b] = a;
        self.size[a] += self.size[b];
        self.sets -= 1;
        true
    }

    pub fn sets(&self) -> usize {
        self.sets
    }
}

/// Minimum spanning forest of a graph plus the edges it does not need.
///
/// `tree` and `closable` partition the graph's edges by their sorted endpoint
/// pair: every original pair lands in exactly one of them.
#[derive(Debug, Clone)]
pub struct Backbone {
    pub tree: Vec<Edge>,
    pub closable: Vec<Edge>,
    pub total_weight: Weight,
    pub components: usize,
    vertex_count: usize,
}

impl Backbone {
    /// Kruskal's algorithm. Edges of equal weight are taken in insertion order.
    /// Never fails; a disconnected graph yields a forest.
    pub fn forest(graph: &Graph) -> Self {
        let n = graph.vertex_count();
        let mut components = DisjointSet::new(n);
        let mut tree: Vec<Edge> = Vec::with_capacity(n.saturating_sub(1));

        let by_weight = graph
            .edges()
            .iter()
            .sorted_by(|a, b| a.weight.total_cmp(&b.weight));

        for edge in by_weight {
            if tree.len() + 1 >= n.max(1) {
                break;
            }
            if components.union(edge.tail, edge.head) {
                tree.push(*edge);
            }
        }

        let in_tree: HashSet<(VertexId, VertexId)> = tree.iter().map(Edge::canonical).collect();
        let closable = graph
            .edges()
            .iter()
            .filter(|edge| !in_tree.contains(&edge.canonical()))
            .unique_by(|edge| edge.canonical())
            .copied()
            .collect_vec();

        let total_weight: Weight = tree.iter().map(|edge| edge.weight).sum();

        tracing::debug!(
            tree_edges = tree.len(),
            closable = closable.len(),
            components = components.sets(),
            total_weight,
            "computed backbone"
        );

        Self {
            tree,
            closable,
            total_weight,
            components: components.sets(),
            vertex_count: n,
        }
    }

    /// Like [`Backbone::forest`], but a disconnected graph is an error.
    pub fn spanning_tree(graph: &Graph) -> Result<Self> {
        let backbone = Self::forest(graph);
        if backbone.is_spanning() {
            Ok(backbone)
        } else {
            Err(NetworkError::PartiallyConnected {
                components: backbone.components,
                tree_edges: backbone.tree.len(),
                vertex_count: backbone.vertex_count,
            })
        }
    }

    pub fn is_spanning(&self) -> bool {
        self.components <= 1
    }
}
