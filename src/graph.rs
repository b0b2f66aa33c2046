use serde::Serialize;

use crate::error::{NetworkError, Result};

pub type VertexId = usize;

/// Travel time in minutes.
pub type Weight = f64;

/// Weight stored for every edge of an unweighted graph.
pub const UNIT_WEIGHT: Weight = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub tail: VertexId,
    pub head: VertexId,
    pub weight: Weight,
}

impl Edge {
    pub fn new(tail: VertexId, head: VertexId, weight: Weight) -> Self {
        Self { tail, head, weight }
    }

    /// Identity of the edge when direction is ignored: the endpoints sorted by index.
    pub fn canonical(&self) -> (VertexId, VertexId) {
        if self.tail <= self.head {
            (self.tail, self.head)
        } else {
            (self.head, self.tail)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjacency {
    pub head: VertexId,
    pub weight: Weight,
}

/// Adjacency-list graph over the dense vertex range `[0, vertex_count)`.
///
/// The store does not deduplicate; callers that care use [`Graph::has_edge`]
/// before inserting. Besides the adjacency lists the graph remembers every
/// inserted edge in insertion order, which is what [`Graph::edges`] yields.
#[derive(Debug, Clone)]
pub struct Graph {
    directed: bool,
    weighted: bool,
    adjacency: Vec<Vec<Adjacency>>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(vertex_count: usize, directed: bool, weighted: bool) -> Self {
        Self {
            directed,
            weighted,
            adjacency: vec![Vec::new(); vertex_count],
            edges: Vec::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of inserted edges; an undirected edge counts once.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn check_vertex(&self, vertex: VertexId) -> Result<()> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(NetworkError::OutOfRange {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }

    /// Adds `tail -> head`, and `head -> tail` as well when undirected.
    /// The weight is replaced by [`UNIT_WEIGHT`] on unweighted graphs.
    pub fn insert_edge(&mut self, tail: VertexId, head: VertexId, weight: Weight) -> Result<()> {
        self.check_vertex(tail)?;
        self.check_vertex(head)?;

        let weight = if self.weighted { weight } else { UNIT_WEIGHT };

        self.adjacency[tail].push(Adjacency { head, weight });
        if !self.directed && tail != head {
            self.adjacency[head].push(Adjacency { head: tail, weight });
        }
        self.edges.push(Edge::new(tail, head, weight));

        Ok(())
    }

    pub fn has_edge(&self, tail: VertexId, head: VertexId) -> Result<bool> {
        self.check_vertex(tail)?;
        self.check_vertex(head)?;

        Ok(self.adjacency[tail].iter().any(|entry| entry.head == head))
    }

    /// Outgoing adjacency entries of `vertex`.
    ///
    /// # Panics
    /// Panics if `vertex` is out of range; validate with [`Graph::check_vertex`] first.
    pub fn out_edges(&self, vertex: VertexId) -> &[Adjacency] {
        &self.adjacency[vertex]
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn weight(&self, tail: VertexId, head: VertexId) -> Option<Weight> {
        self.adjacency
            .get(tail)?
            .iter()
            .filter(|entry| entry.head == head)
            .map(|entry| entry.weight)
            .min_by(|a, b| a.total_cmp(b))
    }
}
