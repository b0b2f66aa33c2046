use std::{
    cmp::Ordering,
    collections::{BinaryHeap, VecDeque},
};

use crate::{
    error::Result,
    graph::{Graph, VertexId, Weight},
    path::{reconstruct, Path, Predecessors},
};

#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueItem {
    distance: Weight,
    vertex: VertexId,
}

impl Eq for QueueItem {}

// reversed so that BinaryHeap pops the smallest distance first
impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        other.distance.total_cmp(&self.distance)
    }
}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a single-source Dijkstra run.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    pub source: VertexId,
    /// `f64::INFINITY` for unreachable vertices.
    pub dist: Vec<Weight>,
    pub parent: Vec<Option<VertexId>>,
}

impl ShortestPaths {
    pub fn is_reachable(&self, vertex: VertexId) -> bool {
        self.dist.get(vertex).is_some_and(|d| d.is_finite())
    }

    pub fn path(&self, destination: VertexId) -> Option<Path<Weight>> {
        let vertices = reconstruct(self, destination)?;
        Some(Path {
            vertices,
            cost: self.dist[destination],
        })
    }
}

impl Predecessors for ShortestPaths {
    fn source(&self) -> VertexId {
        self.source
    }

    fn parent(&self, vertex: VertexId) -> Option<VertexId> {
        self.parent[vertex]
    }

    fn vertex_count(&self) -> usize {
        self.parent.len()
    }
}

/// Result of a breadth-first search; distances count edges.
#[derive(Debug, Clone)]
pub struct Layers {
    pub source: VertexId,
    pub hops: Vec<Option<usize>>,
    pub parent: Vec<Option<VertexId>>,
}

impl Layers {
    pub fn path(&self, destination: VertexId) -> Option<Path<usize>> {
        let vertices = reconstruct(self, destination)?;
        let cost = vertices.len() - 1;
        Some(Path { vertices, cost })
    }
}

impl Predecessors for Layers {
    fn source(&self) -> VertexId {
        self.source
    }

    fn parent(&self, vertex: VertexId) -> Option<VertexId> {
        self.parent[vertex]
    }

    fn vertex_count(&self) -> usize {
        self.parent.len()
    }
}

/// Single-source shortest paths by weight. All weights must be non-negative.
pub fn dijkstra(graph: &Graph, source: VertexId) -> Result<ShortestPaths> {
    graph.check_vertex(source)?;

    let n = graph.vertex_count();
    let mut dist = vec![Weight::INFINITY; n];
    let mut parent = vec![None; n];
    let mut settled = vec![false; n];
    let mut queue = BinaryHeap::new();

    dist[source] = 0.0;
    queue.push(QueueItem {
        distance: 0.0,
        vertex: source,
    });

    while let Some(QueueItem { distance, vertex }) = queue.pop() {
        if settled[vertex] {
            continue;
        }
        settled[vertex] = true;

        for edge in graph.out_edges(vertex) {
            let candidate = distance + edge.weight;
            if candidate < dist[edge.head] {
                dist[edge.head] = candidate;
                parent[edge.head] = Some(vertex);
                queue.push(QueueItem {
                    distance: candidate,
                    vertex: edge.head,
                });
            }
        }
    }

    tracing::trace!(
        source,
        reached = settled.iter().filter(|&&s| s).count(),
        "dijkstra finished"
    );

    Ok(ShortestPaths {
        source,
        dist,
        parent,
    })
}

/// Breadth-first search to exhaustion, so `hops` is exact for every vertex.
pub fn bfs(graph: &Graph, source: VertexId) -> Result<Layers> {
    graph.check_vertex(source)?;

    let n = graph.vertex_count();
    let mut hops = vec![None; n];
    let mut parent = vec![None; n];
    let mut queue = VecDeque::from([source]);

    hops[source] = Some(0);

    while let Some(vertex) = queue.pop_front() {
        let next = hops[vertex].map(|h| h + 1);
        for edge in graph.out_edges(vertex) {
            if hops[edge.head].is_none() {
                hops[edge.head] = next;
                parent[edge.head] = Some(vertex);
                queue.push_back(edge.head);
            }
        }
    }

    tracing::trace!(
        source,
        reached = hops.iter().flatten().count(),
        "bfs finished"
    );

    Ok(Layers {
        source,
        hops,
        parent,
    })
}
