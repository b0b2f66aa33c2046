use thiserror::Error;

use crate::graph::VertexId;

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("No usable connections left after normalizing the dataset")]
    EmptyDataset,

    #[error("Vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    OutOfRange {
        vertex: VertexId,
        vertex_count: usize,
    },

    #[error("No such station {name:?}")]
    UnknownStation { name: String },

    #[error("No route from {from:?} to {to:?}")]
    NotFound { from: String, to: String },

    #[error(
        "The network splits into {components} components, the backbone only has {tree_edges} of {} edges",
        .vertex_count.saturating_sub(1)
    )]
    PartiallyConnected {
        components: usize,
        tree_edges: usize,
        vertex_count: usize,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NetworkError>;
