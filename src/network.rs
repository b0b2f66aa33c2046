use std::{collections::HashMap, path::Path};

use itertools::Itertools;
use serde::Serialize;

use crate::{
    backbone::Backbone,
    error::{NetworkError, Result},
    graph::{Edge, Graph, VertexId, Weight},
    normalize::{normalize, Connection},
    records::{load_connections, RawConnection},
    traversal::{bfs, dijkstra},
};

/// Two-way mapping between station names and dense vertex indices.
/// Indices follow the sorted order of the names.
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    names: Vec<String>,
    ids: HashMap<String, VertexId>,
}

impl StationIndex {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(|name| -> String { name.into() })
            .sorted()
            .dedup()
            .collect_vec();
        let ids = names
            .iter()
            .enumerate()
            .map(|(id, name)| (name.clone(), id))
            .collect();

        Self { names, ids }
    }

    pub fn id(&self, name: &str) -> Result<VertexId> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| NetworkError::UnknownStation {
                name: name.to_owned(),
            })
    }

    pub fn name(&self, id: VertexId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journey<C> {
    pub stations: Vec<String>,
    pub cost: C,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub from: String,
    pub to: String,
    pub minutes: Weight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoreBackbone {
    pub tree: Vec<Link>,
    pub total_weight: Weight,
    pub closable: Vec<(String, String)>,
}

/// An undirected, weighted station network, built once and queried by name.
#[derive(Debug, Clone)]
pub struct StationNetwork {
    stations: StationIndex,
    connections: Vec<Connection>,
    graph: Graph,
}

impl StationNetwork {
    /// Builds from already cleaned connections. They are normalized again, so
    /// duplicate pairs keep their minimum time and self-pairs are dropped.
    pub fn from_connections(connections: Vec<Connection>) -> Result<Self> {
        let rows = connections.iter().map(RawConnection::from).collect_vec();
        Self::build(normalize(&rows)?)
    }

    fn build(connections: Vec<Connection>) -> Result<Self> {
        let stations = StationIndex::from_names(
            connections
                .iter()
                .flat_map(|c| [c.from.as_str(), c.to.as_str()]),
        );

        let mut graph = Graph::new(stations.len(), false, true);
        for connection in &connections {
            let from = stations.id(&connection.from)?;
            let to = stations.id(&connection.to)?;
            if from != to && !graph.has_edge(from, to)? {
                graph.insert_edge(from, to, connection.minutes)?;
            }
        }

        if graph.edge_count() == 0 {
            return Err(NetworkError::EmptyDataset);
        }

        tracing::debug!(
            stations = graph.vertex_count(),
            connections = graph.edge_count(),
            "built station network"
        );

        Ok(Self {
            stations,
            connections,
            graph,
        })
    }

    pub fn from_rows(rows: &[RawConnection]) -> Result<Self> {
        Self::build(normalize(rows)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_rows(&load_connections(path)?)
    }

    pub fn stations(&self) -> &StationIndex {
        &self.stations
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    fn endpoints(&self, from: &str, to: &str) -> Result<(VertexId, VertexId)> {
        Ok((self.stations.id(from)?, self.stations.id(to)?))
    }

    fn named(&self, vertices: &[VertexId]) -> Vec<String> {
        vertices
            .iter()
            .filter_map(|&id| self.stations.name(id))
            .map(str::to_owned)
            .collect()
    }

    fn link(&self, edge: &Edge) -> Link {
        let (tail, head) = edge.canonical();
        let name = |id: VertexId| self.stations.name(id).unwrap_or_default().to_owned();
        Link {
            from: name(tail),
            to: name(head),
            minutes: edge.weight,
        }
    }

    fn not_found(from: &str, to: &str) -> NetworkError {
        NetworkError::NotFound {
            from: from.to_owned(),
            to: to.to_owned(),
        }
    }

    /// Quickest journey by total travel time.
    #[tracing::instrument(skip(self))]
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<Journey<Weight>> {
        let (source, destination) = self.endpoints(from, to)?;

        let path = dijkstra(&self.graph, source)?
            .path(destination)
            .ok_or_else(|| Self::not_found(from, to))?;

        Ok(Journey {
            stations: self.named(&path.vertices),
            cost: path.cost,
        })
    }

    /// Journey passing the fewest connections, whatever their travel time.
    #[tracing::instrument(skip(self))]
    pub fn fewest_stops(&self, from: &str, to: &str) -> Result<Journey<usize>> {
        let (source, destination) = self.endpoints(from, to)?;

        let path = bfs(&self.graph, source)?
            .path(destination)
            .ok_or_else(|| Self::not_found(from, to))?;

        Ok(Journey {
            stations: self.named(&path.vertices),
            cost: path.cost,
        })
    }

    /// Minimum spanning tree of the network and the connections outside it.
    /// Fails with `PartiallyConnected` if the network is not connected.
    pub fn core_backbone(&self) -> Result<CoreBackbone> {
        Backbone::spanning_tree(&self.graph).map(|backbone| self.describe(&backbone))
    }

    /// Same as [`StationNetwork::core_backbone`], but accepts a spanning forest.
    pub fn backbone_forest(&self) -> CoreBackbone {
        self.describe(&Backbone::forest(&self.graph))
    }

    fn describe(&self, backbone: &Backbone) -> CoreBackbone {
        CoreBackbone {
            tree: backbone.tree.iter().map(|edge| self.link(edge)).collect(),
            total_weight: backbone.total_weight,
            closable: backbone
                .closable
                .iter()
                .map(|edge| {
                    let link = self.link(edge);
                    (link.from, link.to)
                })
                .collect(),
        }
    }
}
