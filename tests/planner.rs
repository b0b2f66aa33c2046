use std::{collections::HashSet, io::Write};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tube::{
    backbone::Backbone,
    bench::random_weighted_network,
    graph::{Edge, Graph},
    path::path_weight,
    records::{load_connections, RawConnection},
    traversal::{bfs, dijkstra},
    NetworkError, StationNetwork,
};

fn network(edges: &[(&str, &str, f64)]) -> StationNetwork {
    let rows: Vec<RawConnection> = edges.iter().copied().map(RawConnection::from).collect();
    StationNetwork::from_rows(&rows).unwrap()
}

fn get_line_network() -> StationNetwork {
    network(&[
        ("A", "B", 1.0),
        ("B", "C", 1.0),
        ("C", "D", 1.0),
        ("D", "E", 1.0),
    ])
}

fn get_weighted_network() -> StationNetwork {
    network(&[
        ("A", "B", 4.0),
        ("A", "C", 2.0),
        ("B", "C", 5.0),
        ("B", "D", 10.0),
        ("C", "D", 3.0),
        ("C", "E", 8.0),
        ("D", "E", 7.0),
    ])
}

fn pair(a: &str, b: &str) -> (String, String) {
    (a.to_owned(), b.to_owned())
}

#[test]
fn fewest_stops_along_a_line() {
    let journey = get_line_network().fewest_stops("A", "E").unwrap();

    assert_eq!(journey.stations, ["A", "B", "C", "D", "E"]);
    assert_eq!(journey.cost, 4);
}

#[test]
fn journey_to_the_same_station() {
    let network = get_weighted_network();

    for station in ["A", "C", "E"] {
        let journey = network.shortest_path(station, station).unwrap();
        assert_eq!(journey.stations, [station]);
        assert_eq!(journey.cost, 0.0);
    }
}

#[test]
fn core_backbone_of_the_weighted_example() {
    let backbone = get_weighted_network().core_backbone().unwrap();

    let tree: HashSet<_> = backbone
        .tree
        .iter()
        .map(|link| (link.from.clone(), link.to.clone(), link.minutes as u32))
        .collect();
    let expected: HashSet<_> = [("A", "C", 2), ("C", "D", 3), ("A", "B", 4), ("D", "E", 7)]
        .into_iter()
        .map(|(a, b, w)| (a.to_owned(), b.to_owned(), w))
        .collect();
    assert_eq!(tree, expected);
    assert_eq!(backbone.total_weight, 16.0);

    let closable: HashSet<_> = backbone.closable.into_iter().collect();
    let expected: HashSet<_> = [pair("B", "C"), pair("B", "D"), pair("C", "E")]
        .into_iter()
        .collect();
    assert_eq!(closable, expected);
}

#[test]
fn disconnected_stations_have_no_route() {
    let network = network(&[("A", "B", 1.0), ("C", "D", 1.0)]);

    assert!(matches!(
        network.shortest_path("A", "C"),
        Err(NetworkError::NotFound { from, to }) if from == "A" && to == "C"
    ));
    assert!(matches!(
        network.fewest_stops("D", "B"),
        Err(NetworkError::NotFound { .. })
    ));
}

#[test]
fn backbone_partitions_the_original_connections() {
    let mut rng = StdRng::seed_from_u64(3);

    for n in [2, 10, 60] {
        let graph = random_weighted_network(n, 0.2, 1, 9, &mut rng).unwrap();
        let backbone = Backbone::spanning_tree(&graph).unwrap();

        let original: HashSet<_> = graph.edges().iter().map(Edge::canonical).collect();
        let tree: HashSet<_> = backbone.tree.iter().map(Edge::canonical).collect();
        let closable: HashSet<_> = backbone.closable.iter().map(Edge::canonical).collect();

        assert_eq!(tree.len(), n - 1);
        assert!(tree.is_disjoint(&closable));
        assert_eq!(&tree | &closable, original);
    }
}

#[test]
fn forest_partitions_parallel_and_disconnected_connections() {
    let mut graph = Graph::new(6, false, true);
    for (u, v, w) in [
        (0, 1, 4.0),
        (1, 0, 2.0),
        (1, 2, 3.0),
        (0, 2, 1.0),
        (2, 0, 6.0),
        (3, 4, 5.0),
        (4, 3, 5.0),
        (4, 5, 1.0),
        (3, 5, 2.0),
    ] {
        graph.insert_edge(u, v, w).unwrap();
    }

    let forest = Backbone::forest(&graph);

    let original: HashSet<_> = graph.edges().iter().map(Edge::canonical).collect();
    let tree: HashSet<_> = forest.tree.iter().map(Edge::canonical).collect();
    let closable: HashSet<_> = forest.closable.iter().map(Edge::canonical).collect();

    assert_eq!(forest.components, 2);
    assert_eq!(forest.tree.len(), 4);
    assert_eq!(forest.closable.len(), closable.len());
    assert!(tree.is_disjoint(&closable));
    assert_eq!(&tree | &closable, original);
    assert_eq!(forest.total_weight, 6.0);
    assert!(matches!(
        Backbone::spanning_tree(&graph),
        Err(NetworkError::PartiallyConnected { components: 2, .. })
    ));
}

#[test]
fn bfs_layers_are_minimal_edge_counts() {
    let mut rng = StdRng::seed_from_u64(11);
    let graph = random_weighted_network(40, 0.08, 1, 20, &mut rng).unwrap();

    // all-pairs hop counts by repeated relaxation
    let n = graph.vertex_count();
    let mut hops = vec![vec![usize::MAX; n]; n];
    for (v, row) in hops.iter_mut().enumerate() {
        row[v] = 0;
    }
    for edge in graph.edges() {
        hops[edge.tail][edge.head] = 1;
        hops[edge.head][edge.tail] = 1;
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let via = hops[i][k].saturating_add(hops[k][j]);
                if via < hops[i][j] {
                    hops[i][j] = via;
                }
            }
        }
    }

    for source in [0, 7, 39] {
        let layers = bfs(&graph, source).unwrap();
        for target in 0..n {
            let path = layers.path(target).unwrap();
            assert_eq!(Some(path.cost), layers.hops[target]);
            assert_eq!(path.cost, hops[source][target]);
        }
    }
}

#[test]
fn reconstructed_paths_add_up_to_their_distance() {
    let mut rng = StdRng::seed_from_u64(5);
    let graph = random_weighted_network(80, 0.05, 1, 10, &mut rng).unwrap();

    for _ in 0..10 {
        let source = rng.gen_range(0..80);
        let paths = dijkstra(&graph, source).unwrap();
        for target in 0..80 {
            let path = paths.path(target).unwrap();
            assert_eq!(path.vertices.first(), Some(&source));
            assert_eq!(path.vertices.last(), Some(&target));
            assert_eq!(path_weight(&graph, &path.vertices), Some(paths.dist[target]));
        }
    }
}

#[test]
fn duplicate_connections_keep_the_fastest_time() {
    let network = network(&[
        ("Baker Street", "Bond Street", 3.0),
        ("Bond Street", "Baker Street", 2.0),
        ("Baker Street", "Bond Street", 4.0),
    ]);

    assert_eq!(network.connections().len(), 1);
    assert_eq!(network.connections()[0].minutes, 2.0);
    assert_eq!(
        network.shortest_path("Bond Street", "Baker Street").unwrap().cost,
        2.0
    );
}

#[test]
fn network_from_a_csv_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Line,Station from,Station to,Time").unwrap();
    writeln!(file, "Bakerloo,Oxford Circus,Piccadilly Circus,2").unwrap();
    writeln!(file, "Bakerloo,Piccadilly Circus,Charing Cross,2").unwrap();
    writeln!(file, "Northern,Charing Cross,Embankment,1").unwrap();
    writeln!(file, "Bakerloo,Embankment,Waterloo,2").unwrap();
    writeln!(file, "Bakerloo,Oxford Circus,Piccadilly Circus,3").unwrap();
    writeln!(file, "Victoria,Oxford Circus,,2").unwrap();
    writeln!(file, "Victoria,nan,Green Park,2").unwrap();
    writeln!(file, "Victoria,Green Park,Victoria,n/a").unwrap();
    writeln!(file, "Jubilee,Waterloo,Waterloo,0").unwrap();
    writeln!(file, "Jubilee,Waterloo,Southwark,1").unwrap();
    file.flush().unwrap();

    assert_eq!(load_connections(file.path()).unwrap().len(), 10);

    let network = StationNetwork::load(file.path()).unwrap();
    assert_eq!(network.stations().len(), 6);

    let journey = network.shortest_path("Oxford Circus", "Southwark").unwrap();
    assert_eq!(journey.cost, 8.0);
    assert_eq!(
        journey.stations,
        [
            "Oxford Circus",
            "Piccadilly Circus",
            "Charing Cross",
            "Embankment",
            "Waterloo",
            "Southwark"
        ]
    );

    assert!(matches!(
        network.fewest_stops("Oxford Circus", "Green Park"),
        Err(NetworkError::UnknownStation { .. })
    ));

    let backbone = network.core_backbone().unwrap();
    assert_eq!(backbone.tree.len(), 5);
    assert!(backbone.closable.is_empty());
}

#[test]
fn empty_dataset_is_an_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Line,From,To,Time").unwrap();
    writeln!(file, "Circle,nan,nan,").unwrap();
    file.flush().unwrap();

    assert!(matches!(
        StationNetwork::load(file.path()),
        Err(NetworkError::EmptyDataset)
    ));
}
