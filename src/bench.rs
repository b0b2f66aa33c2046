//! Random networks and a small timing harness for the planning algorithms.

use std::time::Instant;

use rand::Rng;
use serde::Serialize;

use crate::{
    backbone::Backbone,
    error::Result,
    graph::{Graph, Weight},
    network::StationIndex,
    traversal::{bfs, dijkstra},
};

pub const DEFAULT_SIZES: [usize; 6] = [100, 200, 400, 600, 800, 1000];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Dijkstra,
    Bfs,
    Kruskal,
    Lookup,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub size: usize,
    pub avg_secs: f64,
}

/// A chain `0 - 1 - ... - n-1` keeps the network connected; every other pair
/// `(i, j)` with `j >= i + 2` is added with probability `p`.
///
/// # Panics
/// Panics if `p` is outside `[0, 1]` or `min_weight > max_weight`.
pub fn random_weighted_network<R: Rng>(
    n: usize,
    p: f64,
    min_weight: u32,
    max_weight: u32,
    rng: &mut R,
) -> Result<Graph> {
    let mut graph = Graph::new(n, false, true);

    for i in 1..n {
        let w = Weight::from(rng.gen_range(min_weight..=max_weight));
        graph.insert_edge(i - 1, i, w)?;
    }
    for i in 0..n {
        for j in i + 2..n {
            if rng.gen_bool(p) {
                let w = Weight::from(rng.gen_range(min_weight..=max_weight));
                graph.insert_edge(i, j, w)?;
            }
        }
    }

    Ok(graph)
}

/// Every pair of stations is connected with probability `p`.
///
/// # Panics
/// Panics if `p` is outside `[0, 1]`.
pub fn random_unweighted_network<R: Rng>(n: usize, p: f64, rng: &mut R) -> Result<Graph> {
    let mut graph = Graph::new(n, false, false);
    for i in 0..n {
        for j in i + 1..n {
            if rng.gen_bool(p) {
                graph.insert_edge(i, j, 1.0)?;
            }
        }
    }
    Ok(graph)
}

fn average(total_secs: f64, runs: usize) -> f64 {
    if runs == 0 {
        0.0
    } else {
        total_secs / runs as f64
    }
}

fn measure_size<R: Rng>(kind: Kind, n: usize, trials: usize, rng: &mut R) -> Result<f64> {
    match kind {
        Kind::Dijkstra | Kind::Bfs => {
            let graph = match kind {
                Kind::Dijkstra => random_weighted_network(n, 0.03, 1, 10, rng)?,
                _ => random_unweighted_network(n, 0.3, rng)?,
            };

            let mut total = 0.0;
            let mut runs = 0;
            for _ in 0..trials {
                let source = rng.gen_range(0..n);
                let target = rng.gen_range(0..n);
                if source == target {
                    continue;
                }

                let start = Instant::now();
                let found = match kind {
                    Kind::Dijkstra => dijkstra(&graph, source)?.path(target).is_some(),
                    _ => bfs(&graph, source)?.path(target).is_some(),
                };
                let elapsed = start.elapsed().as_secs_f64();

                if found {
                    total += elapsed;
                    runs += 1;
                }
            }
            Ok(average(total, runs))
        }
        Kind::Kruskal => {
            let graph = random_weighted_network(n, 0.015, 1, 14, rng)?;

            let start = Instant::now();
            for _ in 0..trials {
                Backbone::forest(&graph);
            }
            Ok(average(start.elapsed().as_secs_f64(), trials))
        }
        Kind::Lookup => {
            let index = StationIndex::from_names((0..n).map(|i| format!("station-{i}")));
            let queries: Vec<String> = (0..trials)
                .map(|_| format!("station-{}", rng.gen_range(0..=n + n / 5)))
                .collect();

            let start = Instant::now();
            let hits = queries.iter().filter(|q| index.contains(q.as_str())).count();
            let elapsed = start.elapsed().as_secs_f64();

            tracing::trace!(hits, queries = queries.len(), "lookup run");
            Ok(average(elapsed, queries.len()))
        }
    }
}

/// Average seconds per operation for each network size.
pub fn measure<R: Rng>(
    kind: Kind,
    sizes: &[usize],
    trials: usize,
    rng: &mut R,
) -> Result<Vec<Sample>> {
    sizes
        .iter()
        .filter(|&&n| n > 0)
        .map(|&size| -> Result<Sample> {
            let avg_secs = measure_size(kind, size, trials, rng)?;
            tracing::debug!(?kind, size, avg_secs, "measured");
            Ok(Sample { size, avg_secs })
        })
        .collect()
}
