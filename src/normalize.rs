//! Turns raw connection rows into a deduplicated, undirected edge list.
//!
//! The cleaning policy is lenient on purpose: rows with a blank or `nan`
//! station, a missing or non-numeric travel time, a negative time, or the
//! same station on both ends are dropped silently instead of failing the
//! whole load. Only an empty result is an error.

use std::collections::{hash_map::Entry, HashMap};

use serde::Serialize;

use crate::{
    error::{NetworkError, Result},
    graph::Weight,
    records::RawConnection,
};

/// A cleaned connection. `from <= to` holds for every value produced by [`normalize`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub from: String,
    pub to: String,
    pub minutes: Weight,
}

fn station_name(raw: Option<&str>) -> Option<&str> {
    let name = raw?.trim();
    (!name.is_empty() && !name.eq_ignore_ascii_case("nan")).then_some(name)
}

fn clean(row: &RawConnection) -> Option<(String, String, Weight)> {
    let a = station_name(row.station_a.as_deref())?;
    let b = station_name(row.station_b.as_deref())?;
    let minutes = row.minutes.filter(|m| m.is_finite() && *m >= 0.0)?;

    match a.cmp(b) {
        std::cmp::Ordering::Less => Some((a.to_owned(), b.to_owned(), minutes)),
        std::cmp::Ordering::Greater => Some((b.to_owned(), a.to_owned(), minutes)),
        std::cmp::Ordering::Equal => None,
    }
}

/// Keeps one connection per unordered station pair, with the smallest travel
/// time seen for it. Pairs come out in the order they first appeared.
pub fn normalize<'a, I>(rows: I) -> Result<Vec<Connection>>
where
    I: IntoIterator<Item = &'a RawConnection>,
{
    let mut position: HashMap<(String, String), usize> = HashMap::new();
    let mut connections: Vec<Connection> = Vec::new();
    let mut dropped = 0usize;

    for row in rows {
        let Some((from, to, minutes)) = clean(row) else {
            dropped += 1;
            continue;
        };

        match position.entry((from, to)) {
            Entry::Occupied(entry) => {
                let kept = &mut connections[*entry.get()];
                if minutes < kept.minutes {
                    kept.minutes = minutes;
                }
            }
            Entry::Vacant(entry) => {
                let (from, to) = entry.key().clone();
                entry.insert(connections.len());
                connections.push(Connection { from, to, minutes });
            }
        }
    }

    tracing::debug!(
        kept = connections.len(),
        dropped,
        "normalized connections"
    );

    if connections.is_empty() {
        return Err(NetworkError::EmptyDataset);
    }

    Ok(connections)
}
