use std::{fs::File, io::Read, path::Path};

use serde::Serialize;

use crate::{error::Result, normalize::Connection};

const STATION_A_COLUMN: usize = 1;
const STATION_B_COLUMN: usize = 2;
const MINUTES_COLUMN: usize = 3;

/// One row of the connections table, as read. Nothing is validated yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawConnection {
    pub station_a: Option<String>,
    pub station_b: Option<String>,
    pub minutes: Option<f64>,
}

impl RawConnection {
    pub fn new(station_a: &str, station_b: &str, minutes: f64) -> Self {
        Self {
            station_a: Some(station_a.to_owned()),
            station_b: Some(station_b.to_owned()),
            minutes: Some(minutes),
        }
    }
}

impl From<(&str, &str, f64)> for RawConnection {
    fn from(value: (&str, &str, f64)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<&Connection> for RawConnection {
    fn from(value: &Connection) -> Self {
        Self::new(&value.from, &value.to, value.minutes)
    }
}

fn field(record: &csv::StringRecord, column: usize) -> Option<String> {
    record
        .get(column)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Reads connections by column position: the header row is skipped and
/// column 0 (usually the line name) is ignored.
pub fn read_connections<R: Read>(reader: R) -> Result<Vec<RawConnection>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(RawConnection {
            station_a: field(&record, STATION_A_COLUMN),
            station_b: field(&record, STATION_B_COLUMN),
            minutes: field(&record, MINUTES_COLUMN).and_then(|value| value.parse().ok()),
        });
    }

    tracing::debug!(rows = rows.len(), "read connection rows");
    Ok(rows)
}

pub fn load_connections<P: AsRef<Path>>(path: P) -> Result<Vec<RawConnection>> {
    let file = File::open(path.as_ref())?;
    tracing::debug!(path = %path.as_ref().display(), "loading connections");
    read_connections(file)
}
