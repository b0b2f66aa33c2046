use std::{collections::HashSet, fmt};

use serde::Serialize;

use crate::network::StationIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Operational,
    NotOperational,
    NotFound,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Operational => "Operational",
            Status::NotOperational => "Not Operational",
            Status::NotFound => "Not Found",
        })
    }
}

/// Which stations exist and which of them are open. Lookups ignore case.
#[derive(Debug, Clone, Default)]
pub struct StationStatus {
    known: HashSet<String>,
    operational: HashSet<String>,
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

impl StationStatus {
    pub fn new<I, S>(known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            known: known.into_iter().map(|name| fold(name.as_ref())).collect(),
            operational: HashSet::new(),
        }
    }

    /// Every station of the index, all of them open.
    pub fn from_index(index: &StationIndex) -> Self {
        let mut status = Self::new(index.names());
        status.operational = status.known.clone();
        status
    }

    /// Marks a station as open, registering it as known if needed.
    pub fn open(&mut self, name: &str) {
        let name = fold(name);
        self.known.insert(name.clone());
        self.operational.insert(name);
    }

    pub fn close(&mut self, name: &str) -> bool {
        self.operational.remove(&fold(name))
    }

    /// Keeps only the listed stations open. Listed names that are not known
    /// stations are logged and returned.
    pub fn restrict_to<I, S>(&mut self, open: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unknown = Vec::new();
        let mut keep = HashSet::new();
        for name in open {
            let folded = fold(name.as_ref());
            if self.known.contains(&folded) {
                keep.insert(folded);
            } else {
                tracing::warn!(
                    station = name.as_ref(),
                    "operational station is not in the dataset"
                );
                unknown.push(name.as_ref().to_owned());
            }
        }
        self.operational.retain(|name| keep.contains(name));
        unknown
    }

    pub fn status(&self, name: &str) -> Status {
        let name = fold(name);
        if !self.known.contains(&name) {
            Status::NotFound
        } else if self.operational.contains(&name) {
            Status::Operational
        } else {
            Status::NotOperational
        }
    }

    pub fn known(&self) -> usize {
        self.known.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_way_status() {
        let mut status = StationStatus::new(["A", "B", "C", "D", "E"]);
        for name in ["A", "C", "E"] {
            status.open(name);
        }

        assert_eq!(status.status("A"), Status::Operational);
        assert_eq!(status.status("D"), Status::NotOperational);
        assert_eq!(status.status("Z"), Status::NotFound);
    }

    #[test]
    fn lookups_ignore_case_and_padding() {
        let index = StationIndex::from_names(["Victoria", "Paddington"]);
        let status = StationStatus::from_index(&index);

        assert_eq!(status.status(" victoria "), Status::Operational);
        assert_eq!(status.status("Paddinton"), Status::NotFound);
        assert_eq!(status.known(), 2);
    }

    #[test]
    fn restricting_closes_the_rest() {
        let index = StationIndex::from_names(["Angel", "Bank", "Oval"]);
        let mut status = StationStatus::from_index(&index);

        assert!(status.restrict_to(["bank"]).is_empty());
        assert_eq!(status.status("Bank"), Status::Operational);
        assert_eq!(status.status("Angel"), Status::NotOperational);

        assert!(status.close("BANK"));
        assert_eq!(status.status("Bank"), Status::NotOperational);
        assert_eq!(status.status("Oval").to_string(), "Not Operational");
    }

    #[test]
    fn restricting_to_unknown_names_reports_them() {
        let index = StationIndex::from_names(["Angel", "Bank"]);
        let mut status = StationStatus::from_index(&index);

        let unknown = status.restrict_to(["Angel", "Bnak"]);

        assert_eq!(unknown, vec!["Bnak".to_owned()]);
        assert_eq!(status.status("Angel"), Status::Operational);
        assert_eq!(status.status("Bank"), Status::NotOperational);
        assert_eq!(status.status("Bnak"), Status::NotFound);
    }
}
