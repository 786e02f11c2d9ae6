//! Station name lookup.

use std::collections::HashMap;

use crate::domain::StationId;

use super::StationRecord;

/// A station whose name matched a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationMatch {
    pub id: StationId,
    pub name: String,
}

/// Station ID ↔ name mapping.
///
/// Name lookups ignore case and surrounding whitespace.
#[derive(Debug, Clone, Default)]
pub struct StationNames {
    names: HashMap<StationId, String>,
    ids: HashMap<String, StationId>,
}

impl StationNames {
    /// Build the lookup from station records.
    ///
    /// If two stations share a name, lookup by name returns the first one.
    pub fn from_records(records: &[StationRecord]) -> Self {
        let mut names = HashMap::with_capacity(records.len());
        let mut ids = HashMap::with_capacity(records.len());

        for record in records {
            names.insert(record.id, record.name.clone());
            if !record.name.is_empty() {
                ids.entry(normalize(&record.name)).or_insert(record.id);
            }
        }

        Self { names, ids }
    }

    /// Look up a station name by ID. Unnamed stations give `None`.
    pub fn name(&self, id: StationId) -> Option<&str> {
        self.names
            .get(&id)
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }

    /// Look up a station ID by exact name.
    pub fn find(&self, name: &str) -> Option<StationId> {
        self.ids.get(&normalize(name)).copied()
    }

    /// Stations whose name contains `query`, ordered by ID.
    pub fn search(&self, query: &str, limit: usize) -> Vec<StationMatch> {
        let needle = normalize(query);
        if needle.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<StationMatch> = self
            .names
            .iter()
            .filter(|(_, name)| normalize(name).contains(&needle))
            .map(|(id, name)| StationMatch {
                id: *id,
                name: name.clone(),
            })
            .collect();

        matches.sort_by_key(|m| m.id);
        matches.truncate(limit);
        matches
    }

    /// Get the number of stations in the lookup.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the lookup is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str) -> StationRecord {
        StationRecord {
            id: StationId::new(id).unwrap(),
            name: name.to_string(),
        }
    }

    fn names() -> StationNames {
        StationNames::from_records(&[
            record(1, "Union Station"),
            record(2, "North Hills"),
            record(3, "Union Square"),
            record(4, ""),
        ])
    }

    #[test]
    fn name_by_id() {
        let names = names();
        assert_eq!(names.name(StationId::new(2).unwrap()), Some("North Hills"));
        assert_eq!(names.name(StationId::new(9).unwrap()), None);
        assert_eq!(names.name(StationId::new(4).unwrap()), None);
        assert_eq!(names.len(), 4);
        assert!(!names.is_empty());
    }

    #[test]
    fn find_ignores_case_and_whitespace() {
        let names = names();
        assert_eq!(names.find("north hills"), StationId::new(2).ok());
        assert_eq!(names.find("  UNION STATION "), StationId::new(1).ok());
        assert_eq!(names.find("Union"), None);
        assert_eq!(names.find(""), None);
    }

    #[test]
    fn duplicate_names_keep_first() {
        let names = StationNames::from_records(&[record(1, "Central"), record(2, "central")]);
        assert_eq!(names.find("Central"), StationId::new(1).ok());
    }

    #[test]
    fn search_by_substring() {
        let names = names();
        let found = names.search("union", 10);
        let ids: Vec<u32> = found.iter().map(|m| m.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);

        assert_eq!(names.search("union", 1).len(), 1);
        assert!(names.search("   ", 10).is_empty());
        assert!(names.search("nowhere", 10).is_empty());
    }
}
