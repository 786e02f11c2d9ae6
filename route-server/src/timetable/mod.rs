//! Timetable records and the plain-text files they are loaded from.
//!
//! Two files make up a timetable: a stations file (`<id> <name...>` per
//! line) and a trips file (`<origin> <destination> <departure> <arrival>`
//! per line, times in `HHMM`). Loading validates every line and fails as a
//! whole on the first malformed one.

mod error;
mod names;
mod parse;

use std::path::Path;

use tracing::debug;

use crate::domain::{StationId, Trip};

pub use error::{RecordKind, TimetableError};
pub use names::{StationMatch, StationNames};
pub use parse::{parse_stations, parse_trips};

/// One row of the stations file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationRecord {
    pub id: StationId,
    pub name: String,
}

/// Validated station and trip records, in file order.
#[derive(Debug, Clone, Default)]
pub struct Timetable {
    stations: Vec<StationRecord>,
    trips: Vec<Trip>,
}

impl Timetable {
    /// Create a timetable from records already in memory.
    pub fn new(stations: Vec<StationRecord>, trips: Vec<Trip>) -> Self {
        Self { stations, trips }
    }

    /// Parse a timetable from the text of its two files.
    pub fn parse(stations_text: &str, trips_text: &str) -> Result<Self, TimetableError> {
        let stations = parse_stations(stations_text)?;
        let trips = parse_trips(trips_text)?;
        Ok(Self { stations, trips })
    }

    /// Read and parse the two timetable files.
    pub fn load(stations_path: &Path, trips_path: &Path) -> Result<Self, TimetableError> {
        let stations_text = read(stations_path)?;
        let trips_text = read(trips_path)?;
        let timetable = Self::parse(&stations_text, &trips_text)?;

        debug!(
            stations = timetable.stations.len(),
            trips = timetable.trips.len(),
            "Loaded timetable"
        );

        Ok(timetable)
    }

    pub fn stations(&self) -> &[StationRecord] {
        &self.stations
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    /// Station IDs in file order.
    pub fn station_ids(&self) -> Vec<StationId> {
        self.stations.iter().map(|s| s.id).collect()
    }

    /// Build the ID/name lookup for these stations.
    pub fn names(&self) -> StationNames {
        StationNames::from_records(&self.stations)
    }
}

fn read(path: &Path) -> Result<String, TimetableError> {
    std::fs::read_to_string(path).map_err(|source| TimetableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const STATIONS: &str = "1 Alpha\n2 Beta\n3 Gamma\n";
    const TRIPS: &str = "1 2 0800 0830\n2 3 0900 0930\n1 3 0800 1000\n";

    #[test]
    fn parse_both_files() {
        let timetable = Timetable::parse(STATIONS, TRIPS).unwrap();
        assert_eq!(timetable.stations().len(), 3);
        assert_eq!(timetable.trips().len(), 3);
        assert_eq!(
            timetable.station_ids(),
            vec![
                StationId::new(1).unwrap(),
                StationId::new(2).unwrap(),
                StationId::new(3).unwrap()
            ]
        );
    }

    #[test]
    fn load_from_disk() {
        let dir = tempdir().unwrap();
        let stations_path = dir.path().join("stations.dat");
        let trips_path = dir.path().join("trains.dat");
        fs::write(&stations_path, STATIONS).unwrap();
        fs::write(&trips_path, TRIPS).unwrap();

        let timetable = Timetable::load(&stations_path, &trips_path).unwrap();
        assert_eq!(timetable.trips().len(), 3);
        assert_eq!(
            timetable.names().name(StationId::new(2).unwrap()),
            Some("Beta")
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let stations_path = dir.path().join("stations.dat");
        fs::write(&stations_path, STATIONS).unwrap();

        let err = Timetable::load(&stations_path, &dir.path().join("missing.dat")).unwrap_err();
        assert!(matches!(err, TimetableError::Io { .. }));
        assert!(err.to_string().contains("missing.dat"));
    }

    #[test]
    fn malformed_trip_fails_whole_load() {
        let err = Timetable::parse(STATIONS, "1 2 0800 0830\n2 3 nine 0930\n").unwrap_err();
        assert!(matches!(
            err,
            TimetableError::Malformed {
                file: RecordKind::Trip,
                line: 2,
                ..
            }
        ));
    }
}
