//! Line parsers for the station and trip files.
//!
//! Both formats are whitespace separated, one record per line. Blank lines
//! and lines starting with `#` are skipped. Line numbers in errors are
//! 1-based.

use crate::domain::{ClockTime, StationId, Trip};

use super::error::{RecordKind, TimetableError};
use super::StationRecord;

/// Parse a stations file: `<id> <name...>` per line.
pub fn parse_stations(text: &str) -> Result<Vec<StationRecord>, TimetableError> {
    records(text)
        .map(|(line, content)| {
            let (id, name) = match content.split_once(char::is_whitespace) {
                Some((id, name)) => (id, name.trim()),
                None => (content, ""),
            };
            let id = StationId::parse(id)
                .map_err(|e| TimetableError::malformed(RecordKind::Station, line, e.to_string()))?;
            Ok(StationRecord {
                id,
                name: name.to_string(),
            })
        })
        .collect()
}

/// Parse a trips file: `<origin> <destination> <departure> <arrival>` per line.
pub fn parse_trips(text: &str) -> Result<Vec<Trip>, TimetableError> {
    records(text)
        .map(|(line, content)| parse_trip(line, content))
        .collect()
}

fn parse_trip(line: usize, content: &str) -> Result<Trip, TimetableError> {
    let malformed = |reason: String| TimetableError::malformed(RecordKind::Trip, line, reason);

    let fields: Vec<&str> = content.split_whitespace().collect();
    let [origin, destination, departure, arrival] = fields.as_slice() else {
        return Err(malformed(format!(
            "expected 4 fields, found {}",
            fields.len()
        )));
    };

    let origin = StationId::parse(origin).map_err(|e| malformed(format!("origin: {e}")))?;
    let destination =
        StationId::parse(destination).map_err(|e| malformed(format!("destination: {e}")))?;
    let departure =
        ClockTime::parse(departure).map_err(|e| malformed(format!("departure: {e}")))?;
    let arrival = ClockTime::parse(arrival).map_err(|e| malformed(format!("arrival: {e}")))?;

    Trip::new(origin, destination, departure, arrival).map_err(|e| malformed(e.to_string()))
}

/// Numbered, trimmed lines that carry a record.
fn records(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}
