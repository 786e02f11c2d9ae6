//! Graph construction error types.

use crate::domain::StationId;

/// Errors that abort graph construction.
///
/// Nothing is built when any of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// Station table lists the same ID twice
    #[error("station {0} is listed more than once")]
    DuplicateStation(StationId),

    /// Station IDs must be exactly 1..=n
    #[error("station {id} is outside 1..={count}: station IDs must be contiguous")]
    StationOutOfRange { id: StationId, count: usize },

    /// A trip refers to a station missing from the station table
    #[error("trip {trip} refers to unknown station {station}")]
    UnknownStation { trip: usize, station: StationId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let id = StationId::new(4).unwrap();

        let err = GraphError::DuplicateStation(id);
        assert_eq!(err.to_string(), "station 4 is listed more than once");

        let err = GraphError::StationOutOfRange { id, count: 3 };
        assert_eq!(
            err.to_string(),
            "station 4 is outside 1..=3: station IDs must be contiguous"
        );

        let err = GraphError::UnknownStation {
            trip: 7,
            station: id,
        };
        assert_eq!(err.to_string(), "trip 7 refers to unknown station 4");
    }
}
