//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from file loading and graph construction errors.

use super::{ClockTime, StationId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A trip that would have to run past midnight
    #[error("trip arrives at {arrival} before it departs at {departure}")]
    ArrivesBeforeDeparture {
        departure: ClockTime,
        arrival: ClockTime,
    },

    /// Route has no segments
    #[error("route must have at least one segment")]
    EmptyRoute,

    /// First segment does not leave from the departing vertex's station
    #[error("route departs from station {departure} but its first trip leaves {first}")]
    RouteStartsElsewhere { departure: StationId, first: StationId },

    /// Consecutive segments don't share a station
    #[error("segment ends at station {0} but the next one leaves station {1}")]
    DisconnectedSegments(StationId, StationId),

    /// Every segment starts and ends at the same station
    #[error("route never leaves station {0}")]
    NeverLeavesStation(StationId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::ArrivesBeforeDeparture {
            departure: ClockTime::from_hhmm(2330).unwrap(),
            arrival: ClockTime::from_hhmm(15).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "trip arrives at 00:15 before it departs at 23:30"
        );

        let err = DomainError::EmptyRoute;
        assert_eq!(err.to_string(), "route must have at least one segment");

        let a = StationId::new(1).unwrap();
        let b = StationId::new(2).unwrap();
        let err = DomainError::DisconnectedSegments(a, b);
        assert_eq!(
            err.to_string(),
            "segment ends at station 1 but the next one leaves station 2"
        );

        let err = DomainError::RouteStartsElsewhere {
            departure: a,
            first: b,
        };
        assert_eq!(
            err.to_string(),
            "route departs from station 1 but its first trip leaves 2"
        );

        let err = DomainError::NeverLeavesStation(a);
        assert_eq!(err.to_string(), "route never leaves station 1");
    }
}
