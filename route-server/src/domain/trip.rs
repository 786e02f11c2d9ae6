//! Scheduled trips.

use super::{ClockTime, DomainError, StationId};

/// One scheduled leg between two stations.
///
/// A trip always arrives at or after its departure on the same day; the
/// constructor rejects anything else.
///
/// # Examples
///
/// ```
/// use route_server::domain::{ClockTime, StationId, Trip};
///
/// let trip = Trip::new(
///     StationId::new(1).unwrap(),
///     StationId::new(2).unwrap(),
///     ClockTime::from_hhmm(830).unwrap(),
///     ClockTime::from_hhmm(915).unwrap(),
/// )
/// .unwrap();
/// assert_eq!(trip.ride_minutes(), 45);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trip {
    origin: StationId,
    destination: StationId,
    departure: ClockTime,
    arrival: ClockTime,
}

impl Trip {
    /// Create a trip, rejecting arrivals before the departure.
    pub fn new(
        origin: StationId,
        destination: StationId,
        departure: ClockTime,
        arrival: ClockTime,
    ) -> Result<Self, DomainError> {
        if arrival < departure {
            return Err(DomainError::ArrivesBeforeDeparture { departure, arrival });
        }
        Ok(Self {
            origin,
            destination,
            departure,
            arrival,
        })
    }

    pub fn origin(&self) -> StationId {
        self.origin
    }

    pub fn destination(&self) -> StationId {
        self.destination
    }

    pub fn departure(&self) -> ClockTime {
        self.departure
    }

    pub fn arrival(&self) -> ClockTime {
        self.arrival
    }

    /// Minutes spent on board.
    pub fn ride_minutes(&self) -> u32 {
        // Arrival >= departure is checked at construction.
        self.departure.minutes_until(self.arrival).unwrap_or(0)
    }

    /// Minutes spent waiting at this trip's destination for `next` to leave.
    ///
    /// Returns `None` unless `next` leaves the destination strictly after
    /// this trip arrives.
    pub fn layover_before(&self, next: &Trip) -> Option<u32> {
        if next.origin != self.destination || next.departure <= self.arrival {
            return None;
        }
        self.arrival.minutes_until(next.departure)
    }
}
