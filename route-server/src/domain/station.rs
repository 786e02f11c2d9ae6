//! Station identifiers and per-station trip lists.

use std::fmt;
use std::num::NonZeroU32;

use super::Trip;

/// Error returned when a value is not a usable station ID.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station ID: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A 1-based station identifier.
///
/// IDs of zero or below cannot be constructed, so the "invalid station"
/// case only ever shows up as a failed lookup.
///
/// # Examples
///
/// ```
/// use route_server::domain::StationId;
///
/// let id = StationId::new(3).unwrap();
/// assert_eq!(id.get(), 3);
/// assert_eq!(id.index(), 2);
///
/// assert!(StationId::new(0).is_err());
/// assert!(StationId::new(-1).is_err());
/// assert!(StationId::parse("x").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(NonZeroU32);

impl StationId {
    /// Create a station ID from a signed integer.
    pub fn new(value: i64) -> Result<Self, InvalidStationId> {
        if value <= 0 {
            return Err(InvalidStationId {
                reason: "must be 1 or greater",
            });
        }
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(InvalidStationId {
                reason: "out of range",
            })
    }

    /// Parse a station ID from decimal text.
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        let value: i64 = s.trim().parse().map_err(|_| InvalidStationId {
            reason: "must be an integer",
        })?;
        Self::new(value)
    }

    /// Returns the numeric ID.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Returns the zero-based position of this station in ID order.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A station together with a list of trips.
///
/// In the departures view the trips leave this station; in the arrivals
/// view they terminate here. Used for schedule display, never for routing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    id: StationId,
    trips: Vec<Trip>,
}

impl Station {
    pub fn new(id: StationId, trips: Vec<Trip>) -> Self {
        Self { id, trips }
    }

    pub fn id(&self) -> StationId {
        self.id
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn trip_count(&self) -> usize {
        self.trips.len()
    }

    pub fn trip(&self, index: usize) -> Option<&Trip> {
        self.trips.get(index)
    }
}
