//! Route types.
//!
//! A `Route` is the answer to a routing query: the vertex the traveller
//! departs from and the connection edges actually taken, in order.

use chrono::Duration;

use super::{ClockTime, Connection, Departure, DomainError, StationId, Trip, Weighting};

/// A concrete itinerary.
///
/// Routes own copies of the departing vertex and of every edge, so they
/// stay valid independently of the graph they were built from.
///
/// # Invariants
///
/// - At least one segment
/// - The first segment rides a trip leaving the departing vertex's station
/// - Consecutive segments connect (destination of one = origin of next)
/// - At least one segment rides between two distinct stations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    departure: Departure,
    segments: Vec<Connection>,
}

impl Route {
    /// Constructs a route, validating its invariants.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the segment list is empty, does not form a
    /// connected itinerary starting at the departing vertex's station, or
    /// never moves between stations.
    pub fn new(departure: Departure, segments: Vec<Connection>) -> Result<Self, DomainError> {
        let first = segments.first().ok_or(DomainError::EmptyRoute)?;

        if first.trip.origin() != departure.station() {
            return Err(DomainError::RouteStartsElsewhere {
                departure: departure.station(),
                first: first.trip.origin(),
            });
        }

        for window in segments.windows(2) {
            let prev_dest = window[0].trip.destination();
            let next_origin = window[1].trip.origin();
            if prev_dest != next_origin {
                return Err(DomainError::DisconnectedSegments(prev_dest, next_origin));
            }
        }

        if segments
            .iter()
            .all(|c| c.trip.origin() == c.trip.destination())
        {
            return Err(DomainError::NeverLeavesStation(departure.station()));
        }

        Ok(Self {
            departure,
            segments,
        })
    }

    /// The vertex the route departs from.
    pub fn departure(&self) -> &Departure {
        &self.departure
    }

    /// All segments in order.
    pub fn segments(&self) -> &[Connection] {
        &self.segments
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the route is a single trip.
    pub fn is_direct(&self) -> bool {
        self.segments.len() == 1
    }

    /// Number of changes between trips.
    pub fn transfer_count(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    /// The trips ridden, in order.
    pub fn trips(&self) -> impl Iterator<Item = &Trip> {
        self.segments.iter().map(|c| &c.trip)
    }

    pub fn origin(&self) -> StationId {
        self.departure.station()
    }

    pub fn destination(&self) -> StationId {
        // Safe: validated non-empty at construction
        self.last_segment().trip.destination()
    }

    pub fn departure_time(&self) -> ClockTime {
        self.segments[0].trip.departure()
    }

    /// Arrival time of the final trip.
    pub fn arrival_time(&self) -> ClockTime {
        self.last_segment().trip.arrival()
    }

    /// Sum of the segment weights under `weighting`.
    pub fn total_weight(&self, weighting: Weighting) -> u32 {
        self.segments
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.weight(weighting)))
    }

    /// Minutes spent on board across all segments.
    pub fn ride_minutes(&self) -> u32 {
        self.total_weight(Weighting::RideOnly)
    }

    /// Minutes spent waiting between segments.
    pub fn layover_minutes(&self) -> u32 {
        self.segments
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.layover_mins))
    }

    /// Time from the first departure to the final arrival.
    pub fn total_duration(&self) -> Duration {
        let mins = self
            .departure_time()
            .minutes_until(self.arrival_time())
            .unwrap_or(0);
        Duration::minutes(i64::from(mins))
    }

    fn last_segment(&self) -> &Connection {
        // Safe: validated non-empty at construction
        &self.segments[self.segments.len() - 1]
    }
}
