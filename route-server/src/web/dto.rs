//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Connection, Route, Station, Trip};
use crate::timetable::StationNames;

/// Request for the shortest route between two stations.
#[derive(Debug, Deserialize)]
pub struct ShortestRouteRequest {
    /// Origin station ID
    pub from: String,

    /// Destination station ID
    pub to: String,

    /// Count waiting time between trips (defaults to true)
    pub layovers: Option<bool>,
}

/// Request for a route leaving at a given time.
#[derive(Debug, Deserialize)]
pub struct RouteAtRequest {
    /// Departure time, `HHMM` or `HH:MM`
    pub time: String,

    /// Origin station ID
    pub from: String,

    /// Destination station ID
    pub to: String,

    /// Match the time exactly, without the twelve-hour-earlier reading
    #[serde(default)]
    pub exact: bool,
}

/// Request to check whether two stations are connected.
#[derive(Debug, Deserialize)]
pub struct RouteExistsRequest {
    /// Origin station ID
    pub from: String,

    /// Destination station ID
    pub to: String,

    /// Only count single-trip connections
    #[serde(default)]
    pub direct: bool,
}

/// Request to look a station up by exact name.
#[derive(Debug, Deserialize)]
pub struct StationLookupRequest {
    pub name: String,
}

/// Request to search stations by partial name.
#[derive(Debug, Deserialize)]
pub struct StationSearchRequest {
    /// Search query
    pub q: String,

    /// Maximum number of results (default 10)
    pub limit: Option<usize>,
}

/// A station reference with its display name.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StationRef {
    pub id: u32,
    pub name: Option<String>,
}

impl StationRef {
    pub fn new(id: crate::domain::StationId, names: &StationNames) -> Self {
        Self {
            id: id.get(),
            name: names.name(id).map(str::to_string),
        }
    }
}

/// One scheduled trip.
#[derive(Debug, Serialize)]
pub struct TripResult {
    pub origin: StationRef,
    pub destination: StationRef,

    /// Departure time (HH:MM)
    pub departure: String,

    /// Arrival time (HH:MM)
    pub arrival: String,

    /// Minutes on board
    pub ride_mins: u32,
}

impl TripResult {
    pub fn from_trip(trip: &Trip, names: &StationNames) -> Self {
        Self {
            origin: StationRef::new(trip.origin(), names),
            destination: StationRef::new(trip.destination(), names),
            departure: trip.departure().to_string(),
            arrival: trip.arrival().to_string(),
            ride_mins: trip.ride_minutes(),
        }
    }
}

/// A station with one of its trip lists.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: u32,
    pub name: Option<String>,
    pub trips: Vec<TripResult>,
}

impl StationResult {
    pub fn from_station(station: &Station, names: &StationNames) -> Self {
        Self {
            id: station.id().get(),
            name: names.name(station.id()).map(str::to_string),
            trips: station
                .trips()
                .iter()
                .map(|t| TripResult::from_trip(t, names))
                .collect(),
        }
    }
}

/// Every station with its departures.
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub stations: Vec<StationResult>,
}

/// Response for station search.
#[derive(Debug, Serialize)]
pub struct StationSearchResponse {
    pub stations: Vec<StationRef>,
}

/// One leg of a route.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    pub trip: TripResult,

    /// Minutes waiting for the next leg
    pub layover_mins: u32,

    /// Whether the journey ends after this leg
    pub ends_journey: bool,
}

impl SegmentResult {
    pub fn from_connection(connection: &Connection, names: &StationNames) -> Self {
        Self {
            trip: TripResult::from_trip(&connection.trip, names),
            layover_mins: connection.layover_mins,
            ends_journey: connection.ends_journey,
        }
    }
}

/// A route answer.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub origin: StationRef,
    pub destination: StationRef,

    /// Departure time from origin (HH:MM)
    pub departure_time: String,

    /// Arrival time at destination (HH:MM)
    pub arrival_time: String,

    /// Departure to arrival, in minutes
    pub duration_mins: i64,

    /// Minutes on board
    pub ride_mins: u32,

    /// Minutes waiting between trips
    pub layover_mins: u32,

    /// Number of changes
    pub transfers: usize,

    pub segments: Vec<SegmentResult>,
}

impl RouteResult {
    pub fn from_route(route: &Route, names: &StationNames) -> Self {
        // Layover after the final leg is not part of the journey.
        let layover_mins = route.segments()[..route.segment_count() - 1]
            .iter()
            .map(|c| c.layover_mins)
            .sum();

        Self {
            origin: StationRef::new(route.origin(), names),
            destination: StationRef::new(route.destination(), names),
            departure_time: route.departure_time().to_string(),
            arrival_time: route.arrival_time().to_string(),
            duration_mins: route.total_duration().num_minutes(),
            ride_mins: route.ride_minutes(),
            layover_mins,
            transfers: route.transfer_count(),
            segments: route
                .segments()
                .iter()
                .map(|c| SegmentResult::from_connection(c, names))
                .collect(),
        }
    }
}

/// Response for route existence checks.
#[derive(Debug, Serialize)]
pub struct RouteExistsResponse {
    pub exists: bool,
}

/// Network statistics.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub stations: usize,
    pub trips: usize,
    pub vertices: usize,
    pub edges: usize,
    pub cached_entries: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
