//! Departure vertices and the connection edges between them.
//!
//! The route graph does not use stations as vertices. Each scheduled trip
//! record gets its own vertex, and each station gets one extra terminal
//! vertex that marks "the journey ends here". A station is therefore
//! visited through many vertices, each with its own valid onward
//! connections.

use std::fmt;

use super::{ClockTime, StationId, Trip};

/// Position of a vertex in the combined vertex list.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey(pub usize);

impl fmt::Debug for VertexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VertexKey({})", self.0)
    }
}

/// Which scalar weight a shortest-path run uses for each edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weighting {
    /// Ride time plus the wait before the next leg.
    WithLayovers,
    /// Ride time only.
    RideOnly,
}

impl Weighting {
    /// Map an "include layovers" flag onto a weighting.
    pub fn from_layovers(include_layovers: bool) -> Self {
        if include_layovers {
            Weighting::WithLayovers
        } else {
            Weighting::RideOnly
        }
    }

    pub fn includes_layovers(self) -> bool {
        matches!(self, Weighting::WithLayovers)
    }
}

/// A directed edge out of a scheduled departure vertex.
///
/// Both weights are stored on every edge so that the two shortest-path
/// runs are computed over exactly the same topology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Vertex reached by taking this edge.
    pub to: VertexKey,
    /// The trip ridden along this edge.
    pub trip: Trip,
    /// Minutes on board.
    pub ride_mins: u32,
    /// Minutes waiting for the next leg; zero when the edge ends the journey.
    pub layover_mins: u32,
    /// True when `to` is the terminal vertex of the trip's destination.
    pub ends_journey: bool,
}

impl Connection {
    /// Edge from a trip to the terminal vertex of its destination.
    pub fn journey_end(trip: Trip, terminal: VertexKey) -> Self {
        Self {
            to: terminal,
            trip,
            ride_mins: trip.ride_minutes(),
            layover_mins: 0,
            ends_journey: true,
        }
    }

    /// Edge from a trip to a later departure from its destination.
    pub fn transfer(trip: Trip, next: VertexKey, layover_mins: u32) -> Self {
        Self {
            to: next,
            trip,
            ride_mins: trip.ride_minutes(),
            layover_mins,
            ends_journey: false,
        }
    }

    /// Ride plus layover minutes.
    pub fn combined_mins(&self) -> u32 {
        self.ride_mins.saturating_add(self.layover_mins)
    }

    /// The edge weight used by a shortest-path run.
    pub fn weight(&self, weighting: Weighting) -> u32 {
        match weighting {
            Weighting::WithLayovers => self.combined_mins(),
            Weighting::RideOnly => self.ride_mins,
        }
    }
}

/// What a vertex stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartureKind {
    /// A scheduled trip leaving its origin.
    Scheduled(Trip),
    /// End-of-journey sink for a station.
    Terminal,
}

/// A vertex of the departure graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    key: VertexKey,
    station: StationId,
    kind: DepartureKind,
    connections: Vec<Connection>,
}

impl Departure {
    /// A scheduled departure with its outgoing edges.
    pub fn scheduled(key: VertexKey, trip: Trip, connections: Vec<Connection>) -> Self {
        Self {
            key,
            station: trip.origin(),
            kind: DepartureKind::Scheduled(trip),
            connections,
        }
    }

    /// The terminal vertex of a station.
    pub fn terminal(key: VertexKey, station: StationId) -> Self {
        Self {
            key,
            station,
            kind: DepartureKind::Terminal,
            connections: Vec::new(),
        }
    }

    pub fn key(&self) -> VertexKey {
        self.key
    }

    pub fn station(&self) -> StationId {
        self.station
    }

    pub fn kind(&self) -> &DepartureKind {
        &self.kind
    }

    /// The scheduled trip, or `None` for a terminal vertex.
    pub fn trip(&self) -> Option<&Trip> {
        match &self.kind {
            DepartureKind::Scheduled(trip) => Some(trip),
            DepartureKind::Terminal => None,
        }
    }

    /// Departure time, or `None` for a terminal vertex.
    pub fn departure_time(&self) -> Option<ClockTime> {
        self.trip().map(Trip::departure)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, DepartureKind::Terminal)
    }

    /// True when no edge leaves this vertex.
    pub fn is_final_destination(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// The cheapest edge from this vertex to `next` under `weighting`.
    ///
    /// Ties go to the edge added first.
    pub fn connection_to(&self, next: VertexKey, weighting: Weighting) -> Option<&Connection> {
        self.connections
            .iter()
            .filter(|c| c.to == next)
            .min_by_key(|c| c.weight(weighting))
    }
}
