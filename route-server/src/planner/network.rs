//! The query layer over a built departure graph.
//!
//! A [`RouteNetwork`] owns the graph, the per-station views and the two
//! successor tables. It is immutable after construction, so it can be
//! shared across threads behind an `Arc` without locking.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::domain::{ClockTime, Departure, Route, Station, StationId, Trip, VertexKey, Weighting};
use crate::graph::{DepartureGraph, GraphError, StationIndex, SuccessorTable, precompute, reconstruct};
use crate::timetable::{Timetable, TimetableError};

use super::config::PlannerConfig;

/// Error from loading a network from timetable files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A timetable file could not be read or parsed
    #[error(transparent)]
    Timetable(#[from] TimetableError),

    /// The records do not form a valid graph
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Which scheduled departures a time-filtered query accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepartureFilter {
    /// Only departures at exactly this time.
    Exact(ClockTime),
    /// Departures at this time or twelve hours earlier.
    ///
    /// Lets a 12-hour reading such as `1400` for "2 o'clock" match a
    /// `0200` departure.
    EitherHalfDay(ClockTime),
}

impl DepartureFilter {
    /// Returns true if a departure at `time` passes the filter.
    pub fn matches(&self, time: ClockTime) -> bool {
        match *self {
            DepartureFilter::Exact(wanted) => time == wanted,
            DepartureFilter::EitherHalfDay(wanted) => {
                time == wanted || wanted.twelve_hours_earlier() == Some(time)
            }
        }
    }
}

/// Precomputed shortest routes between every pair of departures.
#[derive(Debug, Clone)]
pub struct RouteNetwork {
    graph: DepartureGraph,
    stations: StationIndex,
    with_layovers: SuccessorTable,
    ride_only: SuccessorTable,
}

impl RouteNetwork {
    /// Build the graph and run both shortest-path precomputations.
    ///
    /// # Errors
    ///
    /// Fails if the station table or any trip is invalid; nothing is built.
    pub fn build(
        stations: &[StationId],
        trips: &[Trip],
        config: &PlannerConfig,
    ) -> Result<Self, GraphError> {
        let started = Instant::now();

        let graph = DepartureGraph::build(stations, trips)?;
        let index = StationIndex::build(graph.stations(), trips);
        let with_layovers = precompute(&graph, Weighting::WithLayovers, config);
        let ride_only = precompute(&graph, Weighting::RideOnly, config);

        info!(
            stations = graph.station_count(),
            trips = graph.trip_count(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Route network ready"
        );

        Ok(Self {
            graph,
            stations: index,
            with_layovers,
            ride_only,
        })
    }

    /// Build from already-loaded timetable records.
    pub fn from_timetable(timetable: &Timetable, config: &PlannerConfig) -> Result<Self, GraphError> {
        Self::build(&timetable.station_ids(), timetable.trips(), config)
    }

    /// Load both timetable files and build.
    pub fn load(
        stations_path: &Path,
        trips_path: &Path,
        config: &PlannerConfig,
    ) -> Result<Self, LoadError> {
        let timetable = Timetable::load(stations_path, trips_path)?;
        Ok(Self::from_timetable(&timetable, config)?)
    }

    /// The cheapest route from `origin` to `destination` under `weighting`.
    ///
    /// Every departure vertex at the origin is tried against every vertex
    /// at the destination. Ties keep the candidate found first, in vertex
    /// order. `None` for unknown stations or when no route exists.
    pub fn shortest_route(
        &self,
        origin: StationId,
        destination: StationId,
        weighting: Weighting,
    ) -> Option<Route> {
        let table = self.table(weighting);
        let route = self.best_candidate(origin, destination, table, weighting, |_| true);

        debug!(
            %origin,
            %destination,
            ?weighting,
            found = route.is_some(),
            "Shortest route query"
        );

        route
    }

    /// The cheapest layover-inclusive route leaving `origin` at `time`.
    ///
    /// A departure exactly twelve hours before `time` also matches.
    pub fn route_at_time(
        &self,
        time: ClockTime,
        origin: StationId,
        destination: StationId,
    ) -> Option<Route> {
        self.route_departing(DepartureFilter::EitherHalfDay(time), origin, destination)
    }

    /// The cheapest layover-inclusive route whose first departure passes `filter`.
    pub fn route_departing(
        &self,
        filter: DepartureFilter,
        origin: StationId,
        destination: StationId,
    ) -> Option<Route> {
        let route = self.best_candidate(
            origin,
            destination,
            &self.with_layovers,
            Weighting::WithLayovers,
            |vertex| vertex.departure_time().is_some_and(|t| filter.matches(t)),
        );

        debug!(
            %origin,
            %destination,
            ?filter,
            found = route.is_some(),
            "Timed route query"
        );

        route
    }

    /// Returns true if a single trip goes from `origin` to `destination`.
    pub fn direct_path_exists(&self, origin: StationId, destination: StationId) -> bool {
        self.candidates(origin, destination, &self.with_layovers, |_| true)
            .any(|route| route.is_direct())
    }

    /// Returns true if any route goes from `origin` to `destination`.
    pub fn path_exists(&self, origin: StationId, destination: StationId) -> bool {
        self.shortest_route(origin, destination, Weighting::WithLayovers)
            .is_some()
    }

    /// The station with the trips leaving it, or `None` for an unknown ID.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.departures_from(id)
    }

    /// The station with the trips arriving at it, or `None` for an unknown ID.
    pub fn station_arrivals(&self, id: StationId) -> Option<&Station> {
        self.stations.arrivals_at(id)
    }

    /// Every station with the trips leaving it, in ID order.
    pub fn stations(&self) -> impl Iterator<Item = &Station> {
        self.stations.departures()
    }

    /// The departure vertex with this key.
    pub fn departure(&self, key: VertexKey) -> Option<&Departure> {
        self.graph.vertex(key)
    }

    /// V: trip records plus stations.
    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn station_count(&self) -> usize {
        self.graph.station_count()
    }

    pub fn trip_count(&self) -> usize {
        self.graph.trip_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn table(&self, weighting: Weighting) -> &SuccessorTable {
        match weighting {
            Weighting::WithLayovers => &self.with_layovers,
            Weighting::RideOnly => &self.ride_only,
        }
    }

    /// Reconstructed routes for every (origin vertex, destination vertex)
    /// pair whose origin vertex passes `accept`, in vertex order.
    fn candidates<'a, F>(
        &'a self,
        origin: StationId,
        destination: StationId,
        table: &'a SuccessorTable,
        accept: F,
    ) -> impl Iterator<Item = Route> + 'a
    where
        F: Fn(&Departure) -> bool + 'a,
    {
        let targets = self.graph.vertices_at(destination);

        self.graph
            .vertices_at(origin)
            .iter()
            .filter_map(move |&key| self.graph.vertex(key))
            .filter(move |vertex| accept(*vertex))
            .flat_map(move |vertex| {
                targets
                    .iter()
                    .filter_map(move |&target| reconstruct(&self.graph, vertex.key(), target, table))
            })
    }

    fn best_candidate<F>(
        &self,
        origin: StationId,
        destination: StationId,
        table: &SuccessorTable,
        weighting: Weighting,
        accept: F,
    ) -> Option<Route>
    where
        F: Fn(&Departure) -> bool,
    {
        let mut best: Option<(u32, Route)> = None;

        for route in self.candidates(origin, destination, table, accept) {
            let weight = route.total_weight(weighting);
            if best.as_ref().is_none_or(|(w, _)| weight < *w) {
                best = Some((weight, route));
            }
        }

        best.map(|(_, route)| route)
    }
}
