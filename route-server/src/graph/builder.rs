//! Departure graph construction.
//!
//! Vertex layout: one scheduled vertex per trip record, in record order,
//! followed by one terminal vertex per station in ID order. The terminal of
//! station `s` therefore lives at `trip_count + s.index()`.
//!
//! Every trip gets an edge to the terminal of its destination, so no trip
//! is a dead end, and an edge to every other trip leaving that destination
//! strictly after it arrives.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::{Connection, Departure, StationId, Trip, VertexKey};

use super::error::GraphError;

/// The immutable vertex/edge model used for all route computation.
#[derive(Debug, Clone)]
pub struct DepartureGraph {
    vertices: Vec<Departure>,
    stations: Vec<StationId>,
    trip_count: usize,
    /// Vertex keys per station (indexed by `StationId::index`), in key order.
    by_station: Vec<Vec<VertexKey>>,
}

impl DepartureGraph {
    /// Build the graph from the station table and trip records.
    ///
    /// Records with identical origin, destination, departure and arrival
    /// are the same departure: the first one owns the canonical vertex and
    /// edges always point at it. Later duplicates keep their own vertex key
    /// with a copy of the canonical adjacency list.
    ///
    /// # Errors
    ///
    /// Fails if station IDs are not exactly `1..=n` or if a trip names a
    /// station outside that range.
    pub fn build(stations: &[StationId], trips: &[Trip]) -> Result<Self, GraphError> {
        let stations = ordered_stations(stations)?;
        validate_trips(&stations, trips)?;

        let trip_count = trips.len();

        let mut canonical: Vec<VertexKey> = Vec::with_capacity(trip_count);
        let mut first_seen: HashMap<Trip, VertexKey> = HashMap::with_capacity(trip_count);
        for (idx, trip) in trips.iter().enumerate() {
            canonical.push(*first_seen.entry(*trip).or_insert(VertexKey(idx)));
        }

        // Canonical departures per origin station, in record order.
        let mut leaving: Vec<Vec<usize>> = vec![Vec::new(); stations.len()];
        for (idx, trip) in trips.iter().enumerate() {
            if canonical[idx].0 == idx {
                leaving[trip.origin().index()].push(idx);
            }
        }

        let mut adjacency: Vec<Vec<Connection>> = vec![Vec::new(); trip_count];
        for (idx, trip) in trips.iter().enumerate() {
            if canonical[idx].0 != idx {
                continue;
            }

            let terminal = VertexKey(trip_count + trip.destination().index());
            let edges = &mut adjacency[idx];
            edges.push(Connection::journey_end(*trip, terminal));

            for &next in &leaving[trip.destination().index()] {
                if next == idx {
                    continue;
                }
                if let Some(layover) = trip.layover_before(&trips[next]) {
                    edges.push(Connection::transfer(*trip, VertexKey(next), layover));
                }
            }
        }

        let mut vertices = Vec::with_capacity(trip_count + stations.len());
        for (idx, trip) in trips.iter().enumerate() {
            let edges = adjacency[canonical[idx].0].clone();
            vertices.push(Departure::scheduled(VertexKey(idx), *trip, edges));
        }
        for station in &stations {
            vertices.push(Departure::terminal(
                VertexKey(trip_count + station.index()),
                *station,
            ));
        }

        let mut by_station: Vec<Vec<VertexKey>> = vec![Vec::new(); stations.len()];
        for vertex in &vertices {
            by_station[vertex.station().index()].push(vertex.key());
        }

        let graph = Self {
            vertices,
            stations,
            trip_count,
            by_station,
        };

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            duplicates = canonical
                .iter()
                .enumerate()
                .filter(|(idx, key)| key.0 != *idx)
                .count(),
            "Built departure graph"
        );

        Ok(graph)
    }

    /// V: trip records plus stations.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn trip_count(&self) -> usize {
        self.trip_count
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Total number of connection edges.
    pub fn edge_count(&self) -> usize {
        self.vertices.iter().map(Departure::connection_count).sum()
    }

    /// Station IDs in ID order.
    pub fn stations(&self) -> &[StationId] {
        &self.stations
    }

    pub fn vertices(&self) -> &[Departure] {
        &self.vertices
    }

    pub fn vertex(&self, key: VertexKey) -> Option<&Departure> {
        self.vertices.get(key.0)
    }

    /// Every vertex belonging to `station`, scheduled departures first.
    ///
    /// Empty for unknown stations.
    pub fn vertices_at(&self, station: StationId) -> &[VertexKey] {
        self.by_station
            .get(station.index())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The terminal vertex of `station`, or `None` for an unknown station.
    pub fn terminal_key(&self, station: StationId) -> Option<VertexKey> {
        (station.index() < self.stations.len())
            .then(|| VertexKey(self.trip_count + station.index()))
    }
}

/// Check the station table is exactly `1..=n` and return it in ID order.
fn ordered_stations(stations: &[StationId]) -> Result<Vec<StationId>, GraphError> {
    let count = stations.len();
    let mut slots: Vec<Option<StationId>> = vec![None; count];

    for &id in stations {
        let slot = slots
            .get_mut(id.index())
            .ok_or(GraphError::StationOutOfRange { id, count })?;
        if slot.replace(id).is_some() {
            return Err(GraphError::DuplicateStation(id));
        }
    }

    // n distinct IDs within 1..=n fill every slot.
    Ok(slots.into_iter().flatten().collect())
}

fn validate_trips(stations: &[StationId], trips: &[Trip]) -> Result<(), GraphError> {
    for (idx, trip) in trips.iter().enumerate() {
        for station in [trip.origin(), trip.destination()] {
            if station.index() >= stations.len() {
                return Err(GraphError::UnknownStation { trip: idx, station });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, DepartureKind, Weighting};

    fn station(id: i64) -> StationId {
        StationId::new(id).unwrap()
    }

    fn stations(n: i64) -> Vec<StationId> {
        (1..=n).map(station).collect()
    }

    fn trip(from: i64, to: i64, dep: u32, arr: u32) -> Trip {
        Trip::new(
            station(from),
            station(to),
            ClockTime::from_hhmm(dep).unwrap(),
            ClockTime::from_hhmm(arr).unwrap(),
        )
        .unwrap()
    }

    /// 1->2 0800-0830, 2->3 0900-0930, 1->3 0800-1000
    fn example_graph() -> DepartureGraph {
        DepartureGraph::build(
            &stations(3),
            &[
                trip(1, 2, 800, 830),
                trip(2, 3, 900, 930),
                trip(1, 3, 800, 1000),
            ],
        )
        .unwrap()
    }

    #[test]
    fn vertex_layout() {
        let graph = example_graph();
        assert_eq!(graph.vertex_count(), 6);
        assert_eq!(graph.trip_count(), 3);
        assert_eq!(graph.station_count(), 3);

        for key in 0..3 {
            assert!(!graph.vertex(VertexKey(key)).unwrap().is_terminal());
        }
        for (offset, id) in (1..=3).enumerate() {
            let terminal = graph.vertex(VertexKey(3 + offset)).unwrap();
            assert!(terminal.is_terminal());
            assert_eq!(terminal.station(), station(id));
            assert_eq!(graph.terminal_key(station(id)), Some(VertexKey(3 + offset)));
        }
        assert!(graph.vertex(VertexKey(6)).is_none());
        assert_eq!(graph.terminal_key(station(4)), None);
    }

    #[test]
    fn every_trip_has_journey_end_edge() {
        let graph = example_graph();
        for vertex in &graph.vertices()[..3] {
            let trip = vertex.trip().unwrap();
            let terminal = graph.terminal_key(trip.destination()).unwrap();
            let edge = vertex
                .connection_to(terminal, Weighting::WithLayovers)
                .unwrap();
            assert!(edge.ends_journey);
            assert_eq!(edge.layover_mins, 0);
            assert_eq!(edge.ride_mins, trip.ride_minutes());
        }
    }

    #[test]
    fn transfer_edges_carry_layover() {
        let graph = example_graph();
        let first = graph.vertex(VertexKey(0)).unwrap();

        assert_eq!(first.connection_count(), 2);
        let transfer = first
            .connection_to(VertexKey(1), Weighting::WithLayovers)
            .unwrap();
        assert_eq!(transfer.ride_mins, 30);
        assert_eq!(transfer.layover_mins, 30);
        assert_eq!(transfer.combined_mins(), 60);
        assert!(!transfer.ends_journey);

        // The direct trip to 3 has nothing to connect to.
        assert_eq!(graph.vertex(VertexKey(2)).unwrap().connection_count(), 1);
    }

    #[test]
    fn no_transfer_to_departure_at_arrival_time() {
        let graph = DepartureGraph::build(
            &stations(3),
            &[trip(1, 2, 800, 830), trip(2, 3, 830, 900)],
        )
        .unwrap();
        assert_eq!(graph.vertex(VertexKey(0)).unwrap().connection_count(), 1);
    }

    #[test]
    fn no_transfer_to_earlier_departure() {
        let graph = DepartureGraph::build(
            &stations(3),
            &[trip(1, 2, 800, 830), trip(2, 3, 700, 730)],
        )
        .unwrap();
        assert_eq!(graph.vertex(VertexKey(0)).unwrap().connection_count(), 1);
    }

    #[test]
    fn duplicate_records_share_canonical_vertex() {
        let graph = DepartureGraph::build(
            &stations(3),
            &[
                trip(2, 3, 900, 930),
                trip(1, 2, 800, 830),
                trip(2, 3, 900, 930),
            ],
        )
        .unwrap();

        // Edges into the duplicate point at the first copy only.
        let feeder = graph.vertex(VertexKey(1)).unwrap();
        let targets: Vec<VertexKey> = feeder.connections().iter().map(|c| c.to).collect();
        assert_eq!(targets, vec![VertexKey(4), VertexKey(0)]);

        // The duplicate vertex carries the canonical adjacency.
        let canonical = graph.vertex(VertexKey(0)).unwrap();
        let duplicate = graph.vertex(VertexKey(2)).unwrap();
        assert_eq!(canonical.connections(), duplicate.connections());
        assert_eq!(duplicate.key(), VertexKey(2));
    }

    #[test]
    fn vertices_at_station_in_key_order() {
        let graph = example_graph();
        assert_eq!(
            graph.vertices_at(station(1)),
            &[VertexKey(0), VertexKey(2), VertexKey(3)]
        );
        assert_eq!(graph.vertices_at(station(2)), &[VertexKey(1), VertexKey(4)]);
        assert_eq!(graph.vertices_at(station(3)), &[VertexKey(5)]);
        assert!(graph.vertices_at(station(99)).is_empty());
    }

    #[test]
    fn stations_may_arrive_out_of_order() {
        let graph = DepartureGraph::build(
            &[station(3), station(1), station(2)],
            &[trip(1, 2, 800, 830)],
        )
        .unwrap();
        assert_eq!(graph.stations(), &stations(3)[..]);
        assert!(matches!(
            graph.vertex(VertexKey(1)).unwrap().kind(),
            DepartureKind::Terminal
        ));
        assert_eq!(graph.vertex(VertexKey(1)).unwrap().station(), station(1));
    }

    #[test]
    fn rejects_gap_in_station_ids() {
        let err = DepartureGraph::build(&[station(1), station(3)], &[]).unwrap_err();
        assert_eq!(
            err,
            GraphError::StationOutOfRange {
                id: station(3),
                count: 2
            }
        );
    }

    #[test]
    fn rejects_duplicate_station() {
        let err = DepartureGraph::build(&[station(1), station(1)], &[]).unwrap_err();
        assert_eq!(err, GraphError::DuplicateStation(station(1)));
    }

    #[test]
    fn rejects_trip_to_unknown_station() {
        let err =
            DepartureGraph::build(&stations(2), &[trip(1, 2, 800, 830), trip(2, 5, 900, 930)])
                .unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownStation {
                trip: 1,
                station: station(5)
            }
        );
    }

    #[test]
    fn empty_timetable() {
        let graph = DepartureGraph::build(&[], &[]).unwrap();
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }
}
