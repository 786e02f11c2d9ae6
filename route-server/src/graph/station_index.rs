//! Per-station trip lists for schedule display.
//!
//! These views are not used for route computation. The departures view
//! lists the trips leaving each station, the arrivals view the trips
//! terminating there. Both are indexed directly by `StationId::index`.

use crate::domain::{Station, StationId, Trip};

/// Departures and arrivals per station, in timetable order.
#[derive(Debug, Clone, Default)]
pub struct StationIndex {
    departures: Vec<Station>,
    arrivals: Vec<Station>,
}

impl StationIndex {
    /// Build both views.
    ///
    /// `stations` must be in ID order (1, 2, 3, ...). Trips naming a station
    /// outside that range are left out.
    pub fn build(stations: &[StationId], trips: &[Trip]) -> Self {
        let mut leaving: Vec<Vec<Trip>> = vec![Vec::new(); stations.len()];
        let mut arriving: Vec<Vec<Trip>> = vec![Vec::new(); stations.len()];

        for trip in trips {
            if let Some(list) = leaving.get_mut(trip.origin().index()) {
                list.push(*trip);
            }
            if let Some(list) = arriving.get_mut(trip.destination().index()) {
                list.push(*trip);
            }
        }

        let departures = stations
            .iter()
            .zip(leaving)
            .map(|(id, trips)| Station::new(*id, trips))
            .collect();
        let arrivals = stations
            .iter()
            .zip(arriving)
            .map(|(id, trips)| Station::new(*id, trips))
            .collect();

        Self {
            departures,
            arrivals,
        }
    }

    /// The station with the trips leaving it, or `None` for an unknown ID.
    pub fn departures_from(&self, id: StationId) -> Option<&Station> {
        self.departures.get(id.index())
    }

    /// The station with the trips arriving at it, or `None` for an unknown ID.
    pub fn arrivals_at(&self, id: StationId) -> Option<&Station> {
        self.arrivals.get(id.index())
    }

    pub fn station_count(&self) -> usize {
        self.departures.len()
    }

    /// Every station with its departures, in ID order.
    pub fn departures(&self) -> impl Iterator<Item = &Station> {
        self.departures.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClockTime;

    fn station(id: i64) -> StationId {
        StationId::new(id).unwrap()
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

    fn index() -> StationIndex {
        StationIndex::build(
            &[station(1), station(2), station(3)],
            &[
                trip(1, 2, 800, 830),
                trip(2, 3, 900, 930),
                trip(1, 3, 800, 1000),
            ],
        )
    }

    #[test]
    fn departures_view() {
        let index = index();
        let first = index.departures_from(station(1)).unwrap();
        assert_eq!(first.id(), station(1));
        assert_eq!(first.trip_count(), 2);
        assert_eq!(first.trip(0), Some(&trip(1, 2, 800, 830)));
        assert_eq!(first.trip(1), Some(&trip(1, 3, 800, 1000)));

        assert_eq!(index.departures_from(station(3)).unwrap().trip_count(), 0);
    }

    #[test]
    fn all_departures_in_id_order() {
        let index = index();
        let counts: Vec<(u32, usize)> = index
            .departures()
            .map(|s| (s.id().get(), s.trip_count()))
            .collect();
        assert_eq!(counts, vec![(1, 2), (2, 1), (3, 0)]);
    }

    #[test]
    fn arrivals_view() {
        let index = index();
        let third = index.arrivals_at(station(3)).unwrap();
        assert_eq!(third.id(), station(3));
        let origins: Vec<u32> = third.trips().iter().map(|t| t.origin().get()).collect();
        assert_eq!(origins, vec![2, 1]);

        assert_eq!(index.arrivals_at(station(1)).unwrap().trip_count(), 0);
    }

    #[test]
    fn unknown_station_is_none() {
        let index = index();
        assert!(index.departures_from(station(4)).is_none());
        assert!(index.arrivals_at(station(99)).is_none());
        assert_eq!(index.station_count(), 3);
    }

    #[test]
    fn trips_to_unknown_stations_are_skipped() {
        let index = StationIndex::build(&[station(1)], &[trip(1, 5, 800, 900)]);
        assert_eq!(index.departures_from(station(1)).unwrap().trip_count(), 1);
        assert_eq!(index.arrivals_at(station(1)).unwrap().trip_count(), 0);
    }
}
