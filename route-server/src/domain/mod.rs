//! Domain types for the timetable route planner.
//!
//! This module contains the core domain model types: station IDs, clock
//! times, trips, the departure vertices and connection edges of the route
//! graph, and the routes built from them. All types enforce their
//! invariants at construction time, so code that receives these types can
//! trust their validity.

mod departure;
mod error;
mod route;
mod station;
mod time;
mod trip;

pub use departure::{Connection, Departure, DepartureKind, VertexKey, Weighting};
pub use error::DomainError;
pub use route::Route;
pub use station::{InvalidStationId, Station, StationId};
pub use time::{ClockTime, InvalidClockTime};
pub use trip::Trip;
