//! The departure graph and its precomputed shortest paths.
//!
//! Stations are not vertices here. Every scheduled trip record is a vertex,
//! and every station adds one terminal vertex for "the journey ends here".
//! Shortest paths are computed once per weighting with Floyd–Warshall and
//! routes are recovered by walking the successor tables.

mod builder;
mod error;
mod reconstruct;
mod shortest_path;
mod station_index;

pub use builder::DepartureGraph;
pub use error::GraphError;
pub use reconstruct::reconstruct;
pub use shortest_path::{DistanceMatrix, INFINITE, SuccessorTable, precompute, solve};
pub use station_index::StationIndex;
