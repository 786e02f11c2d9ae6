//! Route planning over a precomputed departure graph.
//!
//! This module answers: "What is the quickest way from this station to
//! that one, and does a route exist at all?"
//!
//! All shortest paths are computed once when the network is built, so
//! queries only enumerate candidate departures and walk successor tables.

mod config;
mod network;


pub use config::PlannerConfig;
pub use network::{DepartureFilter, LoadError, RouteNetwork};
