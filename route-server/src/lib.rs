//! Timetable route server.
//!
//! Loads a timetable of scheduled trips, precomputes shortest routes
//! between every pair of departures and answers route queries over HTTP.

pub mod cache;
pub mod config;
pub mod domain;
pub mod graph;
pub mod planner;
pub mod timetable;
pub mod web;
