//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, CachedRouteNetwork};
use crate::planner::RouteNetwork;
use crate::timetable::StationNames;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Route network with cached query answers
    pub network: Arc<CachedRouteNetwork>,

    /// Station ID/name lookup
    pub station_names: Arc<StationNames>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: RouteNetwork, station_names: StationNames, cache: &CacheConfig) -> Self {
        Self {
            network: Arc::new(CachedRouteNetwork::new(Arc::new(network), cache)),
            station_names: Arc::new(station_names),
        }
    }
}
