//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::cache::QueryError;
use crate::domain::{ClockTime, StationId, Weighting};
use crate::planner::DepartureFilter;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stats", get(stats))
        .route("/schedule", get(schedule))
        .route("/stations/search", get(search_stations))
        .route("/stations/lookup", get(lookup_station))
        .route("/stations/:id", get(station_departures))
        .route("/stations/:id/arrivals", get(station_arrivals))
        .route("/routes/shortest", get(shortest_route))
        .route("/routes/at", get(route_at))
        .route("/routes/exists", get(route_exists))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Network size and cache statistics.
async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let network = state.network.network();

    Json(StatsResponse {
        stations: network.station_count(),
        trips: network.trip_count(),
        vertices: network.vertex_count(),
        edges: network.edge_count(),
        cached_entries: state.network.entry_count(),
    })
}

/// Every station's departures, in station ID order.
async fn schedule(State(state): State<AppState>) -> Json<ScheduleResponse> {
    let stations = state
        .network
        .network()
        .stations()
        .map(|s| StationResult::from_station(s, &state.station_names))
        .collect();

    Json(ScheduleResponse { stations })
}

/// Search stations by partial name.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Json<StationSearchResponse> {
    let limit = req.limit.unwrap_or(10).min(50);

    let stations = state
        .station_names
        .search(&req.q, limit)
        .into_iter()
        .map(|m| StationRef {
            id: m.id.get(),
            name: Some(m.name),
        })
        .collect();

    Json(StationSearchResponse { stations })
}

/// Look a station up by its exact name.
async fn lookup_station(
    State(state): State<AppState>,
    Query(req): Query<StationLookupRequest>,
) -> Result<Json<StationResult>, AppError> {
    let id = state
        .station_names
        .find(&req.name)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown station: {}", req.name),
        })?;

    station_view(&state, id, false)
}

/// Trips leaving a station.
async fn station_departures(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StationResult>, AppError> {
    let id = parse_station(&id, "station")?;
    station_view(&state, id, false)
}

/// Trips arriving at a station.
async fn station_arrivals(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StationResult>, AppError> {
    let id = parse_station(&id, "station")?;
    station_view(&state, id, true)
}

/// Cheapest route between two stations.
async fn shortest_route(
    State(state): State<AppState>,
    Query(req): Query<ShortestRouteRequest>,
) -> Result<Json<RouteResult>, AppError> {
    let origin = parse_station(&req.from, "origin")?;
    let destination = parse_station(&req.to, "destination")?;
    let weighting = Weighting::from_layovers(req.layovers.unwrap_or(true));

    let route = state
        .network
        .shortest_route(origin, destination, weighting)
        .await?
        .ok_or_else(no_route)?;

    Ok(Json(RouteResult::from_route(&route, &state.station_names)))
}

/// Cheapest route leaving at a given time.
async fn route_at(
    State(state): State<AppState>,
    Query(req): Query<RouteAtRequest>,
) -> Result<Json<RouteResult>, AppError> {
    let time = ClockTime::parse(&req.time).map_err(|e| AppError::BadRequest {
        message: format!("Invalid time {:?}: {}", req.time, e),
    })?;
    let origin = parse_station(&req.from, "origin")?;
    let destination = parse_station(&req.to, "destination")?;

    let filter = if req.exact {
        DepartureFilter::Exact(time)
    } else {
        DepartureFilter::EitherHalfDay(time)
    };

    let route = state
        .network
        .route_departing(filter, origin, destination)
        .await?
        .ok_or_else(no_route)?;

    Ok(Json(RouteResult::from_route(&route, &state.station_names)))
}

/// Whether any (or any direct) route connects two stations.
async fn route_exists(
    State(state): State<AppState>,
    Query(req): Query<RouteExistsRequest>,
) -> Result<Json<RouteExistsResponse>, AppError> {
    let origin = parse_station(&req.from, "origin")?;
    let destination = parse_station(&req.to, "destination")?;

    let exists = if req.direct {
        state.network.direct_path_exists(origin, destination).await?
    } else {
        state.network.path_exists(origin, destination).await?
    };

    Ok(Json(RouteExistsResponse { exists }))
}

fn station_view(
    state: &AppState,
    id: StationId,
    arrivals: bool,
) -> Result<Json<StationResult>, AppError> {
    let network = state.network.network();
    let station = if arrivals {
        network.station_arrivals(id)
    } else {
        network.station(id)
    };

    let station = station.ok_or_else(|| AppError::NotFound {
        message: format!("Unknown station: {id}"),
    })?;

    Ok(Json(StationResult::from_station(
        station,
        &state.station_names,
    )))
}

fn parse_station(raw: &str, what: &str) -> Result<StationId, AppError> {
    StationId::parse(raw).map_err(|e| AppError::BadRequest {
        message: format!("Invalid {what} {raw:?}: {e}"),
    })
}

fn no_route() -> AppError {
    AppError::NotFound {
        message: "no route found".to_string(),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<QueryError> for AppError {
    fn from(e: QueryError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
