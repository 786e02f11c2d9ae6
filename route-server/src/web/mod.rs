//! Web layer for the route server.
//!
//! Provides JSON endpoints for station lookups and route queries.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
