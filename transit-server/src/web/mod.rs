//! Web layer for the transit planner.
//!
//! Provides HTTP endpoints for path queries, live ETAs, route lookups and
//! telemetry ingestion.

mod auth;
mod dto;
mod routes;
mod state;

pub use auth::{ROLE_HEADER, Role, require_role};
pub use dto::*;
pub use routes::{AppError, STALE_HEADER, create_router};
pub use state::AppState;
