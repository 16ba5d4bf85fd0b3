//! Web layer for the station-access engine.
//!
//! Provides JSON endpoints for cluster lookup, multi-origin reachability
//! and route detail.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
