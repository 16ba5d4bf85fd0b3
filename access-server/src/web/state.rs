//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedPlanner;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Planner with cached reachability over the loaded network
    pub planner: Arc<CachedPlanner>,
}

impl AppState {
    pub fn new(planner: CachedPlanner) -> Self {
        Self {
            planner: Arc::new(planner),
        }
    }
}
