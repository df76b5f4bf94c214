//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, PlanCache};
use crate::graph::Graph;
use crate::planner::PlannerConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// The transport network, read-only once built
    pub graph: Arc<Graph>,

    /// Trip planner configuration
    pub config: Arc<PlannerConfig>,

    /// Recently planned trips
    pub cache: Arc<PlanCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(graph: Graph, config: PlannerConfig, cache_config: &CacheConfig) -> Self {
        Self {
            graph: Arc::new(graph),
            config: Arc::new(config),
            cache: Arc::new(PlanCache::new(cache_config)),
        }
    }
}
