//! Constrained station-access search.
//!
//! Answers two questions over a [`NetworkGraph`]: which clusters can be
//! reached from a starting cluster within a transfer and/or minute cap,
//! and what the best route between two clusters looks like.
//!
//! Both searches explore states keyed by (station, transfers so far) in
//! order of accumulated minutes. Riding moves along a line to an adjacent
//! station; transferring switches to another station of the same cluster
//! at a fixed cost and counts against the transfer cap.

mod common;
mod config;
mod explore;
mod itinerary;
mod path;
mod queue;
mod rank;
mod reachable;


pub use common::{Access, CommonDestination, Origin, collect_common, is_searchable};
pub use config::{ConfigError, SearchConfig};
pub use itinerary::{Itinerary, RideSegment, StopView, UNKNOWN_LINE_COLOR, UNKNOWN_LINE_NAME};
pub use path::{FoundPath, PathStep, find_path};
pub use queue::{FrontierEntry, FrontierQueue};
pub use rank::{RankOptions, SortDirection, SortKey, filter_region, rank_destinations, regions_present};
pub use reachable::{Reach, ReachabilitySet, search_reachable};

use tracing::debug;

use crate::domain::{ClusterId, Constraint};
use crate::network::NetworkGraph;

/// Search entry point bound to a graph and a configuration.
///
/// Holds only borrows; create one per request.
#[derive(Debug, Clone, Copy)]
pub struct Planner<'a> {
    graph: &'a NetworkGraph,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    pub fn new(graph: &'a NetworkGraph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Clusters reachable from `origin`, including `origin` itself.
    pub fn reachable(&self, origin: ClusterId, constraint: &Constraint) -> ReachabilitySet {
        search_reachable(self.graph, self.config, origin, constraint)
    }

    /// Best station-level path from `origin` to `target`.
    pub fn find_path(
        &self,
        origin: ClusterId,
        target: ClusterId,
        constraint: &Constraint,
    ) -> Option<FoundPath> {
        find_path(self.graph, self.config, origin, target, constraint)
    }

    /// Best route from `origin` to `target`, grouped into ride segments.
    pub fn route(
        &self,
        origin: ClusterId,
        target: ClusterId,
        constraint: &Constraint,
    ) -> Option<Itinerary> {
        let path = self.find_path(origin, target, constraint)?;
        Some(Itinerary::build(&path.steps, path.total_minutes, self.graph))
    }

    /// Clusters reachable from every origin within that origin's caps.
    ///
    /// Empty if there are no origins or any origin is unconstrained.
    pub fn common_destinations(&self, origins: &[Origin]) -> Vec<CommonDestination> {
        if !is_searchable(origins) {
            return Vec::new();
        }
        let sets: Vec<ReachabilitySet> = origins
            .iter()
            .map(|o| self.reachable(o.cluster, &o.constraint))
            .collect();
        let common = collect_common(self.graph, origins, &sets);
        debug!(
            origins = origins.len(),
            destinations = common.len(),
            "common destinations collected"
        );
        common
    }
}
