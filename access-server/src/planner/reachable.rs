//! Reachability search.
//!
//! Explores outward from every station of an origin cluster and records,
//! for each cluster reached within the caps, the cheapest (minutes,
//! transfers) found.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::config::SearchConfig;
use super::explore::{Caps, Exploration};
use crate::domain::{ClusterId, Constraint};
use crate::network::NetworkGraph;

/// Best cost found for reaching a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reach {
    pub transfers: u32,
    pub minutes: f64,
}

impl Reach {
    /// Returns true if `self` should replace `other` as the best: strictly
    /// fewer minutes, or equal minutes with fewer transfers.
    pub fn improves_on(&self, other: &Reach) -> bool {
        self.minutes < other.minutes
            || (self.minutes == other.minutes && self.transfers < other.transfers)
    }
}

/// Best reach per cluster, ordered by cluster id.
///
/// The origin cluster itself is included (at zero cost) whenever it has a
/// served station; excluding origins is up to the caller.
pub type ReachabilitySet = BTreeMap<ClusterId, Reach>;

/// Find every cluster reachable from `origin` within `constraint`.
///
/// An unconstrained request and an unknown or unserved origin both yield
/// an empty set.
pub fn search_reachable(
    graph: &NetworkGraph,
    config: &SearchConfig,
    origin: ClusterId,
    constraint: &Constraint,
) -> ReachabilitySet {
    let mut results = ReachabilitySet::new();
    if constraint.is_unconstrained() {
        debug!(%origin, "unconstrained reachability request, nothing to do");
        return results;
    }

    let mut exploration = Exploration::new(graph, config, Caps::resolve(constraint, config));
    if exploration.seed(origin) == 0 {
        return results;
    }

    while let Some(current) = exploration.pop() {
        if !exploration.accepts(&current) {
            continue;
        }

        if let Some(cluster) = graph.cluster_of(current.station) {
            let reach = Reach {
                transfers: current.transfers,
                minutes: current.cost,
            };
            results
                .entry(cluster)
                .and_modify(|best| {
                    if reach.improves_on(best) {
                        *best = reach;
                    }
                })
                .or_insert(reach);
        }

        exploration.expand(&current, |_, _| {});
    }

    debug!(
        %origin,
        clusters = results.len(),
        states = exploration.states(),
        popped = exploration.popped(),
        "reachability search complete"
    );

    results
}
