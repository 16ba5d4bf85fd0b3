//! Destinations reachable from every one of several origins.
//!
//! Each origin carries its own caps. A destination qualifies when every
//! origin reaches it within that origin's caps; origins themselves are
//! never reported as destinations.

use std::borrow::Borrow;
use std::collections::HashSet;

use serde::Serialize;

use super::reachable::ReachabilitySet;
use crate::domain::{ClusterId, Constraint};
use crate::network::NetworkGraph;

/// A starting cluster and its caps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Origin {
    pub cluster: ClusterId,
    pub constraint: Constraint,
}

impl Origin {
    pub fn new(cluster: ClusterId, constraint: Constraint) -> Self {
        Self {
            cluster,
            constraint,
        }
    }
}

/// How one origin reaches a destination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Access {
    pub origin: ClusterId,
    pub transfers: u32,
    pub minutes: f64,
    pub max_transfers: Option<u32>,
    pub max_minutes: Option<f64>,
}

/// A cluster reachable from all origins, with per-origin access and
/// aggregates used for ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonDestination {
    pub cluster: ClusterId,
    /// One entry per origin, in request order.
    pub access: Vec<Access>,
    pub total_transfers: u32,
    pub total_minutes: f64,
    pub max_transfers: u32,
    pub max_minutes: f64,
    pub min_minutes: f64,
}

impl CommonDestination {
    fn new(cluster: ClusterId, access: Vec<Access>) -> Self {
        let total_transfers = access.iter().map(|a| a.transfers).sum();
        let total_minutes = access.iter().map(|a| a.minutes).sum();
        let max_transfers = access.iter().map(|a| a.transfers).max().unwrap_or(0);
        let max_minutes = access.iter().map(|a| a.minutes).fold(0.0, f64::max);
        let min_minutes = access
            .iter()
            .map(|a| a.minutes)
            .reduce(f64::min)
            .unwrap_or(0.0);

        Self {
            cluster,
            access,
            total_transfers,
            total_minutes,
            max_transfers,
            max_minutes,
            min_minutes,
        }
    }

    /// Access from a particular origin, if that origin is part of the
    /// request.
    pub fn access_from(&self, origin: ClusterId) -> Option<&Access> {
        self.access.iter().find(|a| a.origin == origin)
    }
}

/// Returns true if the origins form a request worth searching: at least
/// one origin, and every origin bounded in some dimension.
pub fn is_searchable(origins: &[Origin]) -> bool {
    !origins.is_empty() && origins.iter().all(|o| !o.constraint.is_unconstrained())
}

/// Intersect per-origin reachability sets.
///
/// `sets[i]` must be the reachability set of `origins[i]`. The result is
/// ordered by cluster id and skips clusters the graph has no display
/// information for.
pub fn collect_common<S: Borrow<ReachabilitySet>>(
    graph: &NetworkGraph,
    origins: &[Origin],
    sets: &[S],
) -> Vec<CommonDestination> {
    let Some(first) = sets.first() else {
        return Vec::new();
    };
    let origin_clusters: HashSet<ClusterId> = origins.iter().map(|o| o.cluster).collect();

    first
        .borrow()
        .keys()
        .filter(|cluster| !origin_clusters.contains(cluster))
        .filter(|cluster| graph.cluster(**cluster).is_some())
        .filter_map(|cluster| {
            let access = origins
                .iter()
                .zip(sets)
                .map(|(origin, set)| {
                    set.borrow().get(cluster).map(|reach| Access {
                        origin: origin.cluster,
                        transfers: reach.transfers,
                        minutes: reach.minutes,
                        max_transfers: origin.constraint.max_transfers(),
                        max_minutes: origin.constraint.max_minutes(),
                    })
                })
                .collect::<Option<Vec<_>>>()?;
            Some(CommonDestination::new(*cluster, access))
        })
        .collect()
}
