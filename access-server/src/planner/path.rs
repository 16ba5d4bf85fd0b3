//! Single best route between two clusters.
//!
//! Runs the same exploration as reachability search, but remembers how
//! each state was reached and stops as soon as nothing left in the queue
//! can beat the best arrival at the target.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::config::SearchConfig;
use super::explore::{Caps, Exploration, Predecessor, StateKey};
use super::reachable::Reach;
use crate::domain::{ClusterId, Constraint, LineId, StationId};
use crate::network::NetworkGraph;

/// One station along a found route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    pub station: StationId,
    /// Line ridden (or boarded by transfer) to reach this station; `None`
    /// for the starting station.
    pub line: Option<LineId>,
    /// This step is a change of line rather than a ride.
    pub via_transfer: bool,
}

/// A route found by [`find_path`], in travel order.
#[derive(Debug, Clone, PartialEq)]
pub struct FoundPath {
    pub steps: Vec<PathStep>,
    pub total_minutes: f64,
    pub transfers: u32,
}

/// Find the best route from `origin` to `target` within `constraint`.
///
/// Returns `None` if either cluster has no member stations or the target
/// can't be reached within the caps. Absent caps fall back to the
/// configured defaults.
pub fn find_path(
    graph: &NetworkGraph,
    config: &SearchConfig,
    origin: ClusterId,
    target: ClusterId,
    constraint: &Constraint,
) -> Option<FoundPath> {
    if graph.cluster_members(origin).is_empty() || graph.cluster_members(target).is_empty() {
        return None;
    }
    let targets: HashSet<StationId> = graph.cluster_members(target).iter().copied().collect();

    let mut exploration = Exploration::new(graph, config, Caps::resolve(constraint, config));
    exploration.seed(origin);

    let mut predecessors: HashMap<StateKey, Predecessor> = HashMap::new();
    let mut found: Option<(StateKey, Reach)> = None;

    while let Some(current) = exploration.pop() {
        if found.is_some_and(|(_, best)| current.cost > best.minutes) {
            break;
        }
        if !exploration.accepts(&current) {
            continue;
        }

        if targets.contains(&current.station) {
            let reach = Reach {
                transfers: current.transfers,
                minutes: current.cost,
            };
            if found.is_none_or(|(_, best)| reach.improves_on(&best)) {
                found = Some((StateKey::of(&current), reach));
            }
        }

        exploration.expand(&current, |key, pred| {
            predecessors.insert(key, pred);
        });
    }

    debug!(
        %origin,
        %target,
        found = found.is_some(),
        states = exploration.states(),
        popped = exploration.popped(),
        "path search complete"
    );

    let (terminal, reach) = found?;
    Some(FoundPath {
        steps: reconstruct(terminal, &predecessors),
        total_minutes: reach.minutes,
        transfers: reach.transfers,
    })
}

/// Walk predecessor links back from `terminal` to a seed state and return
/// the steps in travel order.
fn reconstruct(terminal: StateKey, predecessors: &HashMap<StateKey, Predecessor>) -> Vec<PathStep> {
    let mut steps = Vec::new();
    let mut key = terminal;

    // Every link lowers the cost or the transfer count, so the chain ends at
    // a seed; the bound only guards against a corrupted table.
    for _ in 0..=predecessors.len() {
        match predecessors.get(&key) {
            Some(pred) => {
                steps.push(PathStep {
                    station: key.station,
                    line: Some(pred.line),
                    via_transfer: pred.via_transfer,
                });
                key = pred.from;
            }
            None => {
                steps.push(PathStep {
                    station: key.station,
                    line: None,
                    via_transfer: false,
                });
                break;
            }
        }
    }

    steps.reverse();
    steps
}
