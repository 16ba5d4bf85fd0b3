//! Label-constrained exploration shared by reachability and path search.
//!
//! A search state is keyed by `(station, transfers so far)`, not by station
//! alone: the same station reached with fewer transfers at a higher cost
//! and with more transfers at a lower cost are both live. The best-known
//! cost per key only ever decreases, and an entry popped with a cost above
//! the recorded best for its key is stale and skipped.

use std::collections::HashMap;

use tracing::trace;

use super::config::SearchConfig;
use super::queue::{FrontierEntry, FrontierQueue};
use crate::domain::{ClusterId, Constraint, LineId, StationId};
use crate::network::NetworkGraph;

/// Composite key for best-cost and predecessor tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub station: StationId,
    pub transfers: u32,
}

impl StateKey {
    pub fn new(station: StationId, transfers: u32) -> Self {
        Self { station, transfers }
    }

    pub fn of(entry: &FrontierEntry) -> Self {
        Self::new(entry.station, entry.transfers)
    }
}

/// How a state was first reached at its best cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predecessor {
    /// The state the move started from.
    pub from: StateKey,
    /// The line ridden into this state, or boarded by the transfer.
    pub line: LineId,
    pub via_transfer: bool,
}

/// Concrete caps for one search, with absent caps filled from the config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Caps {
    pub max_transfers: u32,
    pub max_minutes: f64,
}

impl Caps {
    pub fn resolve(constraint: &Constraint, config: &SearchConfig) -> Self {
        Self {
            max_transfers: constraint
                .max_transfers()
                .unwrap_or(config.fallback_max_transfers),
            max_minutes: constraint
                .max_minutes()
                .unwrap_or(config.fallback_max_minutes),
        }
    }
}

/// Per-call search state: the frontier queue and the best-cost table.
pub struct Exploration<'a> {
    graph: &'a NetworkGraph,
    config: &'a SearchConfig,
    caps: Caps,
    queue: FrontierQueue,
    best: HashMap<StateKey, f64>,
    popped: usize,
}

impl<'a> Exploration<'a> {
    pub fn new(graph: &'a NetworkGraph, config: &'a SearchConfig, caps: Caps) -> Self {
        Self {
            graph,
            config,
            caps,
            queue: FrontierQueue::new(),
            best: HashMap::new(),
            popped: 0,
        }
    }

    /// Push a zero-cost, zero-transfer state for every line serving every
    /// member station of `cluster`. Returns the number of seeds pushed.
    pub fn seed(&mut self, cluster: ClusterId) -> usize {
        let graph = self.graph;
        let mut seeded = 0;
        for sid in graph.cluster_members(cluster) {
            let Some(station) = graph.station(*sid) else {
                continue;
            };
            for line in &station.lines {
                self.best.insert(StateKey::new(*sid, 0), 0.0);
                self.queue.push(FrontierEntry {
                    station: *sid,
                    line: *line,
                    transfers: 0,
                    cost: 0.0,
                });
                seeded += 1;
            }
        }
        seeded
    }

    /// Remove the cheapest entry from the frontier, stale or not.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        let entry = self.queue.pop()?;
        self.popped += 1;
        Some(entry)
    }

    /// Returns true if the entry is within caps and not superseded by a
    /// cheaper cost already recorded for its key.
    pub fn accepts(&self, entry: &FrontierEntry) -> bool {
        if entry.transfers > self.caps.max_transfers || entry.cost > self.caps.max_minutes {
            return false;
        }
        !self
            .best
            .get(&StateKey::of(entry))
            .is_some_and(|best| *best < entry.cost)
    }

    /// Expand an accepted state by riding its line one hop in either
    /// direction and by transferring to any other (station, line) pair in
    /// its cluster.
    ///
    /// `on_improve` is called for every key whose best cost this expansion
    /// lowered, with the move that lowered it.
    pub fn expand(
        &mut self,
        current: &FrontierEntry,
        mut on_improve: impl FnMut(StateKey, Predecessor),
    ) {
        let graph = self.graph;
        let from = StateKey::of(current);

        trace!(
            station = %current.station,
            line = %current.line,
            transfers = current.transfers,
            cost = current.cost,
            "expanding state"
        );

        let interval = graph
            .line(current.line)
            .map_or(self.config.default_interval, |l| {
                l.interval_or(self.config.default_interval)
            });
        for edge in graph.edges(current.station) {
            if edge.line != current.line {
                continue;
            }
            let next = FrontierEntry {
                station: edge.neighbor,
                line: current.line,
                transfers: current.transfers,
                cost: current.cost + interval,
            };
            if self.offer(next) {
                on_improve(
                    StateKey::of(&next),
                    Predecessor {
                        from,
                        line: current.line,
                        via_transfer: false,
                    },
                );
            }
        }

        let transfers = current.transfers + 1;
        if transfers > self.caps.max_transfers {
            return;
        }
        let Some(cluster) = graph.cluster_of(current.station) else {
            return;
        };
        for sid in graph.cluster_members(cluster) {
            let Some(station) = graph.station(*sid) else {
                continue;
            };
            for line in &station.lines {
                if *sid == current.station && *line == current.line {
                    continue;
                }
                let next = FrontierEntry {
                    station: *sid,
                    line: *line,
                    transfers,
                    cost: current.cost + self.config.transfer_minutes,
                };
                if self.offer(next) {
                    on_improve(
                        StateKey::of(&next),
                        Predecessor {
                            from,
                            line: *line,
                            via_transfer: true,
                        },
                    );
                }
            }
        }
    }

    /// Push `next` if it fits the minutes cap and strictly improves the best
    /// cost recorded for its key.
    fn offer(&mut self, next: FrontierEntry) -> bool {
        if next.cost > self.caps.max_minutes {
            return false;
        }
        let key = StateKey::of(&next);
        if self.best.get(&key).is_some_and(|best| *best <= next.cost) {
            return false;
        }
        self.best.insert(key, next.cost);
        self.queue.push(next);
        true
    }

    /// Number of entries popped so far, stale ones included.
    pub fn popped(&self) -> usize {
        self.popped
    }

    /// Number of distinct states with a recorded cost.
    pub fn states(&self) -> usize {
        self.best.len()
    }
}
