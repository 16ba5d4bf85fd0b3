//! Cluster display information.

use serde::Serialize;

use super::{ClusterId, LineId, RegionCode, StationId};

/// A line serving a cluster, as shown next to the cluster's name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineBadge {
    pub id: LineId,
    pub name: String,
    pub color: String,
}

/// Derived information about a cluster (a real-world station).
///
/// Name, kana and region come from the first member station; `lines` is
/// the union of lines serving any member, in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterInfo {
    pub id: ClusterId,
    pub name: String,
    pub kana: String,
    pub region: RegionCode,
    pub lines: Vec<LineBadge>,
    pub stations: Vec<StationId>,
}
