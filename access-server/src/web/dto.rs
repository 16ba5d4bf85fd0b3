//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{ClusterId, RegionCode};
use crate::network::NetworkGraph;
use crate::planner::{CommonDestination, SortDirection, SortKey};

/// One starting cluster of a reachability request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginRequest {
    pub cluster_id: ClusterId,

    /// Maximum number of line changes
    pub max_transfers: Option<u32>,

    /// Maximum travel time in minutes
    pub max_minutes: Option<f64>,
}

/// Request for destinations reachable from every origin.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReachableRequest {
    pub origins: Vec<OriginRequest>,

    #[serde(default)]
    pub sort: SortKey,

    #[serde(default)]
    pub direction: SortDirection,

    /// Rank by this origin's own access rather than the aggregates
    pub focus_origin: Option<ClusterId>,

    /// Only return destinations in this region
    pub region: Option<RegionCode>,
}

/// A destination in reachability results.
#[derive(Debug, Serialize)]
pub struct DestinationResult {
    /// Cluster display name
    pub name: String,

    pub region: RegionCode,

    #[serde(flatten)]
    pub destination: CommonDestination,
}

impl DestinationResult {
    /// Attach display details; `None` if the cluster is unknown to the graph.
    pub fn describe(destination: CommonDestination, graph: &NetworkGraph) -> Option<Self> {
        let info = graph.cluster(destination.cluster)?;
        Some(Self {
            name: info.name.clone(),
            region: info.region,
            destination,
        })
    }
}

/// A region present in reachability results.
#[derive(Debug, Serialize)]
pub struct RegionResult {
    pub code: RegionCode,

    /// Display name, if the dataset provides one
    pub name: Option<String>,
}

/// Response to a reachability request.
#[derive(Debug, Serialize)]
pub struct ReachableResponse {
    pub destinations: Vec<DestinationResult>,

    /// Regions of all common destinations, before any region filter
    pub regions: Vec<RegionResult>,
}

/// Query for a route between two clusters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteQuery {
    pub from: ClusterId,
    pub to: ClusterId,
    pub max_transfers: Option<u32>,
    pub max_minutes: Option<f64>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
