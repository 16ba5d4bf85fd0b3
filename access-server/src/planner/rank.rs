//! Ordering and filtering of common destinations.

use std::cmp::Ordering;

use serde::Deserialize;

use super::common::CommonDestination;
use crate::domain::{ClusterId, RegionCode};
use crate::network::NetworkGraph;

/// What to sort destinations by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Cluster display name.
    Name,
    /// Worst transfer count over origins, then total minutes.
    Transfers,
    /// Best minutes over origins, then total minutes.
    #[default]
    MinMinutes,
    /// Total (equivalently, average) minutes, then best minutes.
    AvgMinutes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

/// Ranking options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RankOptions {
    pub key: SortKey,
    pub direction: SortDirection,
    /// When set, `Transfers` and `MinMinutes` compare this origin's own
    /// access instead of the aggregates.
    pub focus_origin: Option<ClusterId>,
}

/// Sort destinations by the given options. The sort is stable.
pub fn rank_destinations(
    mut entries: Vec<CommonDestination>,
    options: &RankOptions,
    graph: &NetworkGraph,
) -> Vec<CommonDestination> {
    entries.sort_by(|a, b| {
        let ord = compare(a, b, options, graph);
        match options.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    entries
}

fn compare(
    a: &CommonDestination,
    b: &CommonDestination,
    options: &RankOptions,
    graph: &NetworkGraph,
) -> Ordering {
    if let Some(origin) = options.focus_origin {
        match options.key {
            SortKey::Transfers => {
                return missing_last(
                    a.access_from(origin).map(|x| f64::from(x.transfers)),
                    b.access_from(origin).map(|x| f64::from(x.transfers)),
                );
            }
            SortKey::MinMinutes => {
                return missing_last(
                    a.access_from(origin).map(|x| x.minutes),
                    b.access_from(origin).map(|x| x.minutes),
                );
            }
            SortKey::Name | SortKey::AvgMinutes => {}
        }
    }

    match options.key {
        SortKey::Transfers => a
            .max_transfers
            .cmp(&b.max_transfers)
            .then_with(|| a.total_minutes.total_cmp(&b.total_minutes)),
        SortKey::MinMinutes => a
            .min_minutes
            .total_cmp(&b.min_minutes)
            .then_with(|| a.total_minutes.total_cmp(&b.total_minutes)),
        SortKey::AvgMinutes => a
            .total_minutes
            .total_cmp(&b.total_minutes)
            .then_with(|| a.min_minutes.total_cmp(&b.min_minutes)),
        SortKey::Name => {
            let name = |d: &CommonDestination| graph.cluster(d.cluster).map(|c| c.name.as_str());
            name(a).cmp(&name(b))
        }
    }
}

fn missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Keep only destinations whose cluster lies in `region`.
pub fn filter_region(
    entries: Vec<CommonDestination>,
    region: RegionCode,
    graph: &NetworkGraph,
) -> Vec<CommonDestination> {
    entries
        .into_iter()
        .filter(|d| graph.cluster(d.cluster).is_some_and(|c| c.region == region))
        .collect()
}

/// Distinct regions of the given destinations, ascending.
pub fn regions_present(entries: &[CommonDestination], graph: &NetworkGraph) -> Vec<RegionCode> {
    let mut regions: Vec<RegionCode> = entries
        .iter()
        .filter_map(|d| graph.cluster(d.cluster).map(|c| c.region))
        .collect();
    regions.sort();
    regions.dedup();
    regions
}
