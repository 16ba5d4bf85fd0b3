//! Immutable network graph.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::{debug, warn};

use super::{NetworkData, StationRecord};
use crate::domain::{
    ClusterId, ClusterInfo, Coordinates, Line, LineBadge, LineId, RegionCode, Station, StationId,
};

/// A one-hop move along a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub neighbor: StationId,
    pub line: LineId,
}

/// The rail network: stations, lines, clusters and per-station adjacency.
///
/// Built once with [`NetworkGraph::build`] and read-only afterwards.
#[derive(Debug, Default)]
pub struct NetworkGraph {
    stations: HashMap<StationId, Station>,
    lines: HashMap<LineId, Line>,
    /// Member stations of each cluster, in station declaration order.
    clusters: HashMap<ClusterId, Vec<StationId>>,
    cluster_info: HashMap<ClusterId, ClusterInfo>,
    adjacency: HashMap<StationId, Vec<Edge>>,
    region_names: BTreeMap<RegionCode, String>,
}

impl NetworkGraph {
    /// Build the graph from a dataset.
    ///
    /// Construction is tolerant of inconsistent input: a line that lists an
    /// unknown station keeps the reference in its own sequence, but no edge
    /// is created to or from it. A station that no line serves simply has
    /// no edges.
    pub fn build(data: NetworkData) -> Self {
        let NetworkData {
            lines: line_records,
            stations: station_records,
            circular,
            region_names,
        } = data;

        let circular: HashSet<LineId> = circular.into_iter().collect();

        let mut stations: HashMap<StationId, Station> = HashMap::new();
        let mut clusters: HashMap<ClusterId, Vec<StationId>> = HashMap::new();
        for record in station_records {
            if stations.contains_key(&record.id) {
                warn!(station = %record.id, "duplicate station record ignored");
                continue;
            }
            clusters.entry(record.cluster).or_default().push(record.id);
            stations.insert(record.id, station_from_record(record));
        }

        let mut lines: HashMap<LineId, Line> = HashMap::new();
        let mut line_order: Vec<LineId> = Vec::new();
        for record in line_records {
            if lines.contains_key(&record.id) {
                warn!(line = %record.id, "duplicate line record ignored");
                continue;
            }
            line_order.push(record.id);
            lines.insert(
                record.id,
                Line {
                    id: record.id,
                    circular: circular.contains(&record.id),
                    name: record.name,
                    color: record.color,
                    stations: record.stations,
                    interval: record.interval.filter(|i| i.is_finite() && *i > 0.0),
                },
            );
        }

        let mut adjacency: HashMap<StationId, Vec<Edge>> = HashMap::new();
        for line_id in &line_order {
            let Some(line) = lines.get(line_id) else {
                continue;
            };

            let mut unknown = 0usize;
            for sid in &line.stations {
                match stations.get_mut(sid) {
                    Some(station) => {
                        if !station.is_served_by(*line_id) {
                            station.lines.push(*line_id);
                        }
                    }
                    None => unknown += 1,
                }
            }
            if unknown > 0 {
                warn!(
                    line = %line_id,
                    name = %line.name,
                    unknown,
                    "line references unknown stations; their edges are omitted"
                );
            }

            let mut connect = |a: StationId, b: StationId| {
                if stations.contains_key(&a) && stations.contains_key(&b) {
                    adjacency.entry(a).or_default().push(Edge {
                        neighbor: b,
                        line: *line_id,
                    });
                    adjacency.entry(b).or_default().push(Edge {
                        neighbor: a,
                        line: *line_id,
                    });
                }
            };

            for pair in line.stations.windows(2) {
                connect(pair[0], pair[1]);
            }
            if line.wraps_around()
                && let (Some(first), Some(last)) = (line.stations.first(), line.stations.last())
            {
                connect(*first, *last);
            }
        }

        let cluster_info = clusters
            .iter()
            .filter_map(|(cid, members)| {
                describe_cluster(*cid, members, &stations, &lines).map(|info| (*cid, info))
            })
            .collect();

        debug!(
            stations = stations.len(),
            lines = lines.len(),
            clusters = clusters.len(),
            "network graph built"
        );

        Self {
            stations,
            lines,
            clusters,
            cluster_info,
            adjacency,
            region_names,
        }
    }

    /// Look up a station by id.
    pub fn station(&self, id: StationId) -> Option<&Station> {
        self.stations.get(&id)
    }

    /// Look up a line by id.
    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(&id)
    }

    /// Member stations of a cluster; empty for unknown clusters.
    pub fn cluster_members(&self, id: ClusterId) -> &[StationId] {
        self.clusters.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Display information for a cluster.
    pub fn cluster(&self, id: ClusterId) -> Option<&ClusterInfo> {
        self.cluster_info.get(&id)
    }

    /// The cluster a station belongs to.
    pub fn cluster_of(&self, station: StationId) -> Option<ClusterId> {
        self.stations.get(&station).map(|s| s.cluster)
    }

    /// One-hop moves from a station; empty for stations no line serves.
    pub fn edges(&self, station: StationId) -> &[Edge] {
        self.adjacency
            .get(&station)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Human-readable name of a region, if the dataset supplied one.
    pub fn region_name(&self, region: RegionCode) -> Option<&str> {
        self.region_names.get(&region).map(String::as_str)
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }
}

fn station_from_record(record: StationRecord) -> Station {
    Station {
        id: record.id,
        name: record.name,
        kana: record.kana,
        cluster: record.cluster,
        region: record.region,
        coordinates: Coordinates::new(record.lat.unwrap_or(0.0), record.lon.unwrap_or(0.0)),
        lines: Vec::new(),
    }
}

/// Derive display info for a cluster from its first member and the union
/// of lines serving its members.
fn describe_cluster(
    id: ClusterId,
    members: &[StationId],
    stations: &HashMap<StationId, Station>,
    lines: &HashMap<LineId, Line>,
) -> Option<ClusterInfo> {
    let first = stations.get(members.first()?)?;

    let mut seen = HashSet::new();
    let badges = members
        .iter()
        .filter_map(|sid| stations.get(sid))
        .flat_map(|s| s.lines.iter().copied())
        .filter(|lid| seen.insert(*lid))
        .filter_map(|lid| lines.get(&lid))
        .map(|line| LineBadge {
            id: line.id,
            name: line.name.clone(),
            color: line.color.clone(),
        })
        .collect();

    Some(ClusterInfo {
        id,
        name: first.name.clone(),
        kana: first.kana.clone(),
        region: first.region,
        lines: badges,
        stations: members.to_vec(),
    })
}
