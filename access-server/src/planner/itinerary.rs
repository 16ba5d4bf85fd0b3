//! Itinerary construction.
//!
//! Turns the station-by-station steps of a found route into ride
//! segments: maximal runs on one line between transfers.

use serde::Serialize;

use super::path::PathStep;
use crate::domain::LineId;
use crate::network::NetworkGraph;

/// Name shown for a line the graph can't resolve.
pub const UNKNOWN_LINE_NAME: &str = "?";

/// Colour shown for a line the graph can't resolve.
pub const UNKNOWN_LINE_COLOR: &str = "999999";

/// A station as shown in an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopView {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// A contiguous ride on a single line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideSegment {
    pub line_id: Option<LineId>,
    pub line_name: String,
    pub line_color: String,
    pub stations: Vec<StopView>,
}

/// A route ready for presentation.
///
/// Consecutive segments are separated by exactly one transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub total_minutes: f64,
    pub total_transfers: u32,
    pub segments: Vec<RideSegment>,
}

impl Itinerary {
    /// Group path steps into ride segments.
    ///
    /// A new segment opens at the first step and at every transfer step.
    /// The first step of a route carries no line of its own, so its segment
    /// takes the line of the step after it. Steps at stations the graph
    /// doesn't know are dropped.
    pub fn build(steps: &[PathStep], total_minutes: f64, graph: &NetworkGraph) -> Self {
        let mut segments: Vec<RideSegment> = Vec::new();
        let mut current: Option<RideSegment> = None;

        for (i, step) in steps.iter().enumerate() {
            let Some(station) = graph.station(step.station) else {
                continue;
            };
            let stop = StopView {
                name: station.name.clone(),
                lat: station.coordinates.lat,
                lon: station.coordinates.lon,
            };

            if i == 0 || step.via_transfer {
                segments.extend(current.take());
                let line_id = step
                    .line
                    .or_else(|| steps.get(i + 1).and_then(|next| next.line));
                let line = line_id.and_then(|id| graph.line(id));
                current = Some(RideSegment {
                    line_id,
                    line_name: line.map_or_else(|| UNKNOWN_LINE_NAME.to_string(), |l| l.name.clone()),
                    line_color: line
                        .map_or_else(|| UNKNOWN_LINE_COLOR.to_string(), |l| l.color.clone()),
                    stations: vec![stop],
                });
            } else if let Some(segment) = current.as_mut() {
                segment.stations.push(stop);
            }
        }
        segments.extend(current);

        Self {
            total_minutes,
            total_transfers: segments.len().saturating_sub(1) as u32,
            segments,
        }
    }

    /// Number of stations visited, counting each transfer station once per
    /// segment it appears in.
    pub fn stop_count(&self) -> usize {
        self.segments.iter().map(|s| s.stations.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClusterId, RegionCode, StationId};
    use crate::network::{LineRecord, NetworkData, StationRecord};

    fn graph() -> NetworkGraph {
        let line = |id: u32, name: &str, stations: &[u32]| LineRecord {
            id: LineId::new(id),
            name: name.into(),
            color: format!("{id}{id}{id}{id}{id}{id}"),
            stations: stations.iter().copied().map(StationId::new).collect(),
            interval: None,
        };
        let station = |id: u32, name: &str, cluster: u32| StationRecord {
            id: StationId::new(id),
            name: name.into(),
            kana: String::new(),
            cluster: ClusterId::new(cluster),
            region: RegionCode::new(13),
            lat: Some(35.0 + f64::from(id) / 100.0),
            lon: Some(139.0),
        };
        NetworkGraph::build(NetworkData {
            lines: vec![line(1, "Red", &[1, 2, 3]), line(2, "Blue", &[4, 5])],
            stations: vec![
                station(1, "Alpha", 10),
                station(2, "Bravo", 20),
                station(3, "Charlie", 30),
                station(4, "Charlie", 30),
                station(5, "Delta", 50),
            ],
            ..Default::default()
        })
    }

    fn step(station: u32, line: Option<u32>, via_transfer: bool) -> PathStep {
        PathStep {
            station: StationId::new(station),
            line: line.map(LineId::new),
            via_transfer,
        }
    }

    fn names(segment: &RideSegment) -> Vec<&str> {
        segment.stations.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn single_line_is_one_segment() {
        let graph = graph();
        let steps = [step(1, None, false), step(2, Some(1), false), step(3, Some(1), false)];

        let itinerary = Itinerary::build(&steps, 5.0, &graph);

        assert_eq!(itinerary.segments.len(), 1);
        assert_eq!(itinerary.total_transfers, 0);
        assert_eq!(itinerary.total_minutes, 5.0);
        let seg = &itinerary.segments[0];
        assert_eq!(seg.line_id, Some(LineId::new(1)));
        assert_eq!(seg.line_name, "Red");
        assert_eq!(seg.line_color, "111111");
        assert_eq!(names(seg), vec!["Alpha", "Bravo", "Charlie"]);
        assert_eq!(seg.stations[0].lon, 139.0);
    }

    #[test]
    fn transfer_opens_new_segment() {
        let graph = graph();
        let steps = [
            step(1, None, false),
            step(2, Some(1), false),
            step(3, Some(1), false),
            step(4, Some(2), true),
            step(5, Some(2), false),
        ];

        let itinerary = Itinerary::build(&steps, 12.5, &graph);

        assert_eq!(itinerary.segments.len(), 2);
        assert_eq!(itinerary.total_transfers, 1);
        assert_eq!(names(&itinerary.segments[0]), vec!["Alpha", "Bravo", "Charlie"]);
        assert_eq!(names(&itinerary.segments[1]), vec!["Charlie", "Delta"]);
        assert_eq!(itinerary.segments[1].line_name, "Blue");
        assert_eq!(itinerary.stop_count(), 5);
    }

    #[test]
    fn unresolvable_line_uses_placeholder() {
        let graph = graph();
        let steps = [step(1, None, false), step(2, Some(77), false)];

        let itinerary = Itinerary::build(&steps, 2.5, &graph);

        let seg = &itinerary.segments[0];
        assert_eq!(seg.line_id, Some(LineId::new(77)));
        assert_eq!(seg.line_name, UNKNOWN_LINE_NAME);
        assert_eq!(seg.line_color, UNKNOWN_LINE_COLOR);
    }

    #[test]
    fn lone_starting_step_has_no_line() {
        let graph = graph();
        let itinerary = Itinerary::build(&[step(1, None, false)], 0.0, &graph);

        assert_eq!(itinerary.segments.len(), 1);
        assert_eq!(itinerary.segments[0].line_id, None);
        assert_eq!(itinerary.segments[0].line_name, "?");
        assert_eq!(itinerary.total_transfers, 0);
    }

    #[test]
    fn empty_steps_make_empty_itinerary() {
        let graph = graph();
        let itinerary = Itinerary::build(&[], 0.0, &graph);
        assert!(itinerary.segments.is_empty());
        assert_eq!(itinerary.total_transfers, 0);
    }

    #[test]
    fn serializes_in_camel_case() {
        let graph = graph();
        let steps = [step(1, None, false), step(2, Some(1), false)];
        let json = serde_json::to_value(Itinerary::build(&steps, 2.5, &graph)).unwrap();

        assert_eq!(json["totalMinutes"], 2.5);
        assert_eq!(json["totalTransfers"], 0);
        assert_eq!(json["segments"][0]["lineId"], 1);
        assert_eq!(json["segments"][0]["lineName"], "Red");
        assert_eq!(json["segments"][0]["stations"][1]["name"], "Bravo");
    }
}
