//! Station records.

use serde::Serialize;

use super::{ClusterId, LineId, RegionCode, StationId};

/// Geographic position of a station, in decimal degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A single line-specific station node.
///
/// The `lines` list is not part of the input data: the graph builder fills
/// it in by scanning which lines include this station, in line declaration
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub name: String,
    /// Phonetic reading of the name.
    pub kana: String,
    pub cluster: ClusterId,
    pub region: RegionCode,
    pub coordinates: Coordinates,
    pub lines: Vec<LineId>,
}

impl Station {
    /// Returns true if the given line calls at this station.
    pub fn is_served_by(&self, line: LineId) -> bool {
        self.lines.contains(&line)
    }
}
