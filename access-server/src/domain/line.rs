//! Line records.

use super::{LineId, StationId};

/// A transit line: an ordered sequence of stations with a per-hop
/// travel interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: LineId,
    pub name: String,
    /// Hex colour without the leading `#`.
    pub color: String,
    /// Station sequence as declared, including any ids the dataset does
    /// not otherwise define.
    pub stations: Vec<StationId>,
    /// Average minutes between consecutive stations, if the dataset
    /// specified a usable one.
    pub interval: Option<f64>,
    /// The last station is also adjacent to the first.
    pub circular: bool,
}

impl Line {
    /// Minutes per hop, falling back to `default` when the dataset gave none.
    pub fn interval_or(&self, default: f64) -> f64 {
        self.interval.unwrap_or(default)
    }

    /// Returns true if the wraparound edge between the last and first
    /// station exists.
    ///
    /// A "circle" of two stations already has its only edge, so the
    /// wraparound only applies from three stations up.
    pub fn wraps_around(&self) -> bool {
        self.circular && self.stations.len() > 2
    }
}
