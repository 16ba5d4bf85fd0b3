//! Input records consumed by the graph builder.
//!
//! The dataset stores lines and stations as positional JSON arrays:
//!
//! ```text
//! lines:    [id, "name", "color", [station ids...], interval?]
//! stations: [id, "name", "kana", clusterId, region, lat?, lon?]
//! ```
//!
//! Trailing optional elements may be omitted or `null`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::de::{self, Expected, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use super::NetworkError;
use crate::domain::{ClusterId, LineId, RegionCode, StationId};

/// A line definition.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRecord {
    pub id: LineId,
    pub name: String,
    pub color: String,
    pub stations: Vec<StationId>,
    pub interval: Option<f64>,
}

/// A station definition.
#[derive(Debug, Clone, PartialEq)]
pub struct StationRecord {
    pub id: StationId,
    pub name: String,
    pub kana: String,
    pub cluster: ClusterId,
    pub region: RegionCode,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Read a required tuple element.
fn required<'de, A, T>(seq: &mut A, index: usize, exp: &dyn Expected) -> Result<T, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    seq.next_element()?
        .ok_or_else(|| de::Error::invalid_length(index, exp))
}

/// Read a trailing element that may be omitted or `null`.
fn optional<'de, A, T>(seq: &mut A) -> Result<Option<T>, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    Ok(seq.next_element::<Option<T>>()?.flatten())
}

impl<'de> Deserialize<'de> for LineRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LineVisitor;

        impl<'de> Visitor<'de> for LineVisitor {
            type Value = LineRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a line array [id, name, color, stations, interval?]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<LineRecord, A::Error> {
                Ok(LineRecord {
                    id: required(&mut seq, 0, &self)?,
                    name: required(&mut seq, 1, &self)?,
                    color: required(&mut seq, 2, &self)?,
                    stations: required(&mut seq, 3, &self)?,
                    interval: optional(&mut seq)?,
                })
            }
        }

        deserializer.deserialize_seq(LineVisitor)
    }
}

impl<'de> Deserialize<'de> for StationRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StationVisitor;

        impl<'de> Visitor<'de> for StationVisitor {
            type Value = StationRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a station array [id, name, kana, cluster, region, lat?, lon?]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<StationRecord, A::Error> {
                Ok(StationRecord {
                    id: required(&mut seq, 0, &self)?,
                    name: required(&mut seq, 1, &self)?,
                    kana: required(&mut seq, 2, &self)?,
                    cluster: required(&mut seq, 3, &self)?,
                    region: required(&mut seq, 4, &self)?,
                    lat: optional(&mut seq)?,
                    lon: optional(&mut seq)?,
                })
            }
        }

        deserializer.deserialize_seq(StationVisitor)
    }
}

/// A complete network dataset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkData {
    pub lines: Vec<LineRecord>,
    pub stations: Vec<StationRecord>,
    /// Lines whose last station is also adjacent to their first.
    #[serde(default)]
    pub circular: Vec<LineId>,
    #[serde(default)]
    pub region_names: BTreeMap<RegionCode, String>,
}

impl NetworkData {
    /// Parse a dataset from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, NetworkError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a dataset file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "lines": [
            [11302, "Yamanote", "9ACD32", [1130201, 1130202, 1130203], 2.1],
            [11312, "Chuo Rapid", "F15A22", [1131201, 1131202]],
            [99, "Shuttle", "000000", [1130201, 1130203], null]
        ],
        "stations": [
            [1130201, "Tokyo", "トウキョウ", 1130101, 13, 35.681, 139.767],
            [1130202, "Kanda", "カンダ", 1130102, 13],
            [1130203, "Akihabara", "アキハバラ", 1130103, 13, null, null],
            [1131201, "Tokyo", "トウキョウ", 1130101, 13, 35.681, 139.766]
        ],
        "circular": [11302],
        "regionNames": { "13": "Tokyo" }
    }"#;

    #[test]
    fn parses_positional_records() {
        let data = NetworkData::from_json_str(SAMPLE).unwrap();

        assert_eq!(data.lines.len(), 3);
        assert_eq!(data.lines[0].id, LineId::new(11302));
        assert_eq!(data.lines[0].interval, Some(2.1));
        assert_eq!(data.lines[0].stations.len(), 3);

        assert_eq!(data.stations.len(), 4);
        assert_eq!(data.stations[0].cluster, ClusterId::new(1130101));
        assert_eq!(data.stations[0].lat, Some(35.681));
        assert_eq!(data.circular, vec![LineId::new(11302)]);
        assert_eq!(
            data.region_names.get(&RegionCode::new(13)).map(String::as_str),
            Some("Tokyo")
        );
    }

    #[test]
    fn trailing_optionals_may_be_missing_or_null() {
        let data = NetworkData::from_json_str(SAMPLE).unwrap();

        assert_eq!(data.lines[1].interval, None);
        assert_eq!(data.lines[2].interval, None);
        assert_eq!(data.stations[1].lat, None);
        assert_eq!(data.stations[1].lon, None);
        assert_eq!(data.stations[2].lat, None);
    }

    #[test]
    fn circular_and_region_names_default_to_empty() {
        let data = NetworkData::from_json_str(r#"{"lines": [], "stations": []}"#).unwrap();
        assert!(data.circular.is_empty());
        assert!(data.region_names.is_empty());
    }

    #[test]
    fn rejects_short_station_tuple() {
        let json = r#"{"lines": [], "stations": [[1, "A", "エー", 1]]}"#;
        assert!(matches!(
            NetworkData::from_json_str(json),
            Err(NetworkError::Json(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let data = NetworkData::from_json_file(&path).unwrap();
        assert_eq!(data.stations.len(), 4);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.json");

        let err = NetworkData::from_json_file(&path).unwrap_err();
        assert!(matches!(err, NetworkError::Io { .. }));
        assert!(err.to_string().contains("absent.json"));
    }
}
