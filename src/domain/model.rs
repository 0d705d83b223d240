use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One element of the inspection dataset. Only the three fields the map
/// needs are kept; everything else in the source object is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectionRecord {
    pub risk: String,
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// A record whose coordinates are not usable numbers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} value '{value}' is not a finite number")]
pub struct CoordinateParseError {
    pub field: &'static str,
    pub value: String,
}

impl InspectionRecord {
    pub fn coordinate(&self) -> std::result::Result<Coordinate, CoordinateParseError> {
        let latitude = parse_degrees("latitude", &self.latitude)?;
        let longitude = parse_degrees("longitude", &self.longitude)?;
        Ok(Coordinate::new(latitude, longitude))
    }
}

fn parse_degrees(
    field: &'static str,
    raw: &str,
) -> std::result::Result<f64, CoordinateParseError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CoordinateParseError {
            field,
            value: raw.to_string(),
        })
}

pub const DEFAULT_ZOOM: f32 = 10.0;

/// Everything a presenter needs to draw the map once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: f32,
    pub tilt: f32,
    pub bearing: f32,
    pub markers: Vec<Coordinate>,
}

impl MapView {
    pub fn new(center: Coordinate, zoom: f32, markers: Vec<Coordinate>) -> Self {
        Self {
            center,
            zoom,
            tilt: 0.0,
            bearing: 0.0,
            markers,
        }
    }
}

/// How a rendered map is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Geojson,
    Csv,
    /// Log the camera and markers instead of writing a file.
    Log,
}

impl OutputFormat {
    pub fn file_name(&self) -> Option<&'static str> {
        match self {
            OutputFormat::Geojson => Some("markers.geojson"),
            OutputFormat::Csv => Some("markers.csv"),
            OutputFormat::Log => None,
        }
    }
}
