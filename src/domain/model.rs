use crate::core::geo::{self, DEFAULT_PRECISION, LATITUDE_RANGE, LONGITUDE_RANGE};
use crate::utils::error::CoordinateError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// A latitude/longitude pair known to be within range.
///
/// Fields are private so a coordinate can only be replaced as a whole,
/// never half-updated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::from_parts(raw.latitude, raw.longitude)
    }
}

fn check_range(field: &'static str, value: f64, (min, max): (f64, f64)) -> Result<f64, CoordinateError> {
    if value >= min && value <= max {
        Ok(value)
    } else {
        Err(CoordinateError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

impl Coordinate {
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        Ok(Self {
            latitude: check_range("latitude", latitude, LATITUDE_RANGE)?,
            longitude: check_range("longitude", longitude, LONGITUDE_RANGE)?,
        })
    }

    /// Builds a coordinate from possibly-unset values, reporting a missing
    /// field separately from an out-of-range one. Latitude is checked first.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Result<Self, CoordinateError> {
        let latitude = latitude.ok_or(CoordinateError::Missing { field: "latitude" })?;
        let longitude = longitude.ok_or(CoordinateError::Missing { field: "longitude" })?;
        Self::try_new(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn with_latitude(self, latitude: f64) -> Result<Self, CoordinateError> {
        Self::try_new(latitude, self.longitude)
    }

    pub fn with_longitude(self, longitude: f64) -> Result<Self, CoordinateError> {
        Self::try_new(self.latitude, longitude)
    }

    pub fn distance_km_to(&self, other: &Coordinate) -> f64 {
        geo::haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    pub fn format(&self, precision: usize) -> String {
        geo::format_coordinates(self.latitude, self.longitude, precision)
    }

    pub fn map_url(&self, zoom: Option<u8>) -> String {
        // In range by construction, so the builder always produces a link.
        geo::to_map_url(Some(self.latitude), Some(self.longitude), zoom).unwrap_or_default()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(DEFAULT_PRECISION))
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    /// Parses `"lat,lon"`, whitespace around either part allowed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = |reason: String| CoordinateError::Parse {
            input: s.to_string(),
            reason,
        };

        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| parse_error("expected 'latitude,longitude'".to_string()))?;
        if lon.contains(',') {
            return Err(parse_error("expected exactly two values".to_string()));
        }

        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| parse_error(format!("latitude: {}", e)))?;
        let longitude = lon
            .trim()
            .parse::<f64>()
            .map_err(|e| parse_error(format!("longitude: {}", e)))?;

        Self::try_new(latitude, longitude)
    }
}

/// A parsed map deep link: where it points and, optionally, how far zoomed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapLink {
    pub coordinate: Coordinate,
    pub zoom: Option<u8>,
}

impl MapLink {
    /// Reads links of the form `https://www.google.com/maps?q=LAT,LON[&z=ZOOM]`.
    pub fn parse(input: &str) -> Result<Self, CoordinateError> {
        let parse_error = |reason: String| CoordinateError::Parse {
            input: input.to_string(),
            reason,
        };

        let url = Url::parse(input.trim()).map_err(|e| parse_error(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(parse_error(format!("unsupported scheme {}", url.scheme())));
        }

        let mut coordinate = None;
        let mut zoom = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "q" | "query" => coordinate = Some(value.parse::<Coordinate>()?),
                "z" => {
                    zoom = Some(
                        value
                            .parse::<u8>()
                            .map_err(|e| parse_error(format!("zoom: {}", e)))?,
                    )
                }
                _ => {}
            }
        }

        let coordinate = coordinate.ok_or_else(|| parse_error("no q parameter".to_string()))?;
        Ok(Self { coordinate, zoom })
    }
}

impl fmt::Display for MapLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coordinate.map_url(self.zoom))
    }
}

/// One stored location on a record together with the time it was last set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationSlot {
    coordinate: Option<Coordinate>,
    updated_at: Option<DateTime<Utc>>,
}

impl LocationSlot {
    pub fn new(coordinate: Coordinate) -> Self {
        let mut slot = Self::default();
        slot.update(coordinate);
        slot
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn update(&mut self, coordinate: Coordinate) {
        self.coordinate = Some(coordinate);
        self.updated_at = Some(Utc::now());
    }

    pub fn clear(&mut self) {
        self.coordinate = None;
        self.updated_at = None;
    }
}

/// A labelled point, e.g. one row of a points file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedPoint {
    pub name: String,
    pub coordinate: Option<Coordinate>,
}
