//! Persistence shapes for a coordinate.
//!
//! Records keep a location either as two decimal columns or as one JSON
//! field. Which shape a record uses is decided here; the geometry never sees it.

use crate::domain::model::Coordinate;
use crate::domain::ports::Locatable;
use crate::utils::error::{CoordinateError, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Scale of the decimal columns.
pub const COLUMN_SCALE: usize = 8;

/// The JSON form: `{"latitude": .., "longitude": ..}`. Values may be numbers
/// or decimal strings, and either key may be absent or null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationBlob {
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub longitude: Option<f64>,
}

fn deserialize_decimal<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Number(f64),
        Text(String),
    }

    match Option::<Decimal>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Decimal::Number(value)) => Ok(Some(value)),
        Some(Decimal::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Decimal::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| de::Error::custom(format!("invalid decimal {:?}: {}", text, e))),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoredLocation {
    /// Two nullable decimal columns, as the database returns them.
    Columns {
        latitude: Option<String>,
        longitude: Option<String>,
    },
    Json(LocationBlob),
}

impl StoredLocation {
    pub fn encode_columns(coordinate: &Coordinate) -> Self {
        StoredLocation::Columns {
            latitude: Some(format!("{:.*}", COLUMN_SCALE, coordinate.latitude())),
            longitude: Some(format!("{:.*}", COLUMN_SCALE, coordinate.longitude())),
        }
    }

    pub fn encode_json(coordinate: &Coordinate) -> Self {
        StoredLocation::Json(LocationBlob {
            latitude: Some(coordinate.latitude()),
            longitude: Some(coordinate.longitude()),
        })
    }

    /// Parses a JSON field value. `null` means no location.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let blob: Option<LocationBlob> = serde_json::from_str(json)?;
        Ok(StoredLocation::Json(blob.unwrap_or_default()))
    }

    pub fn to_json_string(&self) -> Result<String> {
        let blob = match self {
            StoredLocation::Json(blob) => blob.clone(),
            StoredLocation::Columns { .. } => match self.decode()? {
                Some(coordinate) => LocationBlob {
                    latitude: Some(coordinate.latitude()),
                    longitude: Some(coordinate.longitude()),
                },
                None => LocationBlob::default(),
            },
        };
        Ok(serde_json::to_string(&blob)?)
    }

    /// `Ok(None)` when nothing is stored, an error when only half of the
    /// pair is stored or the values are malformed.
    pub fn decode(&self) -> std::result::Result<Option<Coordinate>, CoordinateError> {
        let (latitude, longitude) = match self {
            StoredLocation::Columns { latitude, longitude } => (
                parse_column("latitude", latitude.as_deref())?,
                parse_column("longitude", longitude.as_deref())?,
            ),
            StoredLocation::Json(blob) => (blob.latitude, blob.longitude),
        };

        match (latitude, longitude) {
            (None, None) => Ok(None),
            (latitude, longitude) => Coordinate::from_parts(latitude, longitude).map(Some),
        }
    }
}

fn parse_column(field: &'static str, value: Option<&str>) -> std::result::Result<Option<f64>, CoordinateError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => text.parse().map(Some).map_err(|e| CoordinateError::Parse {
            input: text.to_string(),
            reason: format!("{}: {}", field, e),
        }),
    }
}

impl Locatable for StoredLocation {
    fn location(&self) -> Option<Coordinate> {
        match self.decode() {
            Ok(coordinate) => coordinate,
            Err(e) => {
                tracing::debug!("Ignoring stored location: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jaipur() -> Coordinate {
        Coordinate::try_new(26.9124, 75.7873).unwrap()
    }

    #[test]
    fn test_decode_columns() {
        let stored = StoredLocation::Columns {
            latitude: Some("26.91240000".to_string()),
            longitude: Some("75.78730000".to_string()),
        };
        assert_eq!(stored.decode(), Ok(Some(jaipur())));
    }

    #[test]
    fn test_encode_columns_uses_column_scale() {
        assert_eq!(
            StoredLocation::encode_columns(&jaipur()),
            StoredLocation::Columns {
                latitude: Some("26.91240000".to_string()),
                longitude: Some("75.78730000".to_string()),
            }
        );
    }

    #[test]
    fn test_decode_empty_and_partial() {
        let empty = StoredLocation::Columns {
            latitude: None,
            longitude: Some(" ".to_string()),
        };
        assert_eq!(empty.decode(), Ok(None));
        assert!(!empty.has_location());

        let partial = StoredLocation::Columns {
            latitude: Some("26.9124".to_string()),
            longitude: None,
        };
        assert_eq!(
            partial.decode(),
            Err(CoordinateError::Missing { field: "longitude" })
        );

        let garbage = StoredLocation::Columns {
            latitude: Some("north".to_string()),
            longitude: Some("75.7873".to_string()),
        };
        assert!(matches!(garbage.decode(), Err(CoordinateError::Parse { .. })));
    }

    #[test]
    fn test_json_accepts_numbers_and_strings() -> Result<()> {
        // language=json
        let numbers = StoredLocation::from_json_str(r#"{"latitude": 26.9124, "longitude": 75.7873}"#)?;
        assert_eq!(numbers.location(), Some(jaipur()));

        // language=json
        let strings = StoredLocation::from_json_str(r#"{"latitude": "26.9124", "longitude": "75.7873"}"#)?;
        assert_eq!(strings.location(), Some(jaipur()));

        let null = StoredLocation::from_json_str("null")?;
        assert_eq!(null.decode(), Ok(None));

        // language=json
        let out_of_range = StoredLocation::from_json_str(r#"{"latitude": 95, "longitude": 75}"#)?;
        assert!(matches!(out_of_range.decode(), Err(CoordinateError::OutOfRange { .. })));
        assert_eq!(out_of_range.location(), None);

        Ok(())
    }

    #[test]
    fn test_json_rejects_non_decimal_text() {
        assert!(StoredLocation::from_json_str(r#"{"latitude": "abc", "longitude": 1}"#).is_err());
    }

    #[test]
    fn test_columns_to_json() -> Result<()> {
        let json = StoredLocation::encode_columns(&jaipur()).to_json_string()?;
        assert_eq!(json, r#"{"latitude":26.9124,"longitude":75.7873}"#);
        assert_eq!(StoredLocation::encode_json(&jaipur()).to_json_string()?, json);
        Ok(())
    }
}
