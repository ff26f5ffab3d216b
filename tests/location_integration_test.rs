use anyhow::Result;
use geo_location::adapters::points::read_points_file;
use geo_location::core::proximity::{closest, is_within, order_by_distance, within_distance, DEFAULT_NEARBY_RADIUS_KM};
use geo_location::{
    distance_km, is_valid_coordinate, to_map_url, Coordinate, CoordinateError, Locatable, LocationSlot,
    MapConfig, MapLink, StoredLocation,
};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

/// A record with the current, home and office locations stored as JSON fields.
struct User {
    location: StoredLocation,
    home_location: StoredLocation,
    office_location: StoredLocation,
}

impl User {
    fn from_json(location: &str, home: &str, office: &str) -> Result<Self> {
        Ok(Self {
            location: StoredLocation::from_json_str(location)?,
            home_location: StoredLocation::from_json_str(home)?,
            office_location: StoredLocation::from_json_str(office)?,
        })
    }

    fn distance_to_home(&self) -> Option<f64> {
        self.location.distance_to_other(&self.home_location)
    }

    fn is_at_home(&self) -> bool {
        is_within(&self.location, &self.home_location, DEFAULT_NEARBY_RADIUS_KM)
    }

    fn is_at_office(&self) -> bool {
        is_within(&self.location, &self.office_location, DEFAULT_NEARBY_RADIUS_KM)
    }
}

impl Locatable for User {
    fn location(&self) -> Option<Coordinate> {
        self.location.location()
    }
}

#[test]
fn test_user_at_home() -> Result<()> {
    // language=json
    let user = User::from_json(
        r#"{"latitude": 26.91245, "longitude": 75.78735}"#,
        r#"{"latitude": "26.91240000", "longitude": "75.78730000"}"#,
        r#"{"latitude": 28.7041, "longitude": 77.1025}"#,
    )?;

    assert!(user.is_at_home());
    assert!(!user.is_at_office());
    assert!(user.distance_to_home().is_some_and(|d| d < 0.01));
    assert_eq!(
        user.map_url(None).as_deref(),
        Some("https://www.google.com/maps?q=26.91245,75.78735")
    );
    Ok(())
}

#[test]
fn test_user_without_current_location() -> Result<()> {
    let user = User::from_json("null", r#"{"latitude": 26.9124, "longitude": 75.7873}"#, "{}")?;

    assert!(!user.has_location());
    assert_eq!(user.coordinates_string(), None);
    assert_eq!(user.distance_to_home(), None);
    assert!(!user.is_at_home());
    Ok(())
}

#[test]
fn test_column_and_json_storage_agree() -> Result<()> {
    let columns = StoredLocation::Columns {
        latitude: Some("26.91240000".to_string()),
        longitude: Some("75.78730000".to_string()),
    };
    let json = StoredLocation::from_json_str(r#"{"latitude": 26.9124, "longitude": 75.7873}"#)?;

    assert_eq!(columns.decode()?, json.decode()?);
    assert_eq!(columns.distance_to_other(&json), Some(0.0));
    Ok(())
}

#[test]
fn test_missing_versus_invalid_input() {
    let half = StoredLocation::Columns {
        latitude: Some("26.9124".to_string()),
        longitude: None,
    };
    let broken = StoredLocation::Columns {
        latitude: Some("126.9124".to_string()),
        longitude: Some("75.7873".to_string()),
    };

    assert!(matches!(half.decode(), Err(CoordinateError::Missing { field: "longitude" })));
    assert!(matches!(broken.decode(), Err(CoordinateError::OutOfRange { field: "latitude", .. })));
    assert!(!is_valid_coordinate(Some(26.9124), None));
    assert!(!is_valid_coordinate(Some(126.9124), Some(75.7873)));
}

#[test]
fn test_slot_update_replaces_whole_coordinate() -> Result<()> {
    let mut slot = LocationSlot::default();
    let jaipur = Coordinate::try_new(26.9124, 75.7873)?;
    slot.update(jaipur);

    let moved = jaipur.with_longitude(77.1025)?;
    slot.update(moved);
    assert_eq!(slot.coordinate(), Some(moved));
    assert_eq!(jaipur.longitude(), 75.7873);

    slot.clear();
    assert!(!slot.has_location());
    assert_eq!(slot.updated_at(), None);
    Ok(())
}

#[test]
fn test_map_url_round_trip_through_link() -> Result<()> {
    let url = to_map_url(Some(-33.8688), Some(151.2093), Some(12)).expect("valid coordinate");
    let link = MapLink::parse(&url)?;
    assert_eq!(link.coordinate, Coordinate::try_new(-33.8688, 151.2093)?);
    assert_eq!(link.zoom, Some(12));
    Ok(())
}

#[test]
fn test_nearby_points_from_csv() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("points.csv");
    std::fs::write(
        &path,
        "name,latitude,longitude\n\
         hawa-mahal,26.9239,75.8267\n\
         amber-fort,26.9855,75.8513\n\
         not-yet-mapped,,\n\
         india-gate,28.6129,77.2295\n",
    )?;

    let points = read_points_file(&path)?;
    let center = Coordinate::try_new(26.9124, 75.7873)?;

    let names: Vec<_> = within_distance(&points, &center, 20.0)
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["hawa-mahal", "amber-fort"]);

    let ranked = order_by_distance(&points, &center);
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[2].0.name, "india-gate");

    let (nearest, _) = closest(&points, &center).expect("points with locations");
    assert_eq!(nearest.name, "hawa-mahal");
    Ok(())
}

#[test]
fn test_distance_matches_configured_output() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "default_zoom = 10\nprecision = 4")?;
    let config = MapConfig::from_file(file.path())?;

    let delhi = Coordinate::try_new(28.7041, 77.1025)?;
    assert_eq!(config.format(&delhi), "28.7041, 77.1025");
    assert_eq!(config.map_url(&delhi), "https://www.google.com/maps?q=28.7041,77.1025&z=10");

    let distance = distance_km(Some(26.9124), Some(75.7873), Some(28.7041), Some(77.1025));
    assert!(distance.is_some_and(|d| (d - 237.53).abs() < 0.1));
    Ok(())
}
