//! Stateless coordinate helpers.
//!
//! Every function here is pure. Absent inputs are `None`, and neither a
//! missing value nor an out-of-range one is an error: predicates answer
//! `false`, calculations answer `None`.

use std::f64::consts::PI;

/// Mean Earth radius used by [`distance_km`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Decimal places used by [`format_coordinates`] callers that have no preference.
pub const DEFAULT_PRECISION: usize = 6;

/// Largest precision [`format_coordinates`] honours; an f64 carries no more.
pub const MAX_PRECISION: usize = 15;

pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

const GOOGLE_MAPS_URL: &str = "https://www.google.com/maps";

pub fn is_valid_latitude(latitude: Option<f64>) -> bool {
    latitude.is_some_and(|lat| lat >= LATITUDE_RANGE.0 && lat <= LATITUDE_RANGE.1)
}

pub fn is_valid_longitude(longitude: Option<f64>) -> bool {
    longitude.is_some_and(|lon| lon >= LONGITUDE_RANGE.0 && lon <= LONGITUDE_RANGE.1)
}

pub fn is_valid_coordinate(latitude: Option<f64>, longitude: Option<f64>) -> bool {
    is_valid_latitude(latitude) && is_valid_longitude(longitude)
}

/// Great-circle distance in kilometres using the Haversine formula.
///
/// Returns `None` when any input is absent. Ranges are not checked; call
/// [`is_valid_coordinate`] first when that matters.
pub fn distance_km(
    lat1: Option<f64>,
    lon1: Option<f64>,
    lat2: Option<f64>,
    lon2: Option<f64>,
) -> Option<f64> {
    Some(haversine_km(lat1?, lon1?, lat2?, lon2?))
}

pub(crate) fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat_delta = degrees_to_radians(lat2 - lat1);
    let lon_delta = degrees_to_radians(lon2 - lon1);

    let a = (lat_delta / 2.0).sin().powi(2)
        + degrees_to_radians(lat1).cos()
            * degrees_to_radians(lat2).cos()
            * (lon_delta / 2.0).sin().powi(2);
    // Rounding can push antipodal pairs just past 1.
    let a = a.clamp(0.0, 1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Renders `"lat, lon"` with both values rounded to `precision` decimals,
/// halves away from zero. Precision is capped at [`MAX_PRECISION`].
pub fn format_coordinates(latitude: f64, longitude: f64, precision: usize) -> String {
    let precision = precision.min(MAX_PRECISION);
    format!(
        "{:.*}, {:.*}",
        precision,
        round_half_away_from_zero(latitude, precision),
        precision,
        round_half_away_from_zero(longitude, precision)
    )
}

fn round_half_away_from_zero(value: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let scaled = value * factor;
    // Past 2^52 every f64 is already whole at this scale.
    if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
        return value;
    }
    scaled.round() / factor
}

/// Google Maps link for a point, or `None` when the pair is not valid.
pub fn to_map_url(latitude: Option<f64>, longitude: Option<f64>, zoom: Option<u8>) -> Option<String> {
    if !is_valid_coordinate(latitude, longitude) {
        return None;
    }
    let (lat, lon) = (latitude?, longitude?);

    let mut url = format!("{}?q={},{}", GOOGLE_MAPS_URL, lat, lon);
    if let Some(zoom) = zoom {
        url.push_str(&format!("&z={}", zoom));
    }

    Some(url)
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}
