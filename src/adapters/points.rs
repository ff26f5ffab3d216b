use crate::domain::model::{Coordinate, NamedPoint};
use crate::utils::error::{GeoError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct PointRow {
    name: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Reads `name,latitude,longitude` rows.
///
/// A row with both coordinates empty becomes a point without a location.
/// Half-filled or out-of-range rows are errors naming the line.
pub fn read_points<R: Read>(reader: R) -> Result<Vec<NamedPoint>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut record = csv::StringRecord::new();
    let mut points = Vec::new();

    while csv_reader.read_record(&mut record)? {
        let row: PointRow = record.deserialize(Some(&headers))?;
        let line = record.position().map_or(0, |position| position.line());

        let coordinate = match (row.latitude, row.longitude) {
            (None, None) => {
                tracing::debug!("Point '{}' on line {} has no location", row.name, line);
                None
            }
            (latitude, longitude) => Some(
                Coordinate::from_parts(latitude, longitude)
                    .map_err(|source| GeoError::PointError { line, source })?,
            ),
        };

        points.push(NamedPoint {
            name: row.name,
            coordinate,
        });
    }

    tracing::debug!("Loaded {} point(s)", points.len());
    Ok(points)
}

pub fn read_points_file<P: AsRef<Path>>(path: P) -> Result<Vec<NamedPoint>> {
    let file = std::fs::File::open(path)?;
    read_points(file)
}
