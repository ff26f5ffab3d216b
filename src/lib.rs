pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::{CliConfig, Command};
pub use crate::config::{MapConfig, MapType};

pub use crate::adapters::storage::{LocationBlob, StoredLocation};
pub use crate::core::geo::{
    degrees_to_radians, distance_km, format_coordinates, is_valid_coordinate, is_valid_latitude,
    is_valid_longitude, to_map_url, DEFAULT_PRECISION, EARTH_RADIUS_KM, MAX_PRECISION,
};
pub use crate::domain::model::{Coordinate, LocationSlot, MapLink, NamedPoint};
pub use crate::domain::ports::Locatable;
pub use crate::utils::error::{CoordinateError, GeoError, Result};
