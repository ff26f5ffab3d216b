use crate::core::geo::{DEFAULT_PRECISION, EARTH_RADIUS_KM, MAX_PRECISION};
use crate::core::proximity::DEFAULT_NEARBY_RADIUS_KM;
use crate::domain::model::Coordinate;
use crate::utils::error::{GeoError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_region_code, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::path::Path;

pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    #[default]
    Standard,
    Satellite,
    Hybrid,
    Terrain,
}

impl fmt::Display for MapType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MapType::Standard => "standard",
            MapType::Satellite => "satellite",
            MapType::Hybrid => "hybrid",
            MapType::Terrain => "terrain",
        };
        f.write_str(name)
    }
}

/// Map and location defaults. Every key is optional in the TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub google_maps_api_key: Option<String>,
    /// 1 (world) to 20 (street level).
    pub default_zoom: u8,
    pub map_height: String,
    pub map_type: MapType,
    pub enable_street_view: bool,
    /// Desired device location accuracy in metres.
    pub location_accuracy: u32,
    /// Milliseconds to wait for a device location.
    pub location_timeout: u64,
    pub enable_high_accuracy: bool,
    pub language: String,
    pub region: String,
    /// Decimal places for displayed coordinates.
    pub precision: usize,
    pub home_radius_km: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            google_maps_api_key: None,
            default_zoom: 15,
            map_height: "400px".to_string(),
            map_type: MapType::Standard,
            enable_street_view: true,
            location_accuracy: 100,
            location_timeout: 10_000,
            enable_high_accuracy: true,
            language: "en".to_string(),
            region: "US".to_string(),
            precision: DEFAULT_PRECISION,
            home_radius_km: DEFAULT_NEARBY_RADIUS_KM,
        }
    }
}

impl MapConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        tracing::debug!("Loading map configuration from {}", path.as_ref().display());
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;
        let config: MapConfig = toml::from_str(&processed_content)?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces `${VAR}` with the variable's value. Comment lines are left alone.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| GeoError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let mut output = String::with_capacity(content.len());
        for line in content.lines() {
            if line.trim_start().starts_with('#') {
                output.push_str(line);
            } else {
                let mut missing = None;
                let substituted = re.replace_all(line, |caps: &regex::Captures| match std::env::var(&caps[1]) {
                    Ok(value) => value,
                    Err(_) => {
                        missing.get_or_insert_with(|| caps[1].to_string());
                        caps[0].to_string()
                    }
                });
                if let Some(name) = missing {
                    return Err(GeoError::MissingEnvVarError { name });
                }
                output.push_str(&substituted);
            }
            output.push('\n');
        }

        Ok(output)
    }

    pub fn map_url(&self, coordinate: &Coordinate) -> String {
        coordinate.map_url(Some(self.default_zoom))
    }

    pub fn format(&self, coordinate: &Coordinate) -> String {
        coordinate.format(self.precision)
    }

    pub fn api_key_configured(&self) -> bool {
        self.google_maps_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

impl Validate for MapConfig {
    fn validate(&self) -> Result<()> {
        if let Some(key) = &self.google_maps_api_key {
            validate_non_empty_string("google_maps_api_key", key)?;
        }
        validate_range("default_zoom", self.default_zoom, MIN_ZOOM, MAX_ZOOM)?;
        validate_non_empty_string("map_height", &self.map_height)?;
        validate_positive_number("location_accuracy", self.location_accuracy)?;
        validate_positive_number("location_timeout", self.location_timeout)?;
        validate_non_empty_string("language", &self.language)?;
        validate_region_code("region", &self.region)?;
        validate_range("precision", self.precision, 0, MAX_PRECISION)?;
        validate_positive_number("home_radius_km", self.home_radius_km)?;
        // No two points are farther apart than half the circumference.
        validate_range("home_radius_km", self.home_radius_km, 0.0, PI * EARTH_RADIUS_KM)?;
        Ok(())
    }
}
