use crate::config::toml_config::MapConfig;
use crate::core::geo::MAX_PRECISION;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "geo-location")]
#[command(about = "Validate, measure and link latitude/longitude coordinates")]
pub struct CliConfig {
    /// Path to a TOML file with map defaults
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Check that a latitude/longitude pair is within range
    Validate {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },

    /// Great-circle distance between two points in kilometres
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
    },

    /// Print a coordinate rounded for display
    Format {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
        /// Decimal places, 0 to 15 (defaults to the configured precision)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=MAX_PRECISION as i64))]
        precision: Option<u8>,
    },

    /// Print a Google Maps link for a coordinate
    Url {
        #[arg(allow_negative_numbers = true)]
        latitude: f64,
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
        /// Zoom level (defaults to the configured zoom)
        #[arg(short, long)]
        zoom: Option<u8>,
        /// Leave the zoom parameter out entirely
        #[arg(long, conflicts_with = "zoom")]
        no_zoom: bool,
    },

    /// Read a Google Maps link back into a coordinate
    ParseUrl { url: String },

    /// List points from a CSV file that lie near a centre, nearest first
    Nearby {
        /// CSV file with name,latitude,longitude columns
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Search radius in kilometres (defaults to the configured home radius)
        #[arg(short, long)]
        radius: Option<f64>,
        /// Show at most this many points
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

impl CliConfig {
    /// Loads the file named by `--config`, or defaults, and validates it.
    pub fn map_config(&self) -> Result<MapConfig> {
        let config = match &self.config {
            Some(path) => MapConfig::from_file(path)?,
            None => MapConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_negative_coordinates() {
        let cli = CliConfig::try_parse_from(["geo-location", "validate", "-33.8688", "-151.2093"]).unwrap();
        match cli.command {
            Command::Validate { latitude, longitude } => {
                assert_eq!(latitude, -33.8688);
                assert_eq!(longitude, -151.2093);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_nearby() {
        let cli = CliConfig::try_parse_from([
            "geo-location",
            "--verbose",
            "nearby",
            "--input",
            "points.csv",
            "--lat",
            "26.9124",
            "--lon",
            "75.7873",
            "--radius",
            "5",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Nearby { radius: Some(r), limit: None, .. } if r == 5.0));
    }

    #[test]
    fn test_zoom_conflicts_with_no_zoom() {
        assert!(CliConfig::try_parse_from(["geo-location", "url", "1", "2", "--zoom", "3", "--no-zoom"]).is_err());
    }

    #[test]
    fn test_format_precision_bounds() {
        let cli = CliConfig::try_parse_from(["geo-location", "format", "1", "2", "--precision", "15"]).unwrap();
        assert!(matches!(cli.command, Command::Format { precision: Some(15), .. }));
        assert!(CliConfig::try_parse_from(["geo-location", "format", "1", "2", "--precision", "16"]).is_err());
        assert!(CliConfig::try_parse_from(["geo-location", "format", "1", "2", "--precision", "70000"]).is_err());
    }

    #[test]
    fn test_default_map_config() {
        let cli = CliConfig::try_parse_from(["geo-location", "format", "1", "2"]).unwrap();
        assert_eq!(cli.map_config().unwrap(), MapConfig::default());
    }
}
