use thiserror::Error;

/// Why a latitude/longitude pair could not become a [`Coordinate`].
///
/// `Missing` means "not yet set", `OutOfRange` and `Parse` mean malformed
/// input. Callers render these differently, so they stay separate variants.
///
/// [`Coordinate`]: crate::domain::model::Coordinate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    #[error("{field} is missing")]
    Missing { field: &'static str },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("cannot parse coordinate from {input:?}: {reason}")]
    Parse { input: String, reason: String },
}

impl CoordinateError {
    pub fn is_missing(&self) -> bool {
        matches!(self, CoordinateError::Missing { .. })
    }
}

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid coordinate: {0}")]
    CoordinateError(#[from] CoordinateError),

    #[error("Invalid point on line {line}: {source}")]
    PointError {
        line: u64,
        #[source]
        source: CoordinateError,
    },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Environment variable '{name}' is not set")]
    MissingEnvVarError { name: String },
}

impl GeoError {
    /// Short message for the terminal, without nested error chains.
    pub fn user_friendly_message(&self) -> String {
        match self {
            GeoError::IoError(e) => format!("Could not read or write a file: {}", e),
            GeoError::CsvError(_) => "The points file is not valid CSV".to_string(),
            GeoError::SerializationError(_) => "Invalid JSON location data".to_string(),
            GeoError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            GeoError::CoordinateError(e) => format!("Invalid coordinates: {}", e),
            GeoError::PointError { line, source } => {
                format!("Invalid coordinates on line {}: {}", line, source)
            }
            GeoError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            GeoError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration problem in '{}': {}", field, reason)
            }
            GeoError::MissingEnvVarError { name } => {
                format!("Environment variable '{}' is required by the configuration", name)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GeoError::IoError(_) => "Check that the path exists and is readable",
            GeoError::CsvError(_) | GeoError::PointError { .. } => {
                "Use a header row of name,latitude,longitude with decimal degrees"
            }
            GeoError::SerializationError(_) => {
                "Store locations as {\"latitude\": <number>, \"longitude\": <number>}"
            }
            GeoError::TomlError(_) | GeoError::ConfigValidationError { .. } => {
                "Fix the configuration file and try again"
            }
            GeoError::CoordinateError(_) => {
                "Latitude must be within -90..90 and longitude within -180..180"
            }
            GeoError::InvalidConfigValueError { .. } => "Adjust the value to the allowed range",
            GeoError::MissingEnvVarError { .. } => "Export the variable or remove the reference",
        }
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;
