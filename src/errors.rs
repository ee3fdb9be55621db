use std::fmt;
use std::fmt::Formatter;
use thiserror::Error;
use crate::coords::InvalidCoordinate;
use crate::manager_catalog::errors::CatalogError;
use crate::manager_influx::errors::InfluxError;
use crate::manager_openmeteo::errors::FetchError;

pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError(e.to_string())
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError(e.to_string())
    }
}

/// Shape problems in a provider payload. Only fully missing structure is an
/// error, length mismatches between parallel arrays truncate instead.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("response has no \"{key}\" block")]
    MissingBlock { key: &'static str },
    #[error("response block has no \"{name}\" series")]
    MissingSeries { name: &'static str },
    #[error("series \"{name}\" holds a non-numeric value")]
    BadValue { name: &'static str },
    #[error("unparseable timestamp \"{value}\"")]
    BadTimestamp { value: String },
}

/// Catch-all for one (city, source) pipeline. Absorbed and logged by the
/// worker loop, never crosses a location boundary.
pub struct IngestError(String);

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl From<FetchError> for IngestError {
    fn from(e: FetchError) -> Self {
        IngestError(e.to_string())
    }
}
impl From<PayloadError> for IngestError {
    fn from(e: PayloadError) -> Self {
        IngestError(e.to_string())
    }
}
impl From<InfluxError> for IngestError {
    fn from(e: InfluxError) -> Self {
        IngestError(e.to_string())
    }
}
impl From<CatalogError> for IngestError {
    fn from(e: CatalogError) -> Self {
        IngestError(e.to_string())
    }
}
impl From<InvalidCoordinate> for IngestError {
    fn from(e: InvalidCoordinate) -> Self {
        IngestError(e.to_string())
    }
}
