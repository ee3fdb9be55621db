pub mod errors;

use std::time::Duration;
use ureq::Agent;
use crate::manager_openmeteo::errors::FetchError;
use crate::models::openmeteo::RawForecast;
use crate::sources::Source;

const REQUEST_DOMAIN: &str = "https://api.open-meteo.com";

/// Struct for fetching weather forecasts from the Open-Meteo endpoints
pub struct OpenMeteo {
    agent: Agent,
}

impl OpenMeteo {
    /// Returns an OpenMeteo struct ready for fetching forecasts
    pub fn new() -> OpenMeteo {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        let agent = config.into();

        Self { agent }
    }

    /// Retrieves one forecast window for the given kind and coordinates.
    /// The request asks for one day more than the horizon so that the
    /// skip-offset can discard the already-stored leading window and still
    /// leave a complete forward window.
    ///
    /// A non-success response or an unparseable body is returned as an
    /// error, the caller decides how far it propagates.
    ///
    /// # Arguments
    ///
    /// * 'source' - the forecast kind to fetch
    /// * 'lat' - latitude of the point to get a forecast for
    /// * 'lon' - longitude of the point to get a forecast for
    /// * 'horizon' - the city's forecast horizon in days
    pub fn fetch(&self, source: Source, lat: f64, lon: f64, horizon: i32) -> Result<RawForecast, FetchError> {
        self.request(&forecast_url(source, lat, lon, horizon))
    }

    /// Resolves the UTC offset for a coordinate pair with a minimal one-day
    /// probe request, used to backfill catalog rows with no stored offset
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude of the point
    /// * 'lon' - longitude of the point
    pub fn fetch_utc_offset(&self, lat: f64, lon: f64) -> Result<i32, FetchError> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&hourly=temperature_2m&timezone=auto&forecast_days=1",
            REQUEST_DOMAIN, lat, lon
        );

        let forecast = self.request(&url)?;

        forecast
            .utc_offset_seconds
            .ok_or_else(|| FetchError::Document("no utc_offset_seconds in probe response".to_string()))
    }

    fn request(&self, url: &str) -> Result<RawForecast, FetchError> {
        let json = self.agent
            .get(url)
            .call()?
            .body_mut()
            .read_to_string()?;

        let forecast: RawForecast = serde_json::from_str(&json)?;

        Ok(forecast)
    }
}

/// Builds the forecast request URL for one kind and coordinate pair
///
/// # Arguments
///
/// * 'source' - the forecast kind
/// * 'lat' - latitude
/// * 'lon' - longitude
/// * 'horizon' - the city's forecast horizon in days
pub fn forecast_url(source: Source, lat: f64, lon: f64, horizon: i32) -> String {
    let spec = source.spec();

    format!(
        "{}/{}?latitude={}&longitude={}&{}={}&timezone=auto&forecast_days={}",
        REQUEST_DOMAIN,
        spec.endpoint,
        lat,
        lon,
        spec.block_key,
        spec.variables.join(","),
        horizon + 1
    )
}
