pub mod errors;

use std::time::Duration;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use ureq::Agent;
use crate::config::InfluxParameters;
use crate::coords::Coordinates;
use crate::manager_influx::errors::InfluxError;
use crate::models::point::Point;

/// Struct for writing forecast points to the InfluxDB v2 API
pub struct Influx {
    agent: Agent,
    url: String,
    token: String,
    org: String,
    bucket: String,
}

#[derive(Serialize)]
struct DeleteBody {
    start: String,
    stop: String,
    predicate: String,
}

impl Influx {
    /// Returns an Influx struct bound to one org and bucket
    ///
    /// # Arguments
    ///
    /// * 'params' - url, token, org and bucket from the configuration
    pub fn new(params: &InfluxParameters) -> Influx {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        let agent = config.into();

        Self {
            agent,
            url: params.url.trim_end_matches('/').to_string(),
            token: params.token.to_string(),
            org: params.org.to_string(),
            bucket: params.bucket.to_string(),
        }
    }

    /// Writes the points for one (city, source) pair, one call per point in
    /// order. A failing call returns immediately: earlier points stay
    /// written, later ones are not attempted, there is no rollback.
    ///
    /// # Arguments
    ///
    /// * 'points' - the points to write
    pub fn write_points(&self, points: &[Point]) -> Result<(), InfluxError> {
        let url = format!(
            "{}/api/v2/write?org={}&bucket={}&precision=s",
            self.url, self.org, self.bucket
        );

        for point in points {
            let _ = self.agent
                .post(&url)
                .header("Authorization", format!("Token {}", self.token))
                .content_type("text/plain; charset=utf-8")
                .send(point.to_line_protocol())?;
        }

        Ok(())
    }

    /// Deletes every point tagged with the given coordinates in the time
    /// range. Used by catalog management when a city is removed.
    ///
    /// # Arguments
    ///
    /// * 'coordinates' - the coordinate tag to match
    /// * 'start' - start of the deletion range
    /// * 'stop' - end of the deletion range
    pub fn delete_series(
        &self,
        coordinates: &Coordinates,
        start: DateTime<Utc>,
        stop: DateTime<Utc>,
    ) -> Result<(), InfluxError> {
        let url = format!("{}/api/v2/delete?org={}&bucket={}", self.url, self.org, self.bucket);

        let body = DeleteBody {
            start: start.to_rfc3339_opts(SecondsFormat::Secs, true),
            stop: stop.to_rfc3339_opts(SecondsFormat::Secs, true),
            predicate: delete_predicate(coordinates),
        };
        let json = serde_json::to_string(&body)?;

        let _ = self.agent
            .post(&url)
            .header("Authorization", format!("Token {}", self.token))
            .content_type("application/json")
            .send(json)?;

        Ok(())
    }
}

/// Builds the delete predicate matching one coordinate tag
///
/// # Arguments
///
/// * 'coordinates' - the coordinate tag to match
pub fn delete_predicate(coordinates: &Coordinates) -> String {
    format!("coordinates=\"{}\"", coordinates)
}
