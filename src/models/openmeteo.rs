use std::collections::BTreeMap;
use serde::Deserialize;
use serde_json::Value;

/// Raw Open-Meteo forecast response. Every endpoint returns at most one of
/// the three blocks, each a map of same-length parallel arrays keyed by
/// variable name plus a "time" array of date or date-time strings.
#[derive(Deserialize)]
pub struct RawForecast {
    pub utc_offset_seconds: Option<i32>,
    pub daily: Option<SeriesBlock>,
    pub hourly: Option<SeriesBlock>,
    pub minutely_15: Option<SeriesBlock>,
}

#[derive(Deserialize)]
pub struct SeriesBlock(BTreeMap<String, Vec<Value>>);

impl RawForecast {
    /// Returns the block stored under the given response key
    ///
    /// # Arguments
    ///
    /// * 'key' - "daily", "hourly" or "minutely_15"
    pub fn block(&self, key: &str) -> Option<&SeriesBlock> {
        match key {
            "daily" => self.daily.as_ref(),
            "hourly" => self.hourly.as_ref(),
            "minutely_15" => self.minutely_15.as_ref(),
            _ => None,
        }
    }
}

impl SeriesBlock {
    pub fn series(&self, name: &str) -> Option<&[Value]> {
        self.0.get(name).map(Vec::as_slice)
    }
}
