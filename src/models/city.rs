use chrono::NaiveDate;
use diesel::prelude::*;
use crate::sources::Source;

/// One monitored location as stored in the catalog. Field order follows the
/// table definition in [crate::manager_catalog::schema].
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::manager_catalog::schema::cities)]
#[diesel(check_for_backend(diesel::mysql::Mysql))]
pub struct City {
    pub city_id: i32,
    pub active: bool,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    /// UTC offset in seconds, filled in by the backfill step when missing
    pub tz: Option<i32>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub added: Option<NaiveDate>,
    pub started: Option<NaiveDate>,
    pub daily: bool,
    pub hourly: bool,
    pub icon: bool,
    pub icon_15: bool,
    pub gfs: bool,
    pub meteofrance: bool,
    /// Days that must elapse since last_hit before the next fetch
    pub horizon: i32,
    pub comment: Option<String>,
    /// Watermark: date of the most recent successful ingestion, shared
    /// across all of the city's sources
    pub last_hit: Option<NaiveDate>,
}

impl City {
    /// Returns the enabled sources in their fixed processing order
    pub fn enabled_sources(&self) -> Vec<Source> {
        [
            (self.daily, Source::Daily),
            (self.hourly, Source::Hourly),
            (self.icon, Source::Icon),
            (self.icon_15, Source::Icon15),
            (self.gfs, Source::Gfs),
            (self.meteofrance, Source::MeteoFrance),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .map(|(_, source)| source)
        .collect()
    }
}
