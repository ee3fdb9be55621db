use std::fmt;
use std::fmt::Formatter;
use chrono::{DateTime, NaiveDate, TimeDelta, Timelike, Utc};
use crate::models::city::City;

/// Local hour at which a city becomes eligible for its daily sweep. The
/// external scheduler runs hourly, this gate turns that into one effective
/// trigger per day near each city's local end-of-day.
pub const DUE_HOUR: u32 = 23;

/// Outcome of the per-city gates
pub enum Dueness {
    Due,
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotDueHour,
    Inactive,
    MissingUtcOffset,
    HorizonNotReached,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotDueHour        => write!(f, "localtime is not 23:00"),
            SkipReason::Inactive          => write!(f, "it is not active"),
            SkipReason::MissingUtcOffset  => write!(f, "it has no stored UTC offset"),
            SkipReason::HorizonNotReached => write!(f, "horizon is not reached"),
        }
    }
}

/// Evaluates the per-city gates in order: stored UTC offset present, local
/// hour equals [DUE_HOUR], city active. The horizon gate is separate since it
/// runs once per enabled source, see [horizon_reached].
///
/// # Arguments
///
/// * 'now_utc' - the current time, passed in so the decision stays pure
/// * 'city' - the catalog row to evaluate
pub fn evaluate(now_utc: DateTime<Utc>, city: &City) -> Dueness {
    let Some(tz) = city.tz else {
        return Dueness::Skip(SkipReason::MissingUtcOffset);
    };

    let local = now_utc + TimeDelta::seconds(i64::from(tz));
    if local.hour() != DUE_HOUR {
        return Dueness::Skip(SkipReason::NotDueHour);
    }

    if !city.active {
        return Dueness::Skip(SkipReason::Inactive);
    }

    Dueness::Due
}

/// Returns true when enough days have passed since the last successful fetch.
/// Due exactly at the boundary (elapsed == horizon). A missing watermark
/// counts as due, the system re-fetches rather than starves.
///
/// # Arguments
///
/// * 'today' - the current date
/// * 'horizon' - days that must elapse between fetches
/// * 'last_hit' - date of the most recent successful ingestion
pub fn horizon_reached(today: NaiveDate, horizon: i32, last_hit: Option<NaiveDate>) -> bool {
    match last_hit {
        Some(watermark) => (today - watermark).num_days() >= i64::from(horizon),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn city() -> City {
        City {
            city_id: 1,
            active: true,
            name: "Karlskrona".to_string(),
            lat: 56.223,
            lon: 15.658,
            tz: Some(3600),
            country: Some("Sweden".to_string()),
            country_code: Some("SE".to_string()),
            added: None,
            started: None,
            daily: true,
            hourly: true,
            icon: false,
            icon_15: false,
            gfs: false,
            meteofrance: false,
            horizon: 1,
            comment: None,
            last_hit: None,
        }
    }

    fn utc(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, hour, 30, 0).unwrap()
    }

    #[test]
    fn due_when_local_hour_is_23() {
        // tz +1h, so 22:30 UTC is 23:30 local
        assert!(matches!(evaluate(utc(22), &city()), Dueness::Due));
    }

    #[test]
    fn skipped_outside_due_hour() {
        assert!(matches!(
            evaluate(utc(23), &city()),
            Dueness::Skip(SkipReason::NotDueHour)
        ));
        assert!(matches!(
            evaluate(utc(10), &city()),
            Dueness::Skip(SkipReason::NotDueHour)
        ));
    }

    #[test]
    fn negative_offset_shifts_the_other_way() {
        let mut c = city();
        c.tz = Some(-18000); // UTC-5
        assert!(matches!(evaluate(utc(4), &c), Dueness::Due));
        assert!(matches!(evaluate(utc(22), &c), Dueness::Skip(SkipReason::NotDueHour)));
    }

    #[test]
    fn inactive_city_is_never_due() {
        let mut c = city();
        c.active = false;
        assert!(matches!(
            evaluate(utc(22), &c),
            Dueness::Skip(SkipReason::Inactive)
        ));
    }

    #[test]
    fn missing_offset_is_never_due() {
        let mut c = city();
        c.tz = None;
        assert!(matches!(
            evaluate(utc(22), &c),
            Dueness::Skip(SkipReason::MissingUtcOffset)
        ));
    }

    #[test]
    fn horizon_boundary_is_due() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let three_ago = NaiveDate::from_ymd_opt(2024, 6, 12).unwrap();

        assert!(horizon_reached(today, 3, Some(three_ago)));
        assert!(!horizon_reached(today, 4, Some(three_ago)));
        assert!(horizon_reached(today, 1, Some(three_ago)));
    }

    #[test]
    fn missing_watermark_is_due() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert!(horizon_reached(today, 7, None));
    }
}
