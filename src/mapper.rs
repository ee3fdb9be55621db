use chrono::{Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use serde_json::Value;
use crate::coords::Coordinates;
use crate::errors::PayloadError;
use crate::models::openmeteo::RawForecast;
use crate::models::point::Point;
use crate::sources::Source;

/// How provider timestamps are turned into unix seconds.
///
/// HostLocal reproduces the collector's historical behavior: shift the naive
/// timestamp by the executing host's UTC offset, then interpret it in the
/// host's timezone. Utc interprets the naive timestamp as UTC directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampMode {
    HostLocal,
    Utc,
}

/// Shapes one provider payload into the points to write for one
/// (city, source) pair.
///
/// The block under the source's response key is located, the time array and
/// every stored series are sliced from the source's skip-offset, and the
/// remainders are zipped element-wise. A shorter series caps the number of
/// emitted points; only a fully missing block or series is an error.
///
/// # Arguments
///
/// * 'forecast' - the parsed provider response
/// * 'source' - which forecast kind the response belongs to
/// * 'coordinates' - normalized pair used as the point tag
/// * 'mode' - timestamp conversion mode
pub fn map_points(
    forecast: &RawForecast,
    source: Source,
    coordinates: &Coordinates,
    mode: TimestampMode,
) -> Result<Vec<Point>, PayloadError> {
    let spec = source.spec();

    let block = forecast
        .block(spec.block_key)
        .ok_or(PayloadError::MissingBlock { key: spec.block_key })?;

    let times = block
        .series("time")
        .ok_or(PayloadError::MissingSeries { name: "time" })?;
    let times = sliced(times, spec.skip_offset);

    let mut columns: Vec<(&'static str, &[Value])> = Vec::with_capacity(spec.fields.len());
    for &(series, field) in spec.fields {
        let values = block
            .series(series)
            .ok_or(PayloadError::MissingSeries { name: series })?;
        columns.push((field, sliced(values, spec.skip_offset)));
    }

    let count = columns
        .iter()
        .map(|(_, values)| values.len())
        .chain([times.len()])
        .min()
        .unwrap_or(0);

    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        let stamp = times[i]
            .as_str()
            .ok_or_else(|| PayloadError::BadTimestamp { value: times[i].to_string() })?;

        let mut point = Point::new(spec.measurement, coordinates, to_unix_seconds(stamp, mode)?);

        for &(field, values) in &columns {
            let value = values[i]
                .as_f64()
                .ok_or(PayloadError::BadValue { name: field })?;
            point.field(field, value);
        }

        points.push(point);
    }

    Ok(points)
}

fn sliced(values: &[Value], offset: usize) -> &[Value] {
    values.get(offset..).unwrap_or(&[])
}

/// Converts a provider timestamp to unix seconds. Date-only stamps are read
/// as midnight.
///
/// # Arguments
///
/// * 'stamp' - "YYYY-MM-DD" or "YYYY-MM-DDTHH:MM"
/// * 'mode' - timestamp conversion mode
pub fn to_unix_seconds(stamp: &str, mode: TimestampMode) -> Result<i64, PayloadError> {
    let naive = parse_stamp(stamp)?;

    let unix_time = match mode {
        TimestampMode::Utc => naive.and_utc().timestamp(),
        TimestampMode::HostLocal => {
            let shifted = naive + TimeDelta::seconds(host_offset_seconds());
            match Local.from_local_datetime(&shifted) {
                LocalResult::Single(dt) => dt.timestamp(),
                LocalResult::Ambiguous(earliest, _) => earliest.timestamp(),
                LocalResult::None => shifted.and_utc().timestamp(),
            }
        }
    };

    Ok(unix_time)
}

fn parse_stamp(stamp: &str) -> Result<NaiveDateTime, PayloadError> {
    NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M")
        .or_else(|_| {
            NaiveDate::parse_from_str(stamp, "%Y-%m-%d").map(|date| date.and_time(NaiveTime::MIN))
        })
        .map_err(|_| PayloadError::BadTimestamp { value: stamp.to_string() })
}

fn host_offset_seconds() -> i64 {
    i64::from(Local::now().offset().local_minus_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coordinates() -> Coordinates {
        Coordinates::normalized(59.3293, 18.0686).unwrap()
    }

    fn forecast(value: serde_json::Value) -> RawForecast {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn unix_conversion_in_utc_mode() {
        assert_eq!(
            to_unix_seconds("2024-03-02", TimestampMode::Utc).unwrap(),
            1709337600
        );
        assert_eq!(
            to_unix_seconds("2024-03-02T05:30", TimestampMode::Utc).unwrap(),
            1709357400
        );
        assert!(to_unix_seconds("02/03/2024", TimestampMode::Utc).is_err());
    }

    #[test]
    fn daily_points_skip_the_first_day_and_rename_fields() {
        let raw = forecast(json!({
            "daily": {
                "time": ["2024-03-01", "2024-03-02", "2024-03-03"],
                "temperature_2m_max": [1.0, 2.0, 3.0],
                "temperature_2m_min": [-5.0, -4.0, -3.0],
                "windspeed_10m_max": [10.0, 11.0, 12.0],
                "winddirection_10m_dominant": [180.0, 190.0, 200.0],
                "shortwave_radiation_sum": [0.5, 0.6, 0.7]
            }
        }));

        let points =
            map_points(&raw, Source::Daily, &coordinates(), TimestampMode::Utc).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].unix_time(), 1709337600);
        assert_eq!(points[0].measurement(), "daily_forecast");
        assert_eq!(
            points[0].fields(),
            &[
                ("temparature_min_C", -4.0),
                ("temparature_max_C", 2.0),
                ("shortwave_radiation_sum", 0.6),
                ("wind_speed", 11.0),
                ("wind_direction", 190.0),
            ]
        );
    }

    fn minutely_block(lengths: (usize, usize)) -> serde_json::Value {
        let (time_len, series_len) = lengths;
        let times: Vec<String> = (0..time_len)
            .map(|i| format!("2024-03-01T{:02}:{:02}", (i / 4) % 24, (i % 4) * 15))
            .collect();
        let series = |len: usize| (0..len).map(|i| i as f64).collect::<Vec<f64>>();

        json!({
            "minutely_15": {
                "time": times,
                "shortwave_radiation": series(series_len),
                "direct_radiation": series(time_len),
                "diffuse_radiation": series(time_len),
                "direct_normal_irradiance": series(time_len),
                "terrestrial_radiation": series(time_len)
            }
        })
    }

    #[test]
    fn unequal_series_truncate_to_the_shortest() {
        // 100 quarter-hours of time but one series one entry short: after the
        // 96-entry skip the short series caps the output at 3 points
        let raw = forecast(minutely_block((100, 99)));

        let points =
            map_points(&raw, Source::Icon15, &coordinates(), TimestampMode::Utc).unwrap();

        assert_eq!(points.len(), 3);
    }

    #[test]
    fn series_shorter_than_the_offset_yield_no_points() {
        let raw = forecast(minutely_block((50, 50)));

        let points =
            map_points(&raw, Source::Icon15, &coordinates(), TimestampMode::Utc).unwrap();

        assert!(points.is_empty());
    }

    #[test]
    fn hourly_first_point_is_the_start_of_day_two() {
        let times: Vec<String> = (0..48)
            .map(|i| format!("2024-03-0{}T{:02}:00", 1 + i / 24, i % 24))
            .collect();
        let series: Vec<f64> = (0..48).map(|i| i as f64).collect();

        let mut block = serde_json::Map::new();
        block.insert("time".to_string(), json!(times));
        for variable in Source::Hourly.spec().variables {
            block.insert(variable.to_string(), json!(series));
        }
        let raw = forecast(json!({ "hourly": block }));

        let points =
            map_points(&raw, Source::Hourly, &coordinates(), TimestampMode::Utc).unwrap();

        assert_eq!(points.len(), 24);
        // 2024-03-02T00:00 UTC
        assert_eq!(points[0].unix_time(), 1709337600);
        assert!(points.windows(2).all(|w| w[0].unix_time() < w[1].unix_time()));
    }

    #[test]
    fn gfs_gusts_replace_the_winddirection_80m_field() {
        let times: Vec<String> = (0..25).map(|i| format!("2024-03-0{}T{:02}:00", 1 + i / 24, i % 24)).collect();

        let mut block = serde_json::Map::new();
        block.insert("time".to_string(), json!(times));
        for variable in Source::Gfs.spec().variables {
            let value = if *variable == "windgusts_10m" { 14.5 } else { 1.0 };
            block.insert(variable.to_string(), json!(vec![value; 25]));
        }
        let raw = forecast(json!({ "hourly": block }));

        let points = map_points(&raw, Source::Gfs, &coordinates(), TimestampMode::Utc).unwrap();

        assert_eq!(points.len(), 1);
        let direction = points[0]
            .fields()
            .iter()
            .filter(|(name, _)| *name == "winddirection_80m")
            .collect::<Vec<_>>();
        assert_eq!(direction, vec![&("winddirection_80m", 14.5)]);
    }

    #[test]
    fn missing_block_and_series_are_errors() {
        let raw = forecast(json!({ "hourly": { "time": [] } }));
        assert!(matches!(
            map_points(&raw, Source::Daily, &coordinates(), TimestampMode::Utc),
            Err(PayloadError::MissingBlock { key: "daily" })
        ));

        let raw = forecast(json!({
            "daily": {
                "time": ["2024-03-01", "2024-03-02"],
                "temperature_2m_max": [1.0, 2.0]
            }
        }));
        assert!(matches!(
            map_points(&raw, Source::Daily, &coordinates(), TimestampMode::Utc),
            Err(PayloadError::MissingSeries { .. })
        ));
    }

    #[test]
    fn null_values_are_rejected_by_name() {
        let raw = forecast(json!({
            "daily": {
                "time": ["2024-03-01", "2024-03-02"],
                "temperature_2m_max": [1.0, null],
                "temperature_2m_min": [-5.0, -4.0],
                "windspeed_10m_max": [10.0, 11.0],
                "winddirection_10m_dominant": [180.0, 190.0],
                "shortwave_radiation_sum": [0.5, 0.6]
            }
        }));

        assert!(matches!(
            map_points(&raw, Source::Daily, &coordinates(), TimestampMode::Utc),
            Err(PayloadError::BadValue { name: "temparature_max_C" })
        ));
    }
}
