use crate::coords::{decimal_repr, Coordinates};

/// One measurement row bound for the time-series store: measurement name,
/// the composite coordinate tag, an ordered field set and a second-precision
/// unix timestamp. Built by the mapper, consumed by the writer, never
/// mutated after that.
pub struct Point {
    measurement: &'static str,
    coordinates: String,
    fields: Vec<(&'static str, f64)>,
    unix_time: i64,
}

impl Point {
    pub fn new(measurement: &'static str, coordinates: &Coordinates, unix_time: i64) -> Point {
        Point {
            measurement,
            coordinates: coordinates.to_string(),
            fields: Vec::new(),
            unix_time,
        }
    }

    /// Sets a field value. Assigning the same name twice replaces the first
    /// value, which is what lets a source map two series onto one field key.
    ///
    /// # Arguments
    ///
    /// * 'name' - the field key
    /// * 'value' - the numeric value
    pub fn field(&mut self, name: &'static str, value: f64) {
        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.fields.push((name, value));
        }
    }

    pub fn measurement(&self) -> &'static str {
        self.measurement
    }

    pub fn unix_time(&self) -> i64 {
        self.unix_time
    }

    pub fn fields(&self) -> &[(&'static str, f64)] {
        &self.fields
    }

    /// Renders the point as one InfluxDB line protocol record with a
    /// seconds-precision timestamp
    pub fn to_line_protocol(&self) -> String {
        let fields = self
            .fields
            .iter()
            .map(|(name, value)| format!("{}={}", name, decimal_repr(*value)))
            .collect::<Vec<String>>()
            .join(",");

        format!(
            "{},coordinates={} {} {}",
            self.measurement,
            escape_tag_value(&self.coordinates),
            fields,
            self.unix_time
        )
    }
}

/// Escapes the characters the line protocol reserves inside tag values
///
/// # Arguments
///
/// * 'raw' - the unescaped tag value
fn escape_tag_value(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == ',' || c == ' ' || c == '=' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinates() -> Coordinates {
        Coordinates::normalized(59.3293, 18.0686).unwrap()
    }

    #[test]
    fn line_protocol_escapes_the_coordinate_tag() {
        let mut point = Point::new("daily_forecast", &coordinates(), 1700000000);
        point.field("temparature_min_C", -3.2);
        point.field("wind_speed", 12.0);

        assert_eq!(
            point.to_line_protocol(),
            "daily_forecast,coordinates=(59.329\\,\\ 18.069) \
             temparature_min_C=-3.2,wind_speed=12.0 1700000000"
        );
    }

    #[test]
    fn whole_number_fields_keep_a_fraction_part() {
        let mut point = Point::new("hourly_forecast", &coordinates(), 0);
        point.field("humidity", 80.0);

        assert!(point.to_line_protocol().contains("humidity=80.0"));
    }

    #[test]
    fn assigning_a_field_twice_replaces_the_value() {
        let mut point = Point::new("gfs_forecast", &coordinates(), 0);
        point.field("winddirection_80m", 270.0);
        point.field("winddirection_80m", 14.5);

        assert_eq!(point.fields(), &[("winddirection_80m", 14.5)]);
    }
}
