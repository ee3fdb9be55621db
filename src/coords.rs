use std::fmt;
use std::fmt::Formatter;
use std::sync::LazyLock;
use regex::Regex;
use thiserror::Error;

/// Two catalog rows closer than this on both axes count as the same place.
/// Wider than the 3-decimal display precision to absorb float rounding.
pub const DUPLICATE_TOLERANCE: f64 = 0.0001;

static COORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d{1,3}\.\d{1,15}$").expect("coordinate pattern"));

#[derive(Debug, Error)]
#[error("invalid coordinate: {0}")]
pub struct InvalidCoordinate(pub String);

/// Validates and normalizes a single coordinate axis.
///
/// Accepts a signed decimal with 1-3 integer digits and 1-15 fraction digits,
/// and returns it rounded to exactly 3 decimal places. Range bounding is left
/// to the caller, see [Coordinates::normalized]. This is the single source of
/// truth for how the same place is recognized across catalog rows and
/// time-series tags.
///
/// # Arguments
///
/// * 'input' - the coordinate as written, e.g. "59.32932349"
pub fn normalize(input: &str) -> Result<f64, InvalidCoordinate> {
    if !COORD_PATTERN.is_match(input) {
        return Err(InvalidCoordinate(input.to_string()));
    }

    let value: f64 = input.parse()
        .map_err(|_| InvalidCoordinate(input.to_string()))?;

    Ok((value * 1000.0).round() / 1000.0)
}

/// Normalizes a coordinate already held as a float, applying the same
/// format validation as [normalize]
///
/// # Arguments
///
/// * 'value' - the coordinate value
pub fn normalize_value(value: f64) -> Result<f64, InvalidCoordinate> {
    normalize(&decimal_repr(value))
}

/// Returns true if the two coordinate pairs fall within the duplicate
/// tolerance on both axes
///
/// # Arguments
///
/// * 'lat_a', 'lon_a' - first pair
/// * 'lat_b', 'lon_b' - second pair
pub fn is_same_place(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> bool {
    (lat_a - lat_b).abs() < DUPLICATE_TOLERANCE && (lon_a - lon_b).abs() < DUPLICATE_TOLERANCE
}

/// A normalized, range-checked coordinate pair.
///
/// Its Display form, "(lat, lon)", is the composite tag value written to the
/// time-series store. The query layer matches on that exact text, so whole
/// numbers keep a trailing ".0".
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Builds a normalized pair, rejecting values outside [-90, 90] latitude
    /// or [-180, 180] longitude
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude
    /// * 'lon' - longitude
    pub fn normalized(lat: f64, lon: f64) -> Result<Coordinates, InvalidCoordinate> {
        let lat = normalize_value(lat)?;
        let lon = normalize_value(lon)?;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate(format!("latitude {} out of range", lat)));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate(format!("longitude {} out of range", lon)));
        }

        Ok(Coordinates { lat, lon })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", decimal_repr(self.lat), decimal_repr(self.lon))
    }
}

/// Decimal rendering that never drops the fraction part: 59.334 -> "59.334",
/// 59.0 -> "59.0". Tag values and field values both rely on this.
pub(crate) fn decimal_repr(value: f64) -> String {
    let repr = value.to_string();
    if repr.contains('.') {
        repr
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rounds_to_three_decimals() {
        assert_eq!(normalize("59.32932349").unwrap(), 59.329);
        assert_eq!(normalize("-15.6583934166").unwrap(), -15.658);
        assert_eq!(normalize("179.9999").unwrap(), 180.0);
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize("18.0686301").unwrap();
        let twice = normalize_value(once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_keeps_at_most_three_fraction_digits() {
        let value = normalize("12.3456789").unwrap();
        assert_eq!(value, 12.346);

        let fraction = decimal_repr(value);
        let digits = fraction.split('.').nth(1).unwrap().len();
        assert!(digits <= 3, "got {}", fraction);
    }

    #[test]
    fn normalize_rejects_malformed_input() {
        for input in ["", "abc", "59", "59.", ".5", "1234.5", "59,329", "59.32a", "--5.0",
                      "5.1234567890123456"] {
            assert!(normalize(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn normalize_value_handles_whole_numbers() {
        assert_eq!(normalize_value(59.0).unwrap(), 59.0);
    }

    #[test]
    fn coordinates_reject_out_of_range() {
        assert!(Coordinates::normalized(90.001, 0.0).is_err());
        assert!(Coordinates::normalized(0.0, -180.001).is_err());
        assert!(Coordinates::normalized(90.0, 180.0).is_ok());
    }

    #[test]
    fn tag_text_matches_query_layer_format() {
        let coordinates = Coordinates::normalized(59.3293, 18.0686).unwrap();
        assert_eq!(coordinates.to_string(), "(59.329, 18.069)");

        let whole = Coordinates::normalized(59.0, 18.0).unwrap();
        assert_eq!(whole.to_string(), "(59.0, 18.0)");
    }

    #[test]
    fn duplicate_tolerance_is_wider_than_display_precision() {
        assert!(is_same_place(59.329, 18.069, 59.32905, 18.06895));
        assert!(!is_same_place(59.329, 18.069, 59.330, 18.069));
    }
}
