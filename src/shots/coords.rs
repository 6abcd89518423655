//! Location decoding.
//!
//! Event tables carry locations as a list of numbers that may be null,
//! too short, or contain non-numeric junk depending on the snapshot. This
//! module decides once whether a value is a usable 2-D point.

use serde_json::Value;

use crate::data::models::Point;

/// Decode a location-like value into a point.
///
/// Valid values are arrays whose first two elements are finite numbers.
/// Trailing elements (the z component of a shot end location) are ignored.
/// Anything else, including `null`, returns `None` rather than a default
/// origin: `(0, 0)` is a real pitch location.
pub fn normalize(value: &Value) -> Option<Point> {
    let items = value.as_array()?;
    if items.len() < 2 {
        return None;
    }
    let x = finite(&items[0])?;
    let y = finite(&items[1])?;
    Some(Point::new(x, y))
}

/// Decode an optional field; a missing field is invalid.
pub fn normalize_field(value: Option<&Value>) -> Option<Point> {
    value.and_then(normalize)
}

fn finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}
