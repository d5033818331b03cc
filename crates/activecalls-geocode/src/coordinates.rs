//! Decoder for locations the dispatch system has already geocoded.
//!
//! These arrive as `LL(<lon>,<lat>)` with each half in sexagesimal
//! `D:M:S` notation, e.g. `LL(-77:25:30,37:32:12)`. Longitude comes first.

use std::sync::LazyLock;

use activecalls_core::Coordinates;
use regex::Regex;

use crate::error::CoordinateParseError;

static LL_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"LL\(([^,]+),([^)]+)\)").expect("valid regex"));

/// Decodes an `LL(lon,lat)` tag into decimal coordinates.
///
/// The first group is the longitude and the second the latitude. This order
/// has not been checked against ground truth; keep it as is.
///
/// # Errors
///
/// - [`CoordinateParseError::NotTagged`] if `raw` has no `LL(..,..)` tag.
/// - [`CoordinateParseError::MalformedComponents`] if either group is not
///   exactly three finite numbers separated by `:`.
pub fn decode_ll(raw: &str) -> Result<Coordinates, CoordinateParseError> {
    let caps = LL_TAG_RE
        .captures(raw)
        .ok_or_else(|| CoordinateParseError::NotTagged(raw.to_owned()))?;

    let longitude = dms_to_decimal(caps[1].trim())?;
    let latitude = dms_to_decimal(caps[2].trim())?;
    Ok(Coordinates::new(latitude, longitude))
}

/// Converts `D:M:S` to signed decimal degrees.
///
/// The sign is taken from the degrees component alone; minutes and seconds
/// are always added as positive offsets.
pub(crate) fn dms_to_decimal(dms: &str) -> Result<f64, CoordinateParseError> {
    let malformed = |reason: String| CoordinateParseError::MalformedComponents {
        value: dms.to_owned(),
        reason,
    };

    let parts: Vec<&str> = dms.split(':').collect();
    if parts.len() != 3 {
        return Err(malformed(format!("expected 3 components, got {}", parts.len())));
    }

    let mut values = [0.0_f64; 3];
    for (slot, part) in values.iter_mut().zip(&parts) {
        let part = part.trim();
        let value = part
            .parse::<f64>()
            .map_err(|e| malformed(format!("component {part:?}: {e}")))?;
        if !value.is_finite() {
            return Err(malformed(format!("component {part:?} is not finite")));
        }
        *slot = value;
    }

    let [degrees, minutes, seconds] = values;
    let magnitude = degrees.abs() + minutes / 60.0 + seconds / 3600.0;
    // `-0` parses as negative zero, which is not below zero.
    if degrees < 0.0 {
        Ok(-magnitude)
    } else {
        Ok(magnitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-3,
            "expected ~{expected}, got {actual}"
        );
    }

    #[test]
    fn decodes_richmond_pair_in_lon_lat_order() {
        let c = decode_ll("LL(-77:25:30,37:32:12)").unwrap();
        assert_close(c.longitude, -77.4250);
        assert_close(c.latitude, 37.5367);
    }

    #[test]
    fn tolerates_whitespace_inside_the_tag() {
        let c = decode_ll("LL( -77:25:30 , 37:32:12 )").unwrap();
        assert_close(c.longitude, -77.4250);
        assert_close(c.latitude, 37.5367);
    }

    #[test]
    fn accepts_fractional_seconds() {
        let c = decode_ll("LL(-77:26:13.5,37:33:0.25)").unwrap();
        assert_close(c.longitude, -(77.0 + 26.0 / 60.0 + 13.5 / 3600.0));
        assert_close(c.latitude, 37.0 + 33.0 / 60.0 + 0.25 / 3600.0);
    }

    #[test]
    fn sign_comes_from_degrees_only() {
        assert_close(dms_to_decimal("-10:30:00").unwrap(), -10.5);
        assert_close(dms_to_decimal("10:30:00").unwrap(), 10.5);
        // A negative minutes value is not expected; it still only offsets.
        assert_close(dms_to_decimal("10:-30:00").unwrap(), 10.0 - 0.5);
    }

    #[test]
    fn negative_zero_degrees_is_not_negative() {
        assert_close(dms_to_decimal("-0:30:00").unwrap(), 0.5);
        let c = decode_ll("LL(-0:30:00,37:32:12)").unwrap();
        assert_close(c.longitude, 0.5);
    }

    #[test]
    fn untagged_input_is_not_tagged() {
        let err = decode_ll("123 MAIN ST").unwrap_err();
        assert!(matches!(err, CoordinateParseError::NotTagged(_)));
    }

    #[test]
    fn unterminated_tag_is_not_tagged() {
        let err = decode_ll("LL(-77:25:30,37:32:12").unwrap_err();
        assert!(matches!(err, CoordinateParseError::NotTagged(_)));
    }

    #[test]
    fn wrong_component_count_is_malformed() {
        let err = decode_ll("LL(-77:25,37:32:12)").unwrap_err();
        assert!(
            matches!(err, CoordinateParseError::MalformedComponents { ref value, .. } if value == "-77:25"),
            "got {err:?}"
        );

        let err = decode_ll("LL(-77:25:30:1,37:32:12)").unwrap_err();
        assert!(matches!(
            err,
            CoordinateParseError::MalformedComponents { .. }
        ));
    }

    #[test]
    fn non_numeric_component_is_malformed() {
        let err = decode_ll("LL(-77:2X:30,37:32:12)").unwrap_err();
        assert!(matches!(
            err,
            CoordinateParseError::MalformedComponents { .. }
        ));

        let err = decode_ll("LL(-77:25:30,37::12)").unwrap_err();
        assert!(matches!(
            err,
            CoordinateParseError::MalformedComponents { .. }
        ));
    }

    #[test]
    fn non_finite_component_is_malformed() {
        let err = decode_ll("LL(-77:25:inf,37:32:12)").unwrap_err();
        assert!(matches!(
            err,
            CoordinateParseError::MalformedComponents { .. }
        ));
        let err = decode_ll("LL(NaN:0:0,37:32:12)").unwrap_err();
        assert!(matches!(
            err,
            CoordinateParseError::MalformedComponents { .. }
        ));
    }
}
