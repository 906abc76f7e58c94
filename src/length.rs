//! `M:SS` song length codec.
//!
//! The only accepted shape is `<minutes>:<seconds>`:
//!
//! - minutes: one or more ASCII digits, no sign, no leading zero unless the
//!   value is exactly `0` (so `"0:45"` and `"125:00"` are fine, `"05:30"` is not)
//! - seconds: exactly two ASCII digits, `00` through `59`
//!
//! These rules make [`format`] the exact inverse of [`parse`] on every
//! accepted string.

use crate::error::CatalogError;
use std::time::Duration;

const FIELD: &str = "length";

/// Parse `M:SS` / `MM:SS` text into a duration.
///
/// # Errors
///
/// Returns `CatalogError::InvalidField("length")` for anything that is not
/// exactly minutes, one colon, and two-digit seconds below 60.
pub fn parse(text: &str) -> Result<Duration, CatalogError> {
    let invalid = || CatalogError::InvalidField(FIELD);

    let (minutes, seconds) = text.split_once(':').ok_or_else(invalid)?;

    if !is_canonical_minutes(minutes) || seconds.len() != 2 || !all_digits(seconds) {
        return Err(invalid());
    }

    let minutes: u64 = minutes.parse().map_err(|_| invalid())?;
    let seconds: u64 = seconds.parse().map_err(|_| invalid())?;
    if seconds >= 60 {
        return Err(invalid());
    }

    let total = minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(invalid)?;

    log::trace!("Parsed length `{text}' as {total}s");
    Ok(Duration::from_secs(total))
}

/// Format a duration as `M:SS`. Sub-second precision is dropped.
#[must_use]
pub fn format(length: Duration) -> String {
    let total = length.as_secs();
    format!("{}:{:02}", total / 60, total % 60)
}

fn all_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

fn is_canonical_minutes(text: &str) -> bool {
    all_digits(text) && (text == "0" || !text.starts_with('0'))
}

/// Serde adapter for `Duration` fields that travel as `M:SS` text.
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use std::time::Duration;
///
/// #[derive(Serialize, Deserialize)]
/// struct Track {
///     #[serde(with = "srotify::length::mmss")]
///     length: Duration,
/// }
///
/// let json = serde_json::to_string(&Track { length: Duration::from_secs(130) })?;
/// assert_eq!(json, r#"{"length":"2:10"}"#);
/// # Ok::<(), serde_json::Error>(())
/// ```
pub mod mmss {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(length: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format(*length))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_formats() {
        assert_eq!(parse("0:30").unwrap(), Duration::from_secs(30));
        assert_eq!(parse("2:10").unwrap(), Duration::from_secs(130));
        assert_eq!(parse("12:13").unwrap(), Duration::from_secs(733));
        assert_eq!(parse("0:00").unwrap(), Duration::ZERO);
        assert_eq!(parse("600:59").unwrap(), Duration::from_secs(36_059));
    }

    #[test]
    fn test_parse_rejects_extra_components() {
        assert_eq!(parse("12:12:12"), Err(CatalogError::InvalidField("length")));
        assert_eq!(parse("1:2:3"), Err(CatalogError::InvalidField("length")));
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        for text in [
            "", ":", "12", "12:", ":12", "1:5", "1:005", "1:60", "1:99", "-1:30", "+1:30",
            "1:-5", "a:10", "1:b0", " 1:10", "1:10 ", "05:30", "00:10", "1.5:10", "١:10",
        ] {
            assert_eq!(
                parse(text),
                Err(CatalogError::InvalidField("length")),
                "`{text}' should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_overflowing_minutes() {
        assert!(parse("99999999999999999999:00").is_err());
        assert!(parse("307445734561825861:00").is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(format(Duration::from_secs(130)), "2:10");
        assert_eq!(format(Duration::from_secs(5)), "0:05");
        assert_eq!(format(Duration::from_secs(3600)), "60:00");
        assert_eq!(format(Duration::from_millis(61_999)), "1:01");
    }

    #[test]
    fn test_round_trip_law() {
        for text in ["0:00", "0:59", "1:00", "2:10", "9:09", "12:13", "59:59", "125:07"] {
            assert_eq!(format(parse(text).unwrap()), text);
        }
        for minutes in 0..200u64 {
            for seconds in 0..60u64 {
                let text = std::format!("{minutes}:{seconds:02}");
                assert_eq!(format(parse(&text).unwrap()), text);
            }
        }
    }
}
