//! Reconciled observation model.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// One synchronized point on a session's timeline.
///
/// Produced by the stream reconciler. `time` is always set; every other
/// field is filled from whichever stream had a reading at that instant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Observation {
    /// ISO-8601 UTC time with a fixed `.000` millisecond field.
    pub time: String,

    /// Latitude in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Longitude in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// Altitude in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,

    /// Cumulative distance in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    /// Cadence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,

    /// Heart rate in whole beats per minute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<i64>,

    /// Speed in meters per second.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl Observation {
    /// Creates an observation carrying only its time.
    #[must_use]
    pub fn at(time: impl Into<String>) -> Self {
        Self {
            time: time.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if both latitude and longitude are known.
    #[must_use]
    pub fn has_position(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// Formats epoch milliseconds as `YYYY-MM-DDTHH:MM:SS.000Z`.
///
/// Sub-second precision is dropped; the millisecond field is always `000`.
/// Returns `None` if the timestamp is outside chrono's representable range.
///
/// # Example
///
/// ```
/// use shared::models::format_epoch_millis;
///
/// assert_eq!(
///     format_epoch_millis(1_577_872_800_123).as_deref(),
///     Some("2020-01-01T10:00:00.000Z")
/// );
/// ```
#[must_use]
pub fn format_epoch_millis(millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S.000Z").to_string())
}

/// Formats a decimal value so that whole numbers keep one fractional digit.
///
/// Import files written this way read `1800.0` rather than `1800`.
///
/// # Example
///
/// ```
/// use shared::models::format_decimal;
///
/// assert_eq!(format_decimal(1800.0), "1800.0");
/// assert_eq!(format_decimal(22.38), "22.38");
/// ```
#[must_use]
pub fn format_decimal(value: f64) -> String {
    format!("{value:?}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_epoch_zero() {
        assert_eq!(
            format_epoch_millis(0).as_deref(),
            Some("1970-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_format_truncates_milliseconds() {
        assert_eq!(
            format_epoch_millis(1_999).as_deref(),
            Some("1970-01-01T00:00:01.000Z")
        );
    }

    #[test]
    fn test_format_out_of_range() {
        assert!(format_epoch_millis(i64::MAX).is_none());
    }

    #[test]
    fn test_has_position_requires_both_coordinates() {
        let mut obs = Observation::at("1970-01-01T00:00:00.000Z");
        assert!(!obs.has_position());

        obs.latitude = Some(10.0);
        assert!(!obs.has_position());

        obs.longitude = Some(20.0);
        assert!(obs.has_position());
    }

    #[test]
    fn test_observation_serialization_skips_missing_fields() {
        let mut obs = Observation::at("1970-01-01T00:00:01.000Z");
        obs.heart_rate = Some(120);

        let json = serde_json::to_string(&obs).unwrap();

        assert_eq!(json, r#"{"time":"1970-01-01T00:00:01.000Z","heart_rate":120}"#);
    }

    #[test]
    fn test_format_decimal_keeps_fraction_digit() {
        assert_eq!(format_decimal(180.0), "180.0");
        assert_eq!(format_decimal(0.0), "0.0");
        assert_eq!(format_decimal(2000.5), "2000.5");
        assert_eq!(format_decimal(6.54), "6.54");
        assert_eq!(format_decimal(-3.25), "-3.25");
    }
}
