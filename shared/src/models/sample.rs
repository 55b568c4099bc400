//! Sensor sample models.
//!
//! Defines the two independently sampled streams recorded for an exercise
//! session: positional fixes and physiological ("live") readings.

use serde::{Deserialize, Serialize};

/// A timestamped GPS fix.
///
/// Deserialized from the `location_data` JSON store of an exercise, where the
/// timestamp field is named `start_time`.
///
/// # Example
///
/// ```
/// use shared::models::PositionalSample;
///
/// let json = r#"{"start_time": 1000, "latitude": 52.5, "longitude": 13.4, "accuracy": 4.0}"#;
/// let sample: PositionalSample = serde_json::from_str(json).unwrap();
///
/// assert_eq!(sample.timestamp, 1000);
/// assert!(sample.altitude.is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionalSample {
    /// Epoch milliseconds of the fix.
    #[serde(rename = "start_time")]
    pub timestamp: i64,

    /// Latitude in degrees.
    pub latitude: f64,

    /// Longitude in degrees.
    pub longitude: f64,

    /// Altitude in meters, if the device reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl PositionalSample {
    /// Creates a positional sample without altitude.
    #[must_use]
    pub fn new(timestamp: i64, latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp,
            latitude,
            longitude,
            altitude: None,
        }
    }

    /// Sets the altitude.
    #[must_use]
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }
}

/// A timestamped reading from the non-positional sensors.
///
/// Any subset of the fields may be present.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhysiologicalSample {
    /// Epoch milliseconds of the reading.
    #[serde(rename = "start_time")]
    pub timestamp: i64,

    /// Cumulative distance in meters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    /// Cadence in steps or revolutions per minute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,

    /// Heart rate in beats per minute. The export may carry fractional values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,

    /// Speed in meters per second.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl PhysiologicalSample {
    /// Creates an empty reading at the given timestamp.
    #[must_use]
    pub fn new(timestamp: i64) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    /// Sets the distance.
    #[must_use]
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Sets the cadence.
    #[must_use]
    pub fn with_cadence(mut self, cadence: f64) -> Self {
        self.cadence = Some(cadence);
        self
    }

    /// Sets the heart rate.
    #[must_use]
    pub fn with_heart_rate(mut self, heart_rate: f64) -> Self {
        self.heart_rate = Some(heart_rate);
        self
    }

    /// Sets the speed.
    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }
}
