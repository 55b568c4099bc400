//! Lap model.
//!
//! A lap is the aggregate summary of one exercise session together with the
//! track of reconciled observations it owns.

use super::{ExerciseSession, Observation};
use serde::{Deserialize, Serialize};

/// Summary and track of one session in the output document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Lap {
    /// Lap start time in TCX form.
    pub start_time: String,

    /// Total time in seconds.
    pub total_time_secs: f64,

    /// Distance in meters.
    pub distance_meters: f64,

    /// Calories burned.
    pub calories: f64,

    /// Average heart rate, omitted when unknown or zero.
    pub average_heart_rate: Option<i64>,

    /// Maximum heart rate, omitted when unknown or zero.
    pub maximum_heart_rate: Option<i64>,

    /// Average speed, omitted when unknown or zero.
    pub average_speed: Option<f64>,

    /// Maximum speed, kept whenever the summary has one.
    pub maximum_speed: Option<f64>,

    /// Average cadence, omitted when unknown or zero.
    pub average_cadence: Option<f64>,

    /// Maximum cadence, omitted when unknown or zero.
    pub maximum_cadence: Option<f64>,

    /// Ordered observations forming the lap's track.
    pub track: Vec<Observation>,
}

impl Lap {
    /// Builds a lap from a session summary and its reconciled track.
    ///
    /// # Example
    ///
    /// ```
    /// use shared::models::{ExerciseSession, Lap};
    ///
    /// let mut session = ExerciseSession::new("id", "2021-06-12 08:15:00.000", "1002");
    /// session.duration_ms = Some(90_500.0);
    /// session.mean_heart_rate = Some(0.0);
    ///
    /// let lap = Lap::from_session(&session, Vec::new());
    /// assert_eq!(lap.total_time_secs, 90.5);
    /// assert!(lap.average_heart_rate.is_none());
    /// ```
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_session(session: &ExerciseSession, track: Vec<Observation>) -> Self {
        Self {
            start_time: session.activity_id(),
            total_time_secs: session.duration_ms.map_or(0.0, |ms| ms / 1000.0),
            distance_meters: session.distance.unwrap_or_default(),
            calories: session.total_calorie.unwrap_or_default(),
            average_heart_rate: non_zero(session.mean_heart_rate).map(|hr| hr as i64),
            maximum_heart_rate: non_zero(session.max_heart_rate).map(|hr| hr as i64),
            average_speed: non_zero(session.mean_speed),
            maximum_speed: session.max_speed,
            average_cadence: non_zero(session.mean_cadence),
            maximum_cadence: non_zero(session.max_cadence),
            track,
        }
    }

    /// Returns `true` if any lap extension value is set.
    #[must_use]
    pub fn has_extensions(&self) -> bool {
        self.average_speed.is_some() || self.average_cadence.is_some() || self.maximum_cadence.is_some()
    }
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.abs() > 0.0)
}
