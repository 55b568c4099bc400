//! Exercise session summary model.
//!
//! Defines `ExerciseSession`, one record of the exercise summary list, and
//! the mapping from Samsung Health exercise codes to TCX sport categories.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use validator::Validate;

/// Exercise type code Samsung Health uses for running.
pub const RUNNING_CODE: &str = "1002";

/// Exercise type code Samsung Health uses for cycling.
pub const CYCLING_CODE: &str = "11007";

/// Sport category of a TCX activity.
///
/// TCX only knows these three broad categories, whatever the source
/// taxonomy looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Sport {
    /// Running exercises.
    Running,
    /// Cycling exercises.
    Biking,
    /// Everything else.
    #[default]
    Other,
}

impl Sport {
    /// Maps a Samsung Health exercise type code to a sport.
    ///
    /// # Example
    ///
    /// ```
    /// use shared::models::Sport;
    ///
    /// assert_eq!(Sport::from_code("1002"), Sport::Running);
    /// assert_eq!(Sport::from_code("11007"), Sport::Biking);
    /// assert_eq!(Sport::from_code("9999"), Sport::Other);
    /// ```
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            RUNNING_CODE => Self::Running,
            CYCLING_CODE => Self::Biking,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => write!(f, "Running"),
            Self::Biking => write!(f, "Biking"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A raw row of the exercise summary list.
///
/// Column names have the `com.samsung.health.exercise.` prefix already
/// stripped. Values are kept as text until the row is turned into an
/// [`ExerciseSession`], so that a malformed row only fails its own session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseRow {
    fields: HashMap<String, String>,
}

impl ExerciseRow {
    /// Creates an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column value.
    #[must_use]
    pub fn with_field(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(column, value);
        self
    }

    /// Inserts a column value, replacing any previous value.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    /// Returns the value of a column.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Returns the session identifier, or an empty string if the column is missing.
    #[must_use]
    pub fn datauuid(&self) -> &str {
        self.get("datauuid").unwrap_or_default()
    }
}

/// Errors that can occur while turning a summary row into a session.
#[derive(Debug, Error)]
pub enum ExerciseValidationError {
    /// A required column is missing from the row.
    #[error("Missing column '{0}'")]
    MissingColumn(String),

    /// A numeric column could not be parsed.
    #[error("Malformed value '{value}' in column '{column}'")]
    MalformedField {
        /// The column name.
        column: String,
        /// The offending value.
        value: String,
    },

    /// Validation failed with details.
    #[error("Validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

/// One record of the exercise summary list.
///
/// Numeric statistics are optional because the export leaves them empty
/// when the device did not record them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct ExerciseSession {
    /// Identifier linking the session to its sample stores.
    #[validate(length(min = 1, message = "Session identifier cannot be empty"))]
    pub datauuid: String,

    /// Local start time as exported, `YYYY-MM-DD HH:MM:SS.mmm`.
    #[validate(length(min = 10, message = "Start time must contain a date"))]
    pub start_time: String,

    /// Numeric exercise type code.
    pub exercise_type: String,

    /// Duration in milliseconds.
    pub duration_ms: Option<f64>,

    /// Total calories burned.
    pub total_calorie: Option<f64>,

    /// Distance in meters.
    pub distance: Option<f64>,

    /// Number of heart rate samples the device recorded.
    pub heart_rate_sample_count: Option<u32>,

    /// Mean heart rate.
    pub mean_heart_rate: Option<f64>,

    /// Maximum heart rate.
    pub max_heart_rate: Option<f64>,

    /// Minimum heart rate.
    pub min_heart_rate: Option<f64>,

    /// Mean speed in meters per second.
    pub mean_speed: Option<f64>,

    /// Maximum speed in meters per second.
    pub max_speed: Option<f64>,

    /// Mean cadence.
    pub mean_cadence: Option<f64>,

    /// Maximum cadence.
    pub max_cadence: Option<f64>,

    /// Whether a location (GPS) store exists for the session.
    pub has_location_data: bool,

    /// Whether a live (physiological) store exists for the session.
    pub has_live_data: bool,
}

impl ExerciseSession {
    /// Creates a session with the required fields and no statistics.
    #[must_use]
    pub fn new(
        datauuid: impl Into<String>,
        start_time: impl Into<String>,
        exercise_type: impl Into<String>,
    ) -> Self {
        Self {
            datauuid: datauuid.into(),
            start_time: start_time.into(),
            exercise_type: exercise_type.into(),
            ..Self::default()
        }
    }

    /// Parses and validates a summary row.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `datauuid`, `start_time` or `exercise_type` is missing
    /// - a numeric statistic is present but not a number
    /// - the identifier or start time fails validation
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_row(row: &ExerciseRow) -> Result<Self, ExerciseValidationError> {
        let session = Self {
            datauuid: required(row, "datauuid")?,
            start_time: required(row, "start_time")?,
            exercise_type: required(row, "exercise_type")?,
            duration_ms: optional_number(row, "duration")?,
            total_calorie: optional_number(row, "total_calorie")?,
            distance: optional_number(row, "distance")?,
            heart_rate_sample_count: optional_number(row, "heart_rate_sample_count")?
                .map(|count| count as u32),
            mean_heart_rate: optional_number(row, "mean_heart_rate")?,
            max_heart_rate: optional_number(row, "max_heart_rate")?,
            min_heart_rate: optional_number(row, "min_heart_rate")?,
            mean_speed: optional_number(row, "mean_speed")?,
            max_speed: optional_number(row, "max_speed")?,
            mean_cadence: optional_number(row, "mean_cadence")?,
            max_cadence: optional_number(row, "max_cadence")?,
            has_location_data: flag(row, "location_data"),
            has_live_data: flag(row, "live_data"),
        };
        session.validate_session()?;
        Ok(session)
    }

    /// Validates the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or the start time is too
    /// short to contain a date.
    pub fn validate_session(&self) -> Result<(), ExerciseValidationError> {
        self.validate()?;
        Ok(())
    }

    /// Returns the TCX sport category of this session.
    #[must_use]
    pub fn sport(&self) -> Sport {
        Sport::from_code(&self.exercise_type)
    }

    /// Returns the start time in TCX form, used as activity id and lap start.
    ///
    /// # Example
    ///
    /// ```
    /// use shared::models::ExerciseSession;
    ///
    /// let session = ExerciseSession::new("abc", "2020-05-01 07:30:12.345", "1002");
    /// assert_eq!(session.activity_id(), "2020-05-01T07:30:12.345Z");
    /// ```
    #[must_use]
    pub fn activity_id(&self) -> String {
        format!("{}Z", self.start_time.replace(' ', "T"))
    }

    /// Returns the `YYYY-MM-DD` date part of the start time.
    #[must_use]
    pub fn date_code(&self) -> &str {
        self.start_time.get(..10).unwrap_or(&self.start_time)
    }
}

fn required(row: &ExerciseRow, column: &str) -> Result<String, ExerciseValidationError> {
    row.get(column)
        .map(str::to_string)
        .ok_or_else(|| ExerciseValidationError::MissingColumn(column.to_string()))
}

fn optional_number(row: &ExerciseRow, column: &str) -> Result<Option<f64>, ExerciseValidationError> {
    match row.get(column).map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ExerciseValidationError::MalformedField {
                column: column.to_string(),
                value: value.to_string(),
            }),
    }
}

fn flag(row: &ExerciseRow, column: &str) -> bool {
    row.get(column).is_some_and(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_row() -> ExerciseRow {
        ExerciseRow::new()
            .with_field("datauuid", "a1b2c3")
            .with_field("start_time", "2021-06-12 08:15:00.000")
            .with_field("exercise_type", "1002")
            .with_field("duration", "1800000")
            .with_field("total_calorie", "312.6")
            .with_field("distance", "5012.3")
            .with_field("heart_rate_sample_count", "360")
            .with_field("mean_heart_rate", "142.5")
            .with_field("max_heart_rate", "171.0")
            .with_field("min_heart_rate", "")
            .with_field("mean_speed", "2.78")
            .with_field("max_speed", "4.1")
            .with_field("mean_cadence", "")
            .with_field("max_cadence", "")
            .with_field("location_data", "a1b2c3.location_data.json")
            .with_field("live_data", "")
    }

    #[test]
    fn test_sport_from_code() {
        assert_eq!(Sport::from_code("1002"), Sport::Running);
        assert_eq!(Sport::from_code("11007"), Sport::Biking);
        assert_eq!(Sport::from_code("9999"), Sport::Other);
        assert_eq!(Sport::from_code(""), Sport::Other);
    }

    #[test]
    fn test_sport_display() {
        assert_eq!(Sport::Running.to_string(), "Running");
        assert_eq!(Sport::Biking.to_string(), "Biking");
        assert_eq!(Sport::Other.to_string(), "Other");
    }

    #[test]
    fn test_session_from_row() {
        let session = ExerciseSession::from_row(&create_test_row()).unwrap();

        assert_eq!(session.datauuid, "a1b2c3");
        assert_eq!(session.duration_ms, Some(1_800_000.0));
        assert_eq!(session.heart_rate_sample_count, Some(360));
        assert_eq!(session.mean_heart_rate, Some(142.5));
        assert!(session.min_heart_rate.is_none());
        assert!(session.mean_cadence.is_none());
        assert!(session.has_location_data);
        assert!(!session.has_live_data);
        assert_eq!(session.sport(), Sport::Running);
    }

    #[test]
    fn test_session_from_row_malformed_number() {
        let row = create_test_row().with_field("total_calorie", "lots");

        let result = ExerciseSession::from_row(&row);

        assert!(matches!(
            result.unwrap_err(),
            ExerciseValidationError::MalformedField { column, .. } if column == "total_calorie"
        ));
    }

    #[test]
    fn test_session_from_row_missing_column() {
        let row = ExerciseRow::new()
            .with_field("datauuid", "x")
            .with_field("start_time", "2021-06-12 08:15:00.000");

        let result = ExerciseSession::from_row(&row);

        assert!(matches!(
            result.unwrap_err(),
            ExerciseValidationError::MissingColumn(column) if column == "exercise_type"
        ));
    }

    #[test]
    fn test_session_validation_empty_uuid() {
        let row = create_test_row().with_field("datauuid", "");

        let result = ExerciseSession::from_row(&row);

        assert!(matches!(
            result.unwrap_err(),
            ExerciseValidationError::ValidationError(_)
        ));
    }

    #[test]
    fn test_activity_id_and_date_code() {
        let session = ExerciseSession::new("id", "2021-06-12 08:15:00.000", "11007");

        assert_eq!(session.activity_id(), "2021-06-12T08:15:00.000Z");
        assert_eq!(session.date_code(), "2021-06-12");
        assert_eq!(session.sport(), Sport::Biking);
    }

    #[test]
    fn test_row_datauuid_defaults_to_empty() {
        assert_eq!(ExerciseRow::new().datauuid(), "");
    }
}
