//! Daily activity and body measurement models.

use super::format_decimal;
use serde::{Deserialize, Serialize};

/// Column headers of the Garmin Connect "Activities" import.
pub const DAILY_SUMMARY_COLUMNS: [&str; 10] = [
    "Date",
    "Calories Burned",
    "Steps",
    "Distance",
    "Floors",
    "Minutes Sedentary",
    "Minutes Lightly Active",
    "Minutes Fairly Active",
    "Minutes Very Active",
    "Activity Calories",
];

/// Column headers of the Garmin Connect "Body" import.
pub const BODY_MEASUREMENT_COLUMNS: [&str; 5] = ["Date", "Weight", "Height", "BMI", "Fat"];

/// Merged activity figures for one calendar day.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DailySummary {
    /// Date as `YYYY-MM-DD`.
    pub date: String,
    /// Total calories burned (rest plus active).
    pub calories_burned: i64,
    /// Step count.
    pub steps: i64,
    /// Distance in kilometers, two decimals.
    pub distance_km: f64,
    /// Floors climbed.
    pub floors: i64,
    /// Sedentary minutes. Garmin Connect ignores this, so it is always zero.
    pub minutes_sedentary: i64,
    /// Walking minutes.
    pub minutes_lightly_active: i64,
    /// Always zero; the export has no matching figure.
    pub minutes_fairly_active: i64,
    /// Running minutes.
    pub minutes_very_active: i64,
    /// Calories burned by activity.
    pub activity_calories: i64,
}

impl DailySummary {
    /// Creates an empty summary for a date.
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }

    /// Returns the row in [`DAILY_SUMMARY_COLUMNS`] order.
    #[must_use]
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.calories_burned.to_string(),
            self.steps.to_string(),
            format_decimal(self.distance_km),
            self.floors.to_string(),
            self.minutes_sedentary.to_string(),
            self.minutes_lightly_active.to_string(),
            self.minutes_fairly_active.to_string(),
            self.minutes_very_active.to_string(),
            self.activity_calories.to_string(),
        ]
    }
}

/// One weight measurement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyMeasurement {
    /// Date as `YYYY-MM-DD`.
    pub date: String,
    /// Weight in kilograms.
    pub weight: f64,
    /// Height in centimeters.
    pub height: f64,
    /// Body mass index, two decimals.
    pub bmi: f64,
    /// Body fat percentage, one decimal.
    pub fat: f64,
}

impl BodyMeasurement {
    /// Returns the row in [`BODY_MEASUREMENT_COLUMNS`] order.
    #[must_use]
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            format_decimal(self.weight),
            format_decimal(self.height),
            format_decimal(self.bmi),
            format_decimal(self.fat),
        ]
    }
}
