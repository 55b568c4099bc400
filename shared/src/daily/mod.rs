//! Daily activity aggregation.
//!
//! Samsung Health spreads the daily figures over three files: floors climbed
//! (many entries per day), calories burned (one entry per day) and the
//! activity day summary (steps, distance, active minutes). They are summed
//! and merged per date into [`DailySummary`] rows.

use crate::export::{CsvTable, ExportDir, ExportError};
use crate::models::DailySummary;
use chrono::DateTime;
use std::collections::BTreeMap;
use std::path::Path;

/// File pattern of the floors climbed data.
pub const FLOORS_PATTERN: &str = "com.samsung.health.floors_climbed.*.csv";

/// File pattern of the calories burned data.
pub const CALORIES_PATTERN: &str = "com.samsung.shealth.calories_burned.details.*.csv";

/// File pattern of the activity day summary.
pub const ACTIVITY_PATTERN: &str = "com.samsung.shealth.activity.day_summary.*.csv";

const CALORIES_PREFIX: &str = "com.samsung.shealth.calories_burned.";

/// Activity figures of one day, as read from the day summary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DayActivity {
    /// Step count.
    pub steps: i64,
    /// Distance in kilometers, two decimals.
    pub distance_km: f64,
    /// Calories burned by activity.
    pub calories: i64,
    /// Running minutes.
    pub run_minutes: i64,
    /// Walking minutes.
    pub walk_minutes: i64,
}

/// Rounds `value` to `decimals` decimal places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

#[allow(clippy::cast_possible_truncation)]
fn day_of(table: &CsvTable, row: &csv::StringRecord, column: usize) -> Result<String, ExportError> {
    let millis = table.number(row, column)? as i64;
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .ok_or_else(|| ExportError::MalformedField {
            path: table.path().to_path_buf(),
            column: table.headers()[column].clone(),
            value: millis.to_string(),
        })
}

/// Reads floors climbed, summed per date.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a value is malformed.
#[allow(clippy::cast_possible_truncation)]
pub fn read_floors(path: &Path) -> Result<BTreeMap<String, i64>, ExportError> {
    let table = CsvTable::read(path, "com.samsung.health.floors_climbed.")?;
    let start_time = table.column("start_time")?;
    let floor = table.column("floor")?;

    let mut floors = BTreeMap::new();
    for row in table.rows() {
        let start = CsvTable::cell(row, start_time);
        let date = start.get(..10).unwrap_or(start).to_string();
        *floors.entry(date).or_insert(0) += table.number(row, floor)? as i64;
    }
    Ok(floors)
}

/// Reads total calories burned per date.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a value is malformed.
#[allow(clippy::cast_possible_truncation)]
pub fn read_calories(path: &Path) -> Result<BTreeMap<String, i64>, ExportError> {
    let table = CsvTable::read(path, CALORIES_PREFIX)?;
    let day_time = table.column("day_time")?;
    let rest = table.column("rest_calorie")?;
    let active = table.column("active_calorie")?;

    let mut calories = BTreeMap::new();
    for row in table.rows() {
        let total = table.number(row, rest)? + table.number(row, active)?;
        calories.insert(day_of(&table, row, day_time)?, total.round() as i64);
    }
    Ok(calories)
}

/// Reads the activity day summary.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a value is malformed.
#[allow(clippy::cast_possible_truncation)]
pub fn read_activity(path: &Path) -> Result<BTreeMap<String, DayActivity>, ExportError> {
    let table = CsvTable::read(path, "")?;
    let day_time = table.column("day_time")?;
    let step_count = table.column("step_count")?;
    let distance = table.column("distance")?;
    let calorie = table.column("calorie")?;
    let run_time = table.column("run_time")?;
    let walk_time = table.column("walk_time")?;

    let mut activity = BTreeMap::new();
    for row in table.rows() {
        let day = DayActivity {
            steps: table.number(row, step_count)? as i64,
            distance_km: round_to(table.number(row, distance)? / 1000.0, 2),
            calories: table.number(row, calorie)? as i64,
            run_minutes: (table.number(row, run_time)? / 60_000.0) as i64,
            walk_minutes: (table.number(row, walk_time)? / 60_000.0) as i64,
        };
        activity.insert(day_of(&table, row, day_time)?, day);
    }
    Ok(activity)
}

/// Merges the three daily sources, sorted by date.
///
/// Calories seed the dates, floors are added (dates without calories get
/// zero calories), and activity figures fill in the rest. A date whose day
/// summary reports zero steps is dropped, including when the day summary is
/// the only source for that date. Dates without a day summary are kept.
///
/// # Example
///
/// ```
/// use shared::daily::{merge_daily, DayActivity};
/// use std::collections::BTreeMap;
///
/// let calories = BTreeMap::from([("2021-01-01".to_string(), 2000)]);
/// let floors = BTreeMap::from([("2021-01-01".to_string(), 3)]);
/// let activity = BTreeMap::from([(
///     "2021-01-01".to_string(),
///     DayActivity { steps: 5000, ..DayActivity::default() },
/// )]);
///
/// let merged = merge_daily(&floors, &calories, &activity);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].floors, 3);
/// assert_eq!(merged[0].steps, 5000);
/// ```
#[must_use]
pub fn merge_daily(
    floors: &BTreeMap<String, i64>,
    calories: &BTreeMap<String, i64>,
    activity: &BTreeMap<String, DayActivity>,
) -> Vec<DailySummary> {
    let mut merged: BTreeMap<String, DailySummary> = calories
        .iter()
        .map(|(date, cals)| {
            let summary = DailySummary {
                calories_burned: *cals,
                ..DailySummary::new(date.as_str())
            };
            (date.clone(), summary)
        })
        .collect();

    for (date, count) in floors {
        merged
            .entry(date.clone())
            .or_insert_with(|| DailySummary::new(date.as_str()))
            .floors = *count;
    }

    for (date, day) in activity {
        if day.steps == 0 {
            merged.remove(date);
            continue;
        }
        let summary = merged
            .entry(date.clone())
            .or_insert_with(|| DailySummary::new(date.as_str()));
        summary.steps = day.steps;
        summary.distance_km = day.distance_km;
        summary.minutes_sedentary = 0;
        summary.minutes_lightly_active = day.walk_minutes;
        summary.minutes_fairly_active = 0;
        summary.minutes_very_active = day.run_minutes;
        summary.activity_calories = day.calories;
    }

    merged.into_values().collect()
}

/// Reads and merges the daily activity data of an export.
///
/// # Errors
///
/// Returns an error if any of the three source files is missing or malformed.
pub fn convert_daily(export: &ExportDir) -> Result<Vec<DailySummary>, ExportError> {
    let floors = read_floors(&export.find_single(FLOORS_PATTERN)?)?;
    let calories = read_calories(&export.find_single(CALORIES_PATTERN)?)?;
    let activity = read_activity(&export.find_single(ACTIVITY_PATTERN)?)?;

    let merged = merge_daily(&floors, &calories, &activity);
    tracing::info!(
        floors = floors.len(),
        calories = calories.len(),
        activity = activity.len(),
        days = merged.len(),
        "Merged daily activity data"
    );
    Ok(merged)
}
