//! Body composition conversion.
//!
//! Reads the weight measurements of an export and derives the BMI and body
//! fat percentage Garmin Connect expects.

use crate::daily::round_to;
use crate::export::{CsvTable, ExportDir, ExportError};
use crate::models::BodyMeasurement;
use std::path::Path;

/// File pattern of the weight data.
pub const WEIGHT_PATTERN: &str = "com.samsung.health.weight.*.csv";

/// Builds a measurement from weight (kg), height (cm) and fat mass (kg).
///
/// BMI is rounded to two decimals and the fat percentage to one. Zero
/// weight or height yields zero for the derived values.
///
/// # Example
///
/// ```
/// use shared::body::measurement;
///
/// let m = measurement("2021-03-04", 80.0, 200.0, 16.0);
/// assert_eq!(m.bmi, 20.0);
/// assert_eq!(m.fat, 20.0);
/// ```
#[must_use]
pub fn measurement(date: impl Into<String>, weight: f64, height: f64, fat_mass: f64) -> BodyMeasurement {
    let height_m = height / 100.0;
    let bmi = if height_m.abs() > 0.0 {
        round_to(weight / (height_m * height_m), 2)
    } else {
        0.0
    };
    let fat = if weight.abs() > 0.0 {
        round_to(fat_mass / weight * 100.0, 1)
    } else {
        0.0
    };

    BodyMeasurement {
        date: date.into(),
        weight,
        height,
        bmi,
        fat,
    }
}

/// Reads all weight measurements from a weight CSV file.
///
/// A missing or unparseable `body_fat_mass` counts as zero.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or a weight or height is
/// malformed.
pub fn read_weight(path: &Path) -> Result<Vec<BodyMeasurement>, ExportError> {
    let table = CsvTable::read(path, "com.samsung.health.weight.")?;
    let start_time = table.column("start_time")?;
    let weight = table.column("weight")?;
    let height = table.column("height")?;
    let fat_mass = table.column("body_fat_mass").ok();

    table
        .rows()
        .map(|row| {
            let start = CsvTable::cell(row, start_time);
            let fat = fat_mass
                .and_then(|column| CsvTable::cell(row, column).parse::<f64>().ok())
                .unwrap_or_default();
            Ok(measurement(
                start.get(..10).unwrap_or(start),
                table.number(row, weight)?,
                table.number(row, height)?,
                fat,
            ))
        })
        .collect()
}

/// Reads the weight measurements of an export.
///
/// # Errors
///
/// Returns an error if the weight file is missing or malformed.
pub fn convert_weight(export: &ExportDir) -> Result<Vec<BodyMeasurement>, ExportError> {
    let path = export.find_single(WEIGHT_PATTERN)?;
    let measurements = read_weight(&path)?;
    tracing::info!(path = %path.display(), measurements = measurements.len(), "Read weight data");
    Ok(measurements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_measurement_rounding() {
        let m = measurement("2021-03-04", 72.5, 180.0, 13.2);

        assert_eq!(m.bmi, 22.38);
        assert_eq!(m.fat, 18.2);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_measurement_zero_height() {
        let m = measurement("2021-03-04", 72.5, 0.0, 0.0);

        assert_eq!(m.bmi, 0.0);
        assert_eq!(m.fat, 0.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_read_weight() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("com.samsung.health.weight.20210701.csv");
        fs::write(
            &path,
            "com.samsung.health.weight,6313002,3\n\
             com.samsung.health.weight.start_time,weight,height,body_fat_mass\n\
             2021-03-04 07:00:00.000,72.5,180.0,13.2\n\
             2021-03-05 07:10:00.000,72.0,180.0,\n",
        )
        .unwrap();

        let measurements = read_weight(&path).unwrap();

        assert_eq!(measurements.len(), 2);
        assert_eq!(measurements[0].date, "2021-03-04");
        assert_eq!(measurements[0].fat, 18.2);
        assert_eq!(measurements[1].fat, 0.0);
        assert_eq!(measurements[1].bmi, 22.22);
    }

    #[test]
    fn test_read_weight_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weight.csv");
        fs::write(
            &path,
            "com.samsung.health.weight,6313002,3\n\
             start_time,weight,height\n\
             2021-03-04 07:00:00.000,heavy,180.0\n",
        )
        .unwrap();

        assert!(matches!(
            read_weight(&path).unwrap_err(),
            ExportError::MalformedField { column, .. } if column == "weight"
        ));
    }

    #[test]
    fn test_convert_weight_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            convert_weight(&ExportDir::new(dir.path())).unwrap_err(),
            ExportError::MissingSource { .. }
        ));
    }
}
