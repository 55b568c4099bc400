//! Samsung Health export directory access.
//!
//! Locates the CSV and JSON files of an unpacked Samsung Health export and
//! parses them into the crate's models. File naming follows the export
//! layout:
//!
//! - `com.samsung.shealth.exercise.<timestamp>.csv` - exercise summary list
//! - `jsons/com.samsung.shealth.exercise/<x>/<uuid>.com.samsung.health.exercise.location_data.json`
//! - `jsons/com.samsung.shealth.exercise/<x>/<uuid>.com.samsung.health.exercise.live_data.json`
//!
//! where `<x>` is the first character of the session uuid.

pub mod table;

pub use table::CsvTable;

use crate::models::{ExerciseRow, PhysiologicalSample, PositionalSample};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File pattern of the exercise summary list.
pub const EXERCISE_LIST_PATTERN: &str = "com.samsung.shealth.exercise.*.csv";

/// Column prefix used in the exercise summary list.
pub const EXERCISE_COLUMN_PREFIX: &str = "com.samsung.health.exercise.";

const EXERCISE_JSON_DIR: &str = "jsons/com.samsung.shealth.exercise";

/// Errors that can occur while reading the export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No file matches the pattern of a required data domain.
    #[error("No export file matching '{pattern}' found in {}", .root.display())]
    MissingSource {
        /// The file pattern searched for.
        pattern: String,
        /// The export root.
        root: PathBuf,
    },

    /// The glob pattern is invalid.
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// The file path.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// A CSV file is malformed.
    #[error("Malformed CSV in {}: {source}", .path.display())]
    Csv {
        /// The file path.
        path: PathBuf,
        /// The underlying error.
        source: csv::Error,
    },

    /// A JSON sample store is malformed.
    #[error("Malformed JSON in {}: {source}", .path.display())]
    Json {
        /// The file path.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },

    /// A CSV file lacks a required column.
    #[error("Column '{column}' missing in {}", .path.display())]
    MissingColumn {
        /// The file path.
        path: PathBuf,
        /// The column name.
        column: String,
    },

    /// A CSV cell cannot be converted to its expected type.
    #[error("Malformed value '{value}' in column '{column}' of {}", .path.display())]
    MalformedField {
        /// The file path.
        path: PathBuf,
        /// The column name.
        column: String,
        /// The offending value.
        value: String,
    },
}

/// The kind of per-session sample store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleStore {
    /// GPS fixes.
    Location,
    /// Heart rate, cadence, speed and distance readings.
    Live,
}

impl SampleStore {
    fn file_suffix(self) -> &'static str {
        match self {
            Self::Location => "location_data",
            Self::Live => "live_data",
        }
    }
}

/// An unpacked Samsung Health export.
#[derive(Debug, Clone)]
pub struct ExportDir {
    root: PathBuf,
}

impl ExportDir {
    /// Creates a handle on an export directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the export root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Finds the file matching `pattern` in the export root.
    ///
    /// If several files match, the lexically first one is used.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::MissingSource`] if no file matches.
    pub fn find_single(&self, pattern: &str) -> Result<PathBuf, ExportError> {
        let escaped_root = glob::Pattern::escape(&self.root.to_string_lossy());
        let full_pattern = format!("{escaped_root}/{pattern}");

        let mut matches: Vec<PathBuf> = glob::glob(&full_pattern)?
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .collect();
        matches.sort();

        matches
            .into_iter()
            .next()
            .ok_or_else(|| ExportError::MissingSource {
                pattern: pattern.to_string(),
                root: self.root.clone(),
            })
    }

    /// Reads the exercise summary list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is missing or is not valid CSV.
    pub fn exercise_rows(&self) -> Result<Vec<ExerciseRow>, ExportError> {
        let path = self.find_single(EXERCISE_LIST_PATTERN)?;
        let table = CsvTable::read(&path, EXERCISE_COLUMN_PREFIX)?;

        let rows: Vec<ExerciseRow> = table
            .rows()
            .map(|record| {
                let mut row = ExerciseRow::new();
                for (header, value) in table.headers().iter().zip(record.iter()) {
                    row.insert(header.as_str(), value.trim());
                }
                row
            })
            .collect();

        tracing::info!(path = %path.display(), sessions = rows.len(), "Read exercise list");
        Ok(rows)
    }

    /// Returns the path of a session's sample store.
    #[must_use]
    pub fn sample_path(&self, datauuid: &str, store: SampleStore) -> PathBuf {
        let subdir: String = datauuid.chars().take(1).collect();
        self.root.join(EXERCISE_JSON_DIR).join(subdir).join(format!(
            "{datauuid}.com.samsung.health.exercise.{}.json",
            store.file_suffix()
        ))
    }

    /// Reads the GPS fixes of a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or parsed.
    pub fn location_data(&self, datauuid: &str) -> Result<Vec<PositionalSample>, ExportError> {
        read_json(&self.sample_path(datauuid, SampleStore::Location))
    }

    /// Reads the live sensor readings of a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or parsed.
    pub fn live_data(&self, datauuid: &str) -> Result<Vec<PhysiologicalSample>, ExportError> {
        read_json(&self.sample_path(datauuid, SampleStore::Live))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ExportError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const EXERCISE_CSV: &str = "com.samsung.shealth.exercise,6313002,10\n\
        com.samsung.health.exercise.datauuid,com.samsung.health.exercise.start_time,total_calorie,com.samsung.health.exercise.exercise_type,com.samsung.health.exercise.live_data,\n\
        abc-1,2021-06-12 08:15:00.000,312.6,1002,abc-1.live_data.json,\n\
        def-2,2021-06-13 09:00:00.000,,11007,,\n";

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let export = ExportDir::new(dir.path());

        let result = export.exercise_rows();

        assert!(matches!(
            result.unwrap_err(),
            ExportError::MissingSource { pattern, .. } if pattern == EXERCISE_LIST_PATTERN
        ));
    }

    #[test]
    fn test_exercise_rows() {
        let dir = tempfile::tempdir().unwrap();
        write(
            &dir.path().join("com.samsung.shealth.exercise.20210701.csv"),
            EXERCISE_CSV,
        );
        let export = ExportDir::new(dir.path());

        let rows = export.exercise_rows().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].datauuid(), "abc-1");
        assert_eq!(rows[0].get("exercise_type"), Some("1002"));
        assert_eq!(rows[0].get("total_calorie"), Some("312.6"));
        assert_eq!(rows[1].get("total_calorie"), Some(""));
        assert_eq!(rows[1].get("live_data"), Some(""));
    }

    #[test]
    fn test_sample_path_layout() {
        let export = ExportDir::new("/data/export");

        let path = export.sample_path("f00d-1", SampleStore::Location);

        assert_eq!(
            path,
            PathBuf::from(
                "/data/export/jsons/com.samsung.shealth.exercise/f/f00d-1.com.samsung.health.exercise.location_data.json"
            )
        );
    }

    #[test]
    fn test_live_data_roundtrip_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let export = ExportDir::new(dir.path());
        write(
            &export.sample_path("abc", SampleStore::Live),
            r#"[{"start_time": 1000, "heart_rate": 101.0}, {"start_time": 2000, "cadence": 70.0}]"#,
        );

        let samples = export.live_data("abc").unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].heart_rate, Some(101.0));
        assert_eq!(samples[1].cadence, Some(70.0));
    }

    #[test]
    fn test_unreadable_store_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let export = ExportDir::new(dir.path());

        assert!(matches!(
            export.location_data("missing").unwrap_err(),
            ExportError::Io { .. }
        ));
    }

    #[test]
    fn test_malformed_store_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let export = ExportDir::new(dir.path());
        write(
            &export.sample_path("bad", SampleStore::Location),
            r#"[{"start_time": 1000, "latitude": "north"}]"#,
        );

        assert!(matches!(
            export.location_data("bad").unwrap_err(),
            ExportError::Json { .. }
        ));
    }
}
