//! Directory sink for TCX documents.

use super::chunked::create_dir;
use super::OutputError;
use crate::models::ExerciseSession;
use crate::pipeline::DocumentSink;
use std::path::{Path, PathBuf};

/// Returns the file name of a session's document,
/// `<exercise_type>_<YYYY-MM-DD>_<datauuid>.tcx`.
///
/// # Example
///
/// ```
/// use shared::models::ExerciseSession;
/// use shared::output::document_file_name;
///
/// let session = ExerciseSession::new("abc", "2021-06-12 08:15:00.000", "1002");
/// assert_eq!(document_file_name(&session), "1002_2021-06-12_abc.tcx");
/// ```
#[must_use]
pub fn document_file_name(session: &ExerciseSession) -> String {
    format!(
        "{}_{}_{}.tcx",
        session.exercise_type,
        session.date_code(),
        session.datauuid
    )
}

/// Writes each document into its own file in an output directory.
#[derive(Debug, Clone)]
pub struct TcxDirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl TcxDirectorySink {
    /// Creates a sink writing into `dir`. The directory is created on the
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Returns the output directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the paths written so far.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DocumentSink for TcxDirectorySink {
    fn write_document(
        &mut self,
        session: &ExerciseSession,
        document: &str,
    ) -> Result<(), OutputError> {
        create_dir(&self.dir)?;
        let path = self.dir.join(document_file_name(session));
        std::fs::write(&path, document).map_err(|source| OutputError::Io {
            path: path.clone(),
            source,
        })?;
        self.written.push(path);
        Ok(())
    }
}
