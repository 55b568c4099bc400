//! Exercise session pipeline.
//!
//! Drives the conversion of every session in the exercise summary list:
//! load the sample stores, reconcile them, build the TCX document in memory
//! and hand it to a [`DocumentSink`]. Each session is processed on its own;
//! a failing session is reported and the remaining ones still run.

use crate::export::{ExportDir, ExportError};
use crate::models::{
    ExerciseRow, ExerciseSession, ExerciseValidationError, Lap, PhysiologicalSample,
    PositionalSample,
};
use crate::output::OutputError;
use crate::sync::{reconcile, SyncError};
use crate::tcx::build_document;
use thiserror::Error;

/// Source of the per-session sample stores.
pub trait SampleLoader {
    /// Loads the GPS fixes of a session.
    ///
    /// Returns an empty vector if the session has no location store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    fn positional(&self, session: &ExerciseSession) -> Result<Vec<PositionalSample>, ExportError>;

    /// Loads the live sensor readings of a session.
    ///
    /// Returns an empty vector if the session has no live store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store exists but cannot be read or parsed.
    fn physiological(
        &self,
        session: &ExerciseSession,
    ) -> Result<Vec<PhysiologicalSample>, ExportError>;
}

/// Destination of serialized exercise documents.
pub trait DocumentSink {
    /// Writes the document of one session in a single step.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn write_document(&mut self, session: &ExerciseSession, document: &str)
        -> Result<(), OutputError>;
}

impl SampleLoader for ExportDir {
    fn positional(&self, session: &ExerciseSession) -> Result<Vec<PositionalSample>, ExportError> {
        if !session.has_location_data {
            return Ok(Vec::new());
        }
        self.location_data(&session.datauuid)
    }

    fn physiological(
        &self,
        session: &ExerciseSession,
    ) -> Result<Vec<PhysiologicalSample>, ExportError> {
        if !session.has_live_data {
            return Ok(Vec::new());
        }
        self.live_data(&session.datauuid)
    }
}

/// Errors that abort the conversion of a single session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The summary row is invalid.
    #[error("Invalid exercise summary: {0}")]
    Invalid(#[from] ExerciseValidationError),

    /// A sample store could not be loaded.
    #[error("Failed to load samples: {0}")]
    Export(#[from] ExportError),

    /// The sample streams could not be reconciled.
    #[error("Failed to reconcile samples: {0}")]
    Sync(#[from] SyncError),

    /// The document could not be written.
    #[error("Failed to write document: {0}")]
    Sink(#[from] OutputError),
}

/// A session that could not be converted.
#[derive(Debug)]
pub struct SessionFailure {
    /// Identifier of the session, empty if the row had none.
    pub datauuid: String,
    /// Why the conversion failed.
    pub error: SessionError,
}

/// Outcome of converting a list of sessions.
#[derive(Debug, Default)]
pub struct ConversionReport {
    /// Identifiers of the sessions written, in processing order.
    pub converted: Vec<String>,
    /// Sessions that failed, in processing order.
    pub failed: Vec<SessionFailure>,
}

impl ConversionReport {
    /// Returns the number of sessions processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    /// Returns `true` if every session was converted.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Builds the TCX document of one session.
///
/// The track is only built when the session has live data; sessions without
/// it get a lap without a track, even if GPS fixes exist.
///
/// # Errors
///
/// Returns an error if a sample store cannot be loaded or the streams cannot
/// be reconciled.
pub fn prepare_session(
    session: &ExerciseSession,
    loader: &impl SampleLoader,
) -> Result<String, SessionError> {
    let track = if session.has_live_data {
        let physiological = loader.physiological(session)?;
        let positional = loader.positional(session)?;
        let timeline = reconcile(&positional, &physiological)?;
        tracing::debug!(
            session = %session.datauuid,
            positional = positional.len(),
            physiological = physiological.len(),
            observations = timeline.len(),
            "Reconciled session samples"
        );
        timeline.into_observations()
    } else {
        Vec::new()
    };

    let lap = Lap::from_session(session, track);
    Ok(build_document(session, &lap))
}

/// Converts one summary row and writes its document.
///
/// # Errors
///
/// Returns an error if the row is invalid, the samples cannot be loaded or
/// reconciled, or the sink fails.
pub fn convert_session(
    row: &ExerciseRow,
    loader: &impl SampleLoader,
    sink: &mut impl DocumentSink,
) -> Result<ExerciseSession, SessionError> {
    let session = ExerciseSession::from_row(row)?;
    let document = prepare_session(&session, loader)?;
    sink.write_document(&session, &document)?;
    Ok(session)
}

/// Converts every summary row in order.
///
/// Failures are logged and collected in the report; they do not stop the
/// remaining sessions.
pub fn convert_sessions(
    rows: &[ExerciseRow],
    loader: &impl SampleLoader,
    sink: &mut impl DocumentSink,
) -> ConversionReport {
    let mut report = ConversionReport::default();

    for row in rows {
        match convert_session(row, loader, sink) {
            Ok(session) => {
                tracing::info!(
                    session = %session.datauuid,
                    sport = %session.sport(),
                    start_time = %session.start_time,
                    "Converted exercise session"
                );
                report.converted.push(session.datauuid);
            }
            Err(error) => {
                tracing::warn!(session = %row.datauuid(), error = %error, "Skipping exercise session");
                report.failed.push(SessionFailure {
                    datauuid: row.datauuid().to_string(),
                    error,
                });
            }
        }
    }

    report
}

/// Converts all exercise sessions of an export.
///
/// # Errors
///
/// Returns an error if the exercise summary list is missing or unreadable.
/// Per-session failures are reported in the returned [`ConversionReport`].
pub fn convert_exercises(
    export: &ExportDir,
    sink: &mut impl DocumentSink,
) -> Result<ConversionReport, ExportError> {
    let rows = export.exercise_rows()?;
    let report = convert_sessions(&rows, export, sink);
    tracing::info!(
        converted = report.converted.len(),
        failed = report.failed.len(),
        "Exercise conversion finished"
    );
    Ok(report)
}
