//! Output writers.
//!
//! - [`ChunkedCsvWriter`] - numbered, size-bounded CSV files
//! - [`TcxDirectorySink`] - one `.tcx` file per exercise session

pub mod chunked;
pub mod tcx_sink;

pub use chunked::ChunkedCsvWriter;
pub use tcx_sink::{document_file_name, TcxDirectorySink};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing output files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// A file or directory could not be written.
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        /// The target path.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// CSV encoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The number of rows per file must be positive.
    #[error("Lines per file must be greater than zero")]
    InvalidChunkSize,
}
