//! Size-bounded CSV output.
//!
//! Garmin Connect fails on large import files, so rows are split over a
//! sequence of files `<prefix>-1.csv`, `<prefix>-2.csv`, ... with a bounded
//! number of rows each.

use super::OutputError;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::path::{Path, PathBuf};

/// Writes rows into numbered CSV files of bounded length.
///
/// Every file starts with a title line (the Garmin import section name),
/// followed by the header row and up to `lines_per_file` data rows. All
/// fields are quoted.
#[derive(Debug, Clone)]
pub struct ChunkedCsvWriter {
    dir: PathBuf,
    prefix: String,
    title: String,
    headers: Vec<String>,
    lines_per_file: usize,
}

impl ChunkedCsvWriter {
    /// Creates a writer.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::InvalidChunkSize`] if `lines_per_file` is zero.
    pub fn new(
        dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
        title: impl Into<String>,
        headers: &[&str],
        lines_per_file: usize,
    ) -> Result<Self, OutputError> {
        if lines_per_file == 0 {
            return Err(OutputError::InvalidChunkSize);
        }
        Ok(Self {
            dir: dir.into(),
            prefix: prefix.into(),
            title: title.into(),
            headers: headers.iter().map(ToString::to_string).collect(),
            lines_per_file,
        })
    }

    /// Returns the path of the `index`-th (1-based) file.
    #[must_use]
    pub fn chunk_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}-{index}.csv", self.prefix))
    }

    /// Writes all rows and returns the paths of the files written.
    ///
    /// No file is written when there are no rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created or a file
    /// cannot be written.
    pub fn write_all(&self, rows: &[Vec<String>]) -> Result<Vec<PathBuf>, OutputError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        create_dir(&self.dir)?;

        let mut written = Vec::new();
        for (index, chunk) in rows.chunks(self.lines_per_file).enumerate() {
            let path = self.chunk_path(index + 1);
            let contents = self.render(chunk)?;
            std::fs::write(&path, contents).map_err(|source| OutputError::Io {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(path = %path.display(), rows = chunk.len(), "Wrote CSV chunk");
            written.push(path);
        }
        Ok(written)
    }

    fn render(&self, rows: &[Vec<String>]) -> Result<Vec<u8>, OutputError> {
        let mut buffer = format!("{}\n", self.title).into_bytes();
        {
            let mut writer = WriterBuilder::new()
                .quote_style(QuoteStyle::Always)
                .terminator(Terminator::Any(b'\n'))
                .flexible(true)
                .from_writer(&mut buffer);
            writer.write_record(&self.headers)?;
            for row in rows {
                writer.write_record(row)?;
            }
            writer.flush().map_err(|source| OutputError::Io {
                path: self.dir.clone(),
                source,
            })?;
        }
        Ok(buffer)
    }
}

pub(crate) fn create_dir(dir: &Path) -> Result<(), OutputError> {
    std::fs::create_dir_all(dir).map_err(|source| OutputError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn rows(count: usize) -> Vec<Vec<String>> {
        (0..count)
            .map(|i| vec![format!("2021-01-{:02}", i + 1), i.to_string()])
            .collect()
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let result = ChunkedCsvWriter::new("out", "weight-export", "Body", &["Date"], 0);

        assert!(matches!(result.unwrap_err(), OutputError::InvalidChunkSize));
    }

    #[test]
    fn test_single_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let writer =
            ChunkedCsvWriter::new(dir.path(), "weight-export", "Body", &["Date", "Weight"], 75)
                .unwrap();

        let written = writer.write_all(&rows(2)).unwrap();

        assert_eq!(written, vec![dir.path().join("weight-export-1.csv")]);
        let contents = fs::read_to_string(&written[0]).unwrap();
        assert_eq!(
            contents,
            "Body\n\"Date\",\"Weight\"\n\"2021-01-01\",\"0\"\n\"2021-01-02\",\"1\"\n"
        );
    }

    #[test]
    fn test_rows_split_over_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ChunkedCsvWriter::new(
            dir.path(),
            "activities-export",
            "Activities",
            &["Date", "Steps"],
            2,
        )
        .unwrap();

        let written = writer.write_all(&rows(5)).unwrap();

        assert_eq!(written.len(), 3);
        let last = fs::read_to_string(dir.path().join("activities-export-3.csv")).unwrap();
        assert_eq!(last.lines().count(), 3);
        assert!(last.starts_with("Activities\n\"Date\",\"Steps\"\n"));
        assert!(last.contains("2021-01-05"));
    }

    #[test]
    fn test_no_rows_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested");
        let writer = ChunkedCsvWriter::new(&out, "x", "Body", &["Date"], 10).unwrap();

        let written = writer.write_all(&[]).unwrap();

        assert!(written.is_empty());
        assert!(!out.exists());
    }
}
