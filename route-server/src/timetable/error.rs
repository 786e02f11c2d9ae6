//! Timetable loading error types.

use std::fmt;
use std::path::PathBuf;

/// Which of the two timetable files a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Station,
    Trip,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Station => f.write_str("stations file"),
            RecordKind::Trip => f.write_str("trips file"),
        }
    }
}

/// Errors that can occur while loading a timetable.
///
/// Loading is all-or-nothing: any of these aborts the whole load.
#[derive(Debug, thiserror::Error)]
pub enum TimetableError {
    /// The file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line could not be parsed into a record
    #[error("{file} line {line}: {reason}")]
    Malformed {
        file: RecordKind,
        line: usize,
        reason: String,
    },
}

impl TimetableError {
    pub(crate) fn malformed(file: RecordKind, line: usize, reason: impl Into<String>) -> Self {
        TimetableError::Malformed {
            file,
            line,
            reason: reason.into(),
        }
    }
}
