//! Error types for an import run.

use thiserror::Error;

/// Failure reported by a host while reading or writing scene data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("host error: {message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type HostResult<T> = Result<T, HostError>;

/// Terminal outcome of a failed import. None of these are retried; keyframes inserted
/// before an `Unexpected` failure stay in place.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImportError {
    #[error("no object selected")]
    NoTarget,

    #[error("CSV file not found: '{path}'")]
    FileNotFound { path: String },

    #[error("CSV file is empty: '{path}'")]
    EmptyFile { path: String },

    #[error("column {column} is out of range: the first data row has {width} fields")]
    ColumnOutOfRange { column: usize, width: usize },

    #[error("unexpected error: {detail}")]
    Unexpected { detail: String },
}

/// Plain discriminant of [`ImportError`], for matching without payloads.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NoTarget,
    FileNotFound,
    EmptyFile,
    ColumnOutOfRange,
    Unexpected,
}

impl ImportError {
    pub fn unexpected(detail: impl Into<String>) -> Self {
        Self::Unexpected {
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoTarget => ErrorKind::NoTarget,
            Self::FileNotFound { .. } => ErrorKind::FileNotFound,
            Self::EmptyFile { .. } => ErrorKind::EmptyFile,
            Self::ColumnOutOfRange { .. } => ErrorKind::ColumnOutOfRange,
            Self::Unexpected { .. } => ErrorKind::Unexpected,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(format!("io: {err}"))
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::unexpected(format!("csv: {err}"))
    }
}

impl From<HostError> for ImportError {
    fn from(err: HostError) -> Self {
        Self::unexpected(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_errors_become_unexpected() {
        let err: ImportError = HostError::new("keyframe storage is read-only").into();
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(
            err.to_string(),
            "unexpected error: host error: keyframe storage is read-only"
        );
    }

    #[test]
    fn column_message_names_both_sides() {
        let err = ImportError::ColumnOutOfRange {
            column: 4,
            width: 3,
        };
        assert_eq!(err.kind(), ErrorKind::ColumnOutOfRange);
        assert!(err.to_string().contains("column 4"));
        assert!(err.to_string().contains("3 fields"));
    }
}
