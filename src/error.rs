use std::path::PathBuf;
use thiserror::Error;

/// Why a spreadsheet date serial could not be turned into a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DateDecodeError {
    #[error("date serial {0} is not a finite number")]
    NotFinite(f64),
    #[error("date serial {0} is negative")]
    Negative(f64),
    #[error("date serial {0} falls in the ambiguous range of the 1900 date system")]
    Ambiguous(f64),
    #[error("date serial {0} is beyond the last representable date")]
    TooLarge(f64),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsupported file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Duplicate content: {}", .0.display())]
    DuplicateContent(PathBuf),
    #[error("Failed to open workbook {}: {reason}", .path.display())]
    OpenFailure { path: PathBuf, reason: String },
    #[error("Date decode failure: {0}")]
    DateDecodeFailure(#[from] DateDecodeError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    pub fn open_failure(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AppError::OpenFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
