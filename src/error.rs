// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading storage files and evaluating channels.
#[derive(Debug, Error)]
pub enum ComparisonError {
    #[error("failed to access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table data: {0}")]
    Csv(#[from] csv::Error),

    #[error("'{}' has no 'endheader' line", .path.display())]
    MissingHeaderEnd { path: PathBuf },

    #[error("'{}' has no column labels", .path.display())]
    MissingLabels { path: PathBuf },

    #[error("'{}': first column must be 'time', found '{found}'", .path.display())]
    InvalidTimeColumn { path: PathBuf, found: String },

    #[error("'{}': duplicate column '{name}'", .path.display())]
    DuplicateColumn { path: PathBuf, name: String },

    #[error("'{}' line {line}: expected {expected} fields, found {found}", .path.display())]
    RowWidth {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("'{}' line {line}: invalid number '{value}'", .path.display())]
    InvalidNumber {
        path: PathBuf,
        line: usize,
        value: String,
    },

    #[error("table shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("column '{name}' not found in '{}'", .path.display())]
    ColumnNotFound { name: String, path: PathBuf },

    #[error("sequence lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}

pub type Result<T> = std::result::Result<T, ComparisonError>;
