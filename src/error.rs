//! Error types and result handling for rowsift
use crate::encoding::TextEncoding;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a read/filter/print run can fail
#[derive(Error, Debug)]
pub enum RowsiftError {
    /// The input path does not resolve to an existing file
    #[error("The file {} does not exist", .path.display())]
    NotFound { path: PathBuf },

    /// The file bytes are not valid under the requested encoding
    #[error("Cannot decode {} as {encoding}: invalid byte sequence at offset {offset}", .path.display())]
    Decoding {
        path: PathBuf,
        encoding: TextEncoding,
        offset: usize,
    },

    /// The delimited-text grammar was violated
    #[error("CSV parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Column index at or beyond the width of the first row
    #[error("Column index {index} is out of range for data with {width} columns")]
    OutOfRange { index: i64, width: usize },

    #[error("Column '{0}' not found in the first row")]
    UnknownColumn(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for rowsift operations
pub type Result<T> = std::result::Result<T, RowsiftError>;
