//! Error type for the file backends

use std::fmt;
use std::io;

use matstore_core::MatrixError;

/// Errors that can occur while importing or exporting matrix files
#[derive(Debug)]
pub enum FileError {
    /// The underlying open/read/write failed
    Io(io::Error),
    /// The stream violated a format or shape constraint
    Format(MatrixError),
    /// A text token could not be parsed as a number
    Parse {
        /// 1-based line in the source file
        line: usize,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::Io(err) => write!(f, "I/O failure: {err}"),
            FileError::Format(err) => write!(f, "{err}"),
            FileError::Parse { line } => write!(f, "Invalid numeric value at line {line}"),
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for FileError {
    fn from(err: io::Error) -> Self {
        FileError::Io(err)
    }
}

impl From<MatrixError> for FileError {
    fn from(err: MatrixError) -> Self {
        FileError::Format(err)
    }
}
