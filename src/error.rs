//! Error types for mazegen

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// mazegen error type
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("invalid width or height: {width}x{height}, both must be positive")]
    InvalidDimension { width: i64, height: i64 },

    #[error("could not allocate a grid of {cells} cells")]
    AllocationFailure { cells: usize },

    #[error("could not open {}: {source}", path.display())]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("not a perfect maze: {0}")]
    NotPerfect(String),
}

pub type Result<T> = std::result::Result<T, MazeError>;
