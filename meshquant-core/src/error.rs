//! Error types for meshquant

use thiserror::Error;

/// Main error type for meshquant operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Invalid quantization levels: {levels} (at least 2 are required)")]
    InvalidLevels { levels: u32 },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Not a mesh: {0}")]
    NotAMesh(String),
}

/// Result type alias for meshquant operations
pub type Result<T> = std::result::Result<T, Error>;
