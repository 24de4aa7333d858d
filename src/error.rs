//! Error types for shapefile reading

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, ShpError>;

/// Errors produced while reading a shapefile
#[derive(Error, Debug)]
pub enum ShpError {
    /// I/O error from the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The main file header is not a valid shapefile header
    #[error("invalid shapefile header: {0}")]
    InvalidHeader(String),

    /// The file content violates the shapefile record layout
    #[error("invalid shapefile data: {0}")]
    InvalidFormat(String),

    /// Fewer bytes were available than a field or payload requires
    #[error("truncated data: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    /// A shape type code outside the defined enumeration
    #[error("unknown shape type code {0}")]
    UnknownShapeType(i32),

    /// An accessor was called before the file header was loaded
    #[error("shapefile header has not been loaded")]
    NotLoaded,

    /// A geometry accessor was called while the record cursor holds no record
    #[error("record cursor is not positioned on a record")]
    NoRecord,
}
