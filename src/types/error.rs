use thiserror::Error;

/// commitmap error types
#[derive(Error, Debug)]
pub enum CommitmapError {
    /// Failed to parse JSON input
    #[error("parse error: {0}")]
    Parse(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Activity fetch failed (transport, status or body)
    #[error("activity unavailable: {0}")]
    Fetch(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Year cannot be represented on the calendar
    #[error("invalid year: {0}")]
    InvalidYear(i32),

    /// Date arithmetic left the representable range
    #[error("date out of range: {0}")]
    DateOutOfRange(String),
}

/// Result type alias for commitmap
pub type Result<T> = std::result::Result<T, CommitmapError>;
