//! Error types for the capture server.

use thiserror::Error;

use crate::parser::Error as ParserError;

/// Errors that can occur while serving connections.
#[derive(Debug, Error)]
pub enum Error {
    /// Error parsing an HTTP request.
    #[error("parse error: {0}")]
    Parse(#[from] ParserError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
