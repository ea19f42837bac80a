//! Error types for the HTTP parser.

use thiserror::Error;

use crate::parser::request::ParserState;

/// Errors that can occur during HTTP request parsing.
///
/// Every variant is terminal: a parse session cannot continue after any of
/// them, and the caller is expected to drop the session and close the
/// underlying connection.
#[derive(Debug, Error)]
pub enum Error {
    /// The request line has the wrong field count, a non-upper-case method,
    /// a target without a leading `/`, or a malformed version token.
    #[error("malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The version token is well-formed but names a version other than 1.1.
    #[error("unsupported HTTP version: {0}")]
    UnsupportedVersion(String),

    /// A header line is missing the `:` separator.
    #[error("malformed header line, missing ':' separator: {0}")]
    MalformedHeaderLine(String),

    /// Whitespace appears between a field name and its colon.
    #[error("whitespace between field name and ':': {0:?}")]
    InvalidHeaderSpacing(String),

    /// A field name is empty or contains a character outside the token set.
    #[error("invalid header field name: {0:?}")]
    InvalidFieldName(String),

    /// The stream ended before a complete request was parsed.
    #[error("incomplete request, stream closed in state: {0}")]
    IncompleteRequest(ParserState),

    /// The parser was driven from a state it cannot parse in.
    #[error("cannot parse in state: {0}")]
    InvalidParserState(ParserState),

    /// I/O error while reading from the byte stream.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error serializing a captured request to JSON.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
