//! Request-line grammar.

use serde::Serialize;

use crate::parser::error::Error;
use crate::parser::find_crlf;

/// The first line of an HTTP request: method, target, and protocol version.
///
/// Constructed exactly once per request and immutable afterwards. The
/// version holds the value portion of the `HTTP/<version>` token, e.g.
/// `"1.1"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestLine {
    /// The request method, e.g. `GET`.
    pub method: String,
    /// The request target, always starting with `/`.
    pub target: String,
    /// The protocol version, always `1.1`.
    pub version: String,
}

impl RequestLine {
    /// Attempt to extract a request line from the front of `data`.
    ///
    /// Returns `Ok(None)` when `data` does not yet contain a complete
    /// CRLF-terminated line; otherwise the parsed line and the number of
    /// bytes consumed, including the CRLF.
    pub fn parse(data: &[u8]) -> Result<Option<(Self, usize)>, Error> {
        let line_end = match find_crlf(data) {
            Some(i) => i,
            None => return Ok(None),
        };

        let line = String::from_utf8_lossy(&data[..line_end]);
        let request_line = Self::from_line(&line)?;
        Ok(Some((request_line, line_end + 2)))
    }

    /// Parse a complete request line, without its CRLF terminator.
    fn from_line(line: &str) -> Result<Self, Error> {
        // Naive split on single spaces: runs of spaces produce empty
        // fields and fail the count check below.
        let parts: Vec<&str> = line.split(' ').collect();
        if parts.len() != 3 {
            return Err(Error::MalformedRequestLine(line.to_string()));
        }

        let method = parts[0];
        if method.is_empty() || method != method.to_uppercase() {
            return Err(Error::MalformedRequestLine(line.to_string()));
        }

        let target = parts[1];
        if !target.starts_with('/') {
            return Err(Error::MalformedRequestLine(line.to_string()));
        }

        let version = match parts[2].strip_prefix("HTTP/") {
            Some(value) if !value.is_empty() => value,
            _ => return Err(Error::MalformedRequestLine(line.to_string())),
        };
        if version != "1.1" {
            return Err(Error::UnsupportedVersion(parts[2].to_string()));
        }

        Ok(Self {
            method: method.to_string(),
            target: target.to_string(),
            version: version.to_string(),
        })
    }
}
