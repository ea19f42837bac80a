//! Header field table and field-line parsing.

use std::collections::HashMap;

use serde::Serialize;

use crate::parser::error::Error;
use crate::parser::find_crlf;

/// Special characters allowed in a field name besides letters and digits,
/// per the RFC 7230 token grammar.
const TOKEN_SPECIALS: &[char] = &[
    '!', '#', '$', '%', '&', '\'', '*', '+', '-', '.', '^', '_', '`', '|', '~',
];

/// A table of HTTP header fields.
///
/// Field names are lower-cased at insertion, so names are case-insensitively
/// unique. A name observed more than once has its values concatenated in
/// arrival order, joined by `", "`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Headers(HashMap<String, String>);

impl Headers {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Attempt to extract one complete header line from the front of `data`.
    ///
    /// Returns the number of bytes consumed and whether the header block is
    /// now closed. A consumed count of zero means no complete line is
    /// available yet and more input is needed. An empty line closes the
    /// block: its CRLF is consumed and it is not treated as a field.
    pub fn parse(&mut self, data: &[u8]) -> Result<(usize, bool), Error> {
        let line_end = match find_crlf(data) {
            Some(i) => i,
            None => return Ok((0, false)),
        };
        if line_end == 0 {
            return Ok((2, true));
        }

        let line = String::from_utf8_lossy(&data[..line_end]);
        let (raw_name, raw_value) = match line.split_once(':') {
            Some(pair) => pair,
            None => return Err(Error::MalformedHeaderLine(line.to_string())),
        };

        // Checked on the raw half, before trimming: "Key: val" is fine,
        // "Key : val" is not.
        if raw_name.ends_with(|c: char| c.is_whitespace()) {
            return Err(Error::InvalidHeaderSpacing(raw_name.to_string()));
        }

        let name = raw_name.trim();
        if !is_valid_field_name(name) {
            return Err(Error::InvalidFieldName(name.to_string()));
        }

        self.set(name, raw_value.trim());
        Ok((line_end + 2, false))
    }

    /// Insert a field, lower-casing the name. If the name already exists the
    /// new value is appended to the existing one, separated by `", "`.
    pub fn set(&mut self, name: &str, value: &str) {
        let key = name.to_ascii_lowercase();
        match self.0.get_mut(&key) {
            Some(existing) => {
                existing.push_str(", ");
                existing.push_str(value);
            }
            None => {
                self.0.insert(key, value.to_string());
            }
        }
    }

    /// Look up a field value by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Check whether a field exists (case-insensitive).
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the stored (name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A field name must be a non-empty token: ASCII letters, digits, or one of
/// the allowed specials. Anything else, including non-ASCII, is rejected.
fn is_valid_field_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || TOKEN_SPECIALS.contains(&c))
}
