//! Incremental request parsing and the parsed request value.

use std::fmt;

use serde::Serialize;
use tokio::io::AsyncRead;

use crate::parser::buffer::{Buffer, DEFAULT_BUFFER_SIZE};
use crate::parser::error::Error;
use crate::parser::headers::Headers;
use crate::parser::request_line::RequestLine;

/// The stage an incremental parse session is in.
///
/// Transitions are strictly forward: `Initialized` → `ParsingHeaders` →
/// `Done`. A stage is never revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// No request line has been parsed yet.
    Initialized,
    /// The request line is parsed; header lines are being consumed.
    ParsingHeaders,
    /// The header block was closed by an empty line. Terminal.
    Done,
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParserState::Initialized => "initialized",
            ParserState::ParsingHeaders => "parsing-headers",
            ParserState::Done => "done",
        };
        write!(f, "{name}")
    }
}

/// A fully parsed HTTP/1.1 request head: request line plus header table.
///
/// Read-only once constructed; produced by [`Request::from_reader`] or
/// [`RequestParser::finish`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    /// The parsed request line.
    pub request_line: RequestLine,
    /// The parsed header fields.
    pub headers: Headers,
}

impl Request {
    /// Read and parse one request head from `reader`.
    ///
    /// The reader is polled repeatedly and parsing resumes after every
    /// read, so the result is identical whether the stream delivers one
    /// byte or the whole message per read. Bytes past the header block
    /// terminator are left unread.
    ///
    /// # Errors
    ///
    /// Any grammar error from the parser, [`Error::Io`] if a read fails,
    /// or [`Error::IncompleteRequest`] if the stream ends before the
    /// request head is complete.
    pub async fn from_reader<R>(reader: &mut R) -> Result<Self, Error>
    where
        R: AsyncRead + Unpin,
    {
        Self::from_reader_with_capacity(reader, DEFAULT_BUFFER_SIZE).await
    }

    /// Like [`Request::from_reader`], with an explicit starting capacity
    /// for the read buffer. The buffer grows by doubling as needed, so the
    /// capacity only tunes the initial allocation.
    pub async fn from_reader_with_capacity<R>(
        reader: &mut R,
        capacity: usize,
    ) -> Result<Self, Error>
    where
        R: AsyncRead + Unpin,
    {
        let mut buffer = Buffer::with_capacity(capacity);
        let mut parser = RequestParser::new();

        while !parser.is_done() {
            let n = buffer.fill(reader).await?;
            if n == 0 {
                return Err(Error::IncompleteRequest(parser.state()));
            }

            let consumed = parser.parse(buffer.bytes())?;
            buffer.consume(consumed);
        }

        parser.finish()
    }

    /// Render the captured request as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A resumable request-head parser.
///
/// Feed it the unconsumed front of a byte buffer with [`RequestParser::parse`];
/// it reports how many bytes it consumed, and zero when it needs more input.
/// Once [`RequestParser::is_done`] returns true, [`RequestParser::finish`]
/// yields the [`Request`].
///
/// ```
/// use rawhttp_rs::RequestParser;
///
/// let mut parser = RequestParser::new();
/// let consumed = parser
///     .parse(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n")
///     .unwrap();
/// assert_eq!(consumed, 37);
/// assert!(parser.is_done());
///
/// let request = parser.finish().unwrap();
/// assert_eq!(request.request_line.method, "GET");
/// assert_eq!(request.headers.get("host"), Some("example.com"));
/// ```
#[derive(Debug)]
pub struct RequestParser {
    state: ParserState,
    request_line: Option<RequestLine>,
    headers: Headers,
}

impl RequestParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::Initialized,
            request_line: None,
            headers: Headers::new(),
        }
    }

    /// The current parsing stage.
    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ParserState::Done
    }

    /// Parse as much of `data` as possible, returning the number of bytes
    /// consumed. The caller must drop the consumed prefix before the next
    /// call. Zero progress means a complete line is not yet available.
    pub fn parse(&mut self, data: &[u8]) -> Result<usize, Error> {
        if self.is_done() {
            return Err(Error::InvalidParserState(self.state));
        }

        let mut total = 0;
        while !self.is_done() {
            let n = self.parse_single(&data[total..])?;
            if n == 0 {
                break;
            }
            total += n;
        }
        Ok(total)
    }

    /// Run one step of the state machine against `data`.
    fn parse_single(&mut self, data: &[u8]) -> Result<usize, Error> {
        match self.state {
            ParserState::Initialized => match RequestLine::parse(data)? {
                Some((request_line, n)) => {
                    self.request_line = Some(request_line);
                    self.state = ParserState::ParsingHeaders;
                    Ok(n)
                }
                None => Ok(0),
            },
            ParserState::ParsingHeaders => {
                let (n, done) = self.headers.parse(data)?;
                if done {
                    self.state = ParserState::Done;
                }
                Ok(n)
            }
            ParserState::Done => Err(Error::InvalidParserState(self.state)),
        }
    }

    /// Consume the parser and return the finished [`Request`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParserState`] if the parser has not reached `Done`.
    pub fn finish(self) -> Result<Request, Error> {
        match (self.state, self.request_line) {
            (ParserState::Done, Some(request_line)) => Ok(Request {
                request_line,
                headers: self.headers,
            }),
            (state, _) => Err(Error::InvalidParserState(state)),
        }
    }
}

impl Default for RequestParser {
    fn default() -> Self {
        Self::new()
    }
}
