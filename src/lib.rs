//! An incremental HTTP/1.1 request parser for raw TCP tooling.
//!
//! This library parses an HTTP/1.1 request head (request line + header
//! block) from a byte stream that may deliver data in arbitrarily small
//! chunks, without blocking until a full request has arrived.
//!
//! # Features
//!
//! - Resumable request-head parsing with an explicit state machine
//! - Strict request-line grammar (upper-case method, `/`-prefixed target,
//!   HTTP/1.1 only)
//! - RFC 7230 field-name validation, case-insensitive header lookup, and
//!   duplicate-field merging
//! - An async driver over any `tokio::io::AsyncRead` byte source
//! - A raw TCP capture server and a line-channel demo utility
//! - JSON dumps of captured requests
//!
//! # Examples
//!
//! ## Driving the parser by hand
//!
//! ```
//! use rawhttp_rs::RequestParser;
//!
//! let mut parser = RequestParser::new();
//!
//! // Bytes can arrive in any number of pieces; zero progress means the
//! // parser needs more input.
//! let consumed = parser.parse(b"GET /coffee HT").unwrap();
//! assert_eq!(consumed, 0);
//!
//! let consumed = parser
//!     .parse(b"GET /coffee HTTP/1.1\r\nHost: localhost:42069\r\n\r\n")
//!     .unwrap();
//! assert!(consumed > 0);
//! assert!(parser.is_done());
//!
//! let request = parser.finish().unwrap();
//! assert_eq!(request.request_line.method, "GET");
//! assert_eq!(request.request_line.target, "/coffee");
//! assert_eq!(request.request_line.version, "1.1");
//! assert_eq!(request.headers.get("host"), Some("localhost:42069"));
//! ```
//!
//! ## Error handling
//!
//! ```
//! use rawhttp_rs::{ParserError, RequestParser};
//!
//! let mut parser = RequestParser::new();
//! let result = parser.parse(b"get / HTTP/1.1\r\n\r\n");
//!
//! match result {
//!     Ok(_) => println!("request parsed successfully"),
//!     Err(ParserError::MalformedRequestLine(line)) => {
//!         println!("malformed request line: {line}");
//!     }
//!     Err(err) => println!("other error: {err}"),
//! }
//! ```
//!
//! ## Reading from a stream
//!
//! The usual entry point is [`Request::from_reader`], which repeatedly
//! fills a growable buffer from an `AsyncRead` source and resumes the
//! parser until the request head is complete:
//!
//! ```no_run
//! use rawhttp_rs::Request;
//! use tokio::net::TcpStream;
//!
//! # async fn capture() -> Result<(), Box<dyn std::error::Error>> {
//! let mut socket = TcpStream::connect("127.0.0.1:42069").await?;
//! let request = Request::from_reader(&mut socket).await?;
//! println!("{}", request.to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! See the `tcplistener` and `udpsender` binaries for the surrounding
//! raw-socket tooling.

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Export the line-channel demo
pub mod lines;

// Re-export commonly used items for convenience
pub use parser::{
    Error as ParserError, Headers, ParserState, Request, RequestLine, RequestParser,
};
pub use server::{CaptureServer, Error as ServerError, ServerConfig};
