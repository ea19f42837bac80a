//! Raw TCP capture server built on the incremental parser.
//!
//! This module provides the thin transport layer around the parser core:
//! it accepts connections, drives one parse session per connection, and
//! reports each captured request to a handler.

mod capture;
mod config;
mod error;


// Re-export public items
pub use capture::{CaptureServer, HandlerFn, HandlerFuture};
pub use config::ServerConfig;
pub use error::Error;
