//! TCP listener that captures incoming HTTP requests and prints them.
//!
//! Binds on 127.0.0.1:42069, parses one request head per connection, and
//! dumps each captured request to stdout as pretty JSON. Run with
//! `RUST_LOG=info` to see connection lifecycle logs.

use log::{error, info};
use rawhttp_rs::{CaptureServer, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger
    env_logger::init();

    let config = ServerConfig::default();

    let server = CaptureServer::new(config, |request| async move {
        info!(
            "captured request: {method} {target} HTTP/{version}",
            method = request.request_line.method,
            target = request.request_line.target,
            version = request.request_line.version,
        );
        match request.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => error!("failed to serialize request: {e}"),
        }
    });

    server.start().await?;

    Ok(())
}
