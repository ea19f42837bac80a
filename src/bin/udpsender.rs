//! Interactive UDP line sender.
//!
//! Reads lines from stdin and sends each one, newline-terminated, over a
//! connected UDP socket to 127.0.0.1:42069. Handy for poking the listener
//! tools with arbitrary text.

use std::io::Write;

use log::error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UdpSocket;

const TARGET_ADDR: &str = "127.0.0.1:42069";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize the logger
    env_logger::init();

    let socket = UdpSocket::bind("0.0.0.0:0").await?;
    socket.connect(TARGET_ADDR).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        if let Err(e) = socket.send(format!("{line}\n").as_bytes()).await {
            error!("failed to send: {e}");
        }
    }

    Ok(())
}
