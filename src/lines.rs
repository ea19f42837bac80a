//! Line splitting over a byte stream.
//!
//! A small demo utility for line-oriented listeners: it chunks a byte
//! stream, splits it into newline-terminated lines, and hands complete
//! lines over a channel as they arrive.

use log::error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;

const READ_CHUNK_SIZE: usize = 1024;

/// Spawn a task that reads `reader` to the end and sends each complete
/// line (without its `\n`) over the returned channel.
///
/// An unterminated trailing line is flushed when the stream ends. The task
/// stops early if the receiver is dropped.
pub fn lines_channel<R>(mut reader: R) -> mpsc::Receiver<String>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let (tx, rx) = mpsc::channel(32);

    tokio::spawn(async move {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        let mut current = String::new();

        loop {
            let n = match reader.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    error!("error reading line stream: {e}");
                    break;
                }
            };

            let text = String::from_utf8_lossy(&chunk[..n]);
            let parts: Vec<&str> = text.split('\n').collect();

            // Every part except the last is a completed line.
            for part in &parts[..parts.len() - 1] {
                let line = std::mem::take(&mut current) + part;
                if tx.send(line).await.is_err() {
                    return;
                }
            }
            current.push_str(parts[parts.len() - 1]);
        }

        if !current.is_empty() {
            let _ = tx.send(current).await;
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::lines_channel;

    async fn collect(data: &[u8]) -> Vec<String> {
        let mut rx = lines_channel(Cursor::new(data.to_vec()));
        let mut lines = Vec::new();
        while let Some(line) = rx.recv().await {
            lines.push(line);
        }
        lines
    }

    #[tokio::test]
    async fn test_splits_complete_lines() {
        let lines = collect(b"hello\nworld\n").await;
        assert_eq!(lines, vec!["hello", "world"]);
    }

    #[tokio::test]
    async fn test_flushes_unterminated_tail() {
        let lines = collect(b"hello\nworld\npartial").await;
        assert_eq!(lines, vec!["hello", "world", "partial"]);
    }

    #[tokio::test]
    async fn test_empty_stream_sends_nothing() {
        let lines = collect(b"").await;
        assert!(lines.is_empty());
    }
}
