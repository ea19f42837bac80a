//! TCP capture server.
//!
//! Accepts raw TCP connections, runs one incremental parse session per
//! connection, and hands each parsed request to a user-supplied handler.
//! The server only reads from its sockets; it never writes a response.

use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::io::AsyncRead;
use tokio::net::{TcpListener, TcpStream};
use tokio::signal;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;

use crate::parser::Request;
use crate::server::config::ServerConfig;
use crate::server::error::Error;

/// Type alias for a boxed future returned by a capture handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type alias for the handler invoked once per captured request.
pub type HandlerFn = Arc<dyn Fn(Request) -> HandlerFuture + Send + Sync>;

/// A server that captures one HTTP request head per connection.
pub struct CaptureServer {
    /// The server configuration.
    pub config: ServerConfig,
    handler: HandlerFn,
}

impl CaptureServer {
    /// Create a new capture server with the given configuration and
    /// per-request handler.
    pub fn new<F, Fut>(config: ServerConfig, handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let handler: HandlerFn =
            Arc::new(move |request| -> HandlerFuture { Box::pin(handler(request)) });
        Self { config, handler }
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("listening on {addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Set up a Ctrl+C handler for graceful shutdown.
    fn setup_ctrl_c_handler(shutdown_tx: Arc<mpsc::Sender<()>>, tasks: &mut JoinSet<()>) {
        tasks.spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("received Ctrl+C, initiating graceful shutdown");
                    let _ = shutdown_tx.send(()).await;
                }
                Err(e) => {
                    error!("error setting up Ctrl+C handler: {e}");
                }
            }
        });
    }

    /// Spawn a task that parses one request from a newly accepted
    /// connection and hands it to the handler.
    fn handle_new_connection(
        &self,
        mut socket: TcpStream,
        addr: SocketAddr,
        semaphore: Arc<Semaphore>,
        tasks: &mut JoinSet<()>,
    ) {
        let permit = match semaphore.try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                warn!("connection limit reached, dropping connection from {addr}");
                return;
            }
        };

        let handler = self.handler.clone();
        let read_buffer_size = self.config.read_buffer_size;

        tasks.spawn(async move {
            // The permit is dropped when the task completes, releasing the
            // semaphore slot.
            let _permit = permit;

            info!("connection accepted from {addr}");
            if let Err(e) = Self::handle_connection(&mut socket, handler, read_buffer_size).await {
                error!("error handling connection from {addr}: {e}");
            }
            info!("connection closed from {addr}");
        });
    }

    /// Handle accept errors. Returns true if the accept loop should stop.
    async fn handle_accept_error(e: std::io::Error) -> bool {
        error!("error accepting connection: {e}");

        if e.kind() == std::io::ErrorKind::BrokenPipe {
            error!("critical error accepting connection, shutting down");
            return true;
        }

        // For transient errors, wait a bit before retrying.
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
        false
    }

    /// Wait for active connection tasks to finish, with a timeout.
    async fn perform_shutdown(tasks: &mut JoinSet<()>) {
        info!("waiting for {len} active connections to complete...", len = tasks.len());
        let shutdown_timeout = tokio::time::Duration::from_secs(30);
        let _ = tokio::time::timeout(shutdown_timeout, async {
            while let Some(res) = tasks.join_next().await {
                if let Err(e) = res {
                    error!("task failed during shutdown: {e}");
                }
            }
        })
        .await;

        info!("server shutdown complete");
    }

    /// Start the server and listen for incoming connections until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = self.setup_listener().await?;

        // Limit concurrent connections.
        let semaphore = Arc::new(Semaphore::new(self.config.max_connections));

        // Channel for shutdown signaling.
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let shutdown_tx = Arc::new(shutdown_tx);

        // Keep track of all spawned tasks.
        let mut tasks = JoinSet::new();

        Self::setup_ctrl_c_handler(shutdown_tx.clone(), &mut tasks);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            self.handle_new_connection(socket, addr, semaphore.clone(), &mut tasks);
                        }
                        Err(e) => {
                            if Self::handle_accept_error(e).await {
                                break;
                            }
                        }
                    }
                }
            }
        }

        Self::perform_shutdown(&mut tasks).await;

        Ok(())
    }

    /// Parse one request head from `socket` and hand it to `handler`.
    pub(crate) async fn handle_connection(
        socket: &mut (impl AsyncRead + Unpin),
        handler: HandlerFn,
        read_buffer_size: usize,
    ) -> Result<(), Error> {
        let request = Request::from_reader_with_capacity(socket, read_buffer_size).await?;
        handler(request).await;
        Ok(())
    }
}
