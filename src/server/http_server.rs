//! HTTP server implementation.

use std::future::Future;
use std::sync::Arc;

use log::{debug, error, info};
use tokio::net::{TcpListener, TcpStream};
use tokio::signal;

use crate::server::config::ServerConfig;
use crate::server::error::Error;
use crate::server::handler::ConnectionHandler;
use crate::server::pool::WorkerPool;
use crate::server::resolver::PathResolver;

/// A static-file HTTP server.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Log the effective configuration.
    fn display_server_info(&self) {
        info!("Document root: {}", self.config.document_root.display());
        info!(
            "Workers: {workers} (cpu_limit {cpus}, thread_limit {threads})",
            workers = self.config.worker_count(),
            cpus = self.config.cpu_limit,
            threads = self.config.thread_limit,
        );
    }

    /// Set up the TCP listener.
    async fn setup_listener(&self) -> Result<TcpListener, Error> {
        let listener = TcpListener::bind(&self.config.addr).await?;
        info!("Server listening on http://{addr}", addr = self.config.addr);
        Ok(listener)
    }

    /// Resolves on Ctrl+C. If the handler cannot be installed, never resolves.
    async fn ctrl_c() {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, initiating graceful shutdown"),
            Err(e) => {
                error!("Error setting up Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    }

    /// Log a failed accept and pause before the next one.
    async fn handle_accept_error(e: std::io::Error) {
        error!("Error accepting connection: {e}");
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }

    /// Bind the configured address and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = self.setup_listener().await?;
        self.serve(listener, Self::ctrl_c()).await
    }

    /// Serve connections from `listener` until `shutdown` resolves.
    ///
    /// Accepted connections go straight onto the worker pool's queue. On
    /// shutdown the listener stops accepting, and the call returns once every
    /// worker has finished the connection it was handling.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        self.display_server_info();

        let handler = Arc::new(ConnectionHandler::new(PathResolver::new(
            self.config.document_root.clone(),
        )));
        let mut pool: WorkerPool<TcpStream> =
            WorkerPool::new(self.config.worker_count(), handler.into_handler_fn());

        tokio::pin!(shutdown);

        let result = loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Shutting down server...");
                    break Ok(());
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            debug!("New client {addr}");
                            if let Err(e) = pool.enqueue(socket) {
                                break Err(e);
                            }
                        }
                        Err(e) => Self::handle_accept_error(e).await,
                    }
                }
            }
        };

        drop(listener);
        pool.shutdown().await;
        info!("Server shutdown complete");

        result
    }
}
