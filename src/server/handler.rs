//! Per-connection request handling.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::io::{AsyncRead, AsyncWrite};

use crate::parser::{parse_request, read_request};
use crate::server::error::Error;
use crate::server::resolver::{OpenedFile, PathResolver};
use crate::server::response::StatusCode;
use crate::server::writer::{write_error, write_success};

/// Type alias for the boxed future a worker drives to completion.
pub type HandlerFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Type alias for a handler function that takes ownership of a connection.
pub type HandlerFn<C> = Arc<dyn Fn(C) -> HandlerFuture + Send + Sync>;

/// How a connection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A file was served; holds the number of body bytes sent.
    Served(u64),
    /// An error page was sent with this status.
    Rejected(StatusCode),
    /// The connection failed and was dropped without a complete response.
    Abandoned,
}

/// Drives one connection from request to close.
///
/// ```text
/// read + parse ──fail──────────────────────────► 405
///      │
///   resolve ──"/.."──────────────────────────────► 403
///      │
///    open ──missing──► 404 (403 if index appended)
///      │  └─unopenable──────────────────────────► 500
///      ▼
///   stream file ─────────────────────────────────► 200
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionHandler {
    resolver: PathResolver,
}

impl ConnectionHandler {
    /// Create a handler serving files through `resolver`.
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    /// The resolver used to locate files.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Serve a single request on `conn` and close it.
    ///
    /// Every failure is dealt with here. Errors with a status are answered
    /// with an error page; connection I/O errors drop the connection.
    pub async fn handle<C>(&self, mut conn: C) -> Outcome
    where
        C: AsyncRead + AsyncWrite + Unpin,
    {
        let prepared = self.prepare(&mut conn).await;
        Self::respond(conn, prepared).await
    }

    /// Answer `conn` with the opened file, or with the error page for the
    /// failure that prevented opening one, and close it.
    pub async fn respond<C>(conn: C, prepared: Result<OpenedFile, Error>) -> Outcome
    where
        C: AsyncWrite + Unpin,
    {
        let result = match prepared {
            Ok(OpenedFile { file, descriptor }) => {
                debug!("Serving {} bytes of {}", descriptor.length, descriptor.content_type);
                write_success(conn, &descriptor, file).await.map(Outcome::Served)
            }
            Err(e) => match e.status() {
                Some(status) => {
                    info!("Sending {} {}: {e}", status.as_u16(), status.reason_phrase());
                    write_error(conn, status).await.map(|()| Outcome::Rejected(status))
                }
                None => {
                    warn!("Dropping connection: {e}");
                    return Outcome::Abandoned;
                }
            },
        };

        match result {
            Ok(outcome) => {
                debug!("Connection closed: {outcome:?}");
                outcome
            }
            Err(e) => {
                warn!("Failed to write response: {e}");
                Outcome::Abandoned
            }
        }
    }

    /// Read and validate the request, then open the file it names.
    async fn prepare<C>(&self, conn: &mut C) -> Result<OpenedFile, Error>
    where
        C: AsyncRead + Unpin,
    {
        let raw = read_request(conn).await?;
        let request = parse_request(&raw)?;
        debug!("Request for {}", request.path);

        let resolved = self.resolver.resolve(&request.path)?;
        resolved.open().await
    }

    /// Wrap the handler into the function type run by a worker pool.
    pub fn into_handler_fn<C>(self: Arc<Self>) -> HandlerFn<C>
    where
        C: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        Arc::new(move |conn: C| -> HandlerFuture {
            let handler = Arc::clone(&self);
            Box::pin(async move {
                handler.handle(conn).await;
            })
        })
    }
}
