//! HTTP server implementation for filehttp-rs.
//!
//! Connections accepted by [`HttpServer`] are queued on a [`WorkerPool`].
//! Each worker hands its connection to the [`ConnectionHandler`], which reads
//! the request, resolves the path through the [`PathResolver`], and writes
//! either the file or an error page before closing the connection.

mod config;
mod error;
mod handler;
mod http_server;
mod mime;
mod pool;
mod resolver;
mod response;
mod writer;

// Re-export public items
pub use config::{ServerConfig, DEFAULT_PORT, WORKERS_PER_CPU};
pub use error::{ConfigError, Error};
pub use handler::{ConnectionHandler, HandlerFn, HandlerFuture, Outcome};
pub use http_server::HttpServer;
pub use mime::content_type_for;
pub use pool::WorkerPool;
pub use resolver::{ContentDescriptor, OpenedFile, PathResolver, ResolvedPath, INDEX_FILE};
pub use response::{error_page, ResponseHead, StatusCode, BODY_SENTINEL, SERVER_NAME};
pub use writer::{write_error, write_success, WRITE_CHUNK_SIZE};
