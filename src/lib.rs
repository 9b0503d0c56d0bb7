//! A minimal concurrent static-file HTTP server.
//!
//! The server answers `GET` requests by streaming files from a document root.
//! Anything else gets a small HTML error page. Every connection serves
//! exactly one request and is then closed.
//!
//! # Features
//!
//! - Fixed-size worker pool fed by a single FIFO connection queue
//! - `GET`-only request line parsing with percent-decoding
//! - Index file fallback for directory paths
//! - Content type detection from file extensions
//! - Graceful shutdown that lets in-flight requests finish
//!
//! # Examples
//!
//! ## Parsing a request
//!
//! ```
//! use filehttp_rs::parse_request;
//!
//! let request = parse_request(b"GET /docs/my%20notes.txt?v=2 HTTP/1.1\r\n\r\n").unwrap();
//! assert_eq!(request.path, "/docs/my notes.txt");
//! ```
//!
//! ## Rejections
//!
//! ```
//! use filehttp_rs::{parse_request, PathResolver, ServerError, StatusCode};
//!
//! let err = ServerError::from(parse_request(b"POST /form HTTP/1.1\r\n\r\n").unwrap_err());
//! assert_eq!(err.status(), Some(StatusCode::MethodNotAllowed));
//!
//! let resolver = PathResolver::new("/www");
//! let err = resolver.resolve("/secret/../../etc/passwd").unwrap_err();
//! assert_eq!(err.status(), Some(StatusCode::Forbidden));
//! ```
//!
//! ## Running a server
//!
//! ```no_run
//! use filehttp_rs::{HttpServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::parse("cpu_limit 2 thread_limit 4 document_root /www")?;
//!     HttpServer::new(config).start().await?;
//!     Ok(())
//! }
//! ```

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{parse_request, read_request, Error as ParserError, HttpRequest};
pub use server::{
    ConfigError, ConnectionHandler, Error as ServerError, HttpServer, PathResolver, ServerConfig, StatusCode,
    WorkerPool,
};
