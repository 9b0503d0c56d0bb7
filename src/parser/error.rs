//! Error types for the HTTP parser.

use thiserror::Error;

/// Errors that can occur during HTTP request parsing.
///
/// The server answers every one of these with `405 Method Not Allowed`.
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing was read before the peer stopped sending.
    #[error("Empty request")]
    EmptyRequest,

    /// The request line starts with something other than `GET`. Holds the
    /// rejected method token, which is empty if the line starts with
    /// whitespace.
    #[error("Method not allowed: {0:?}")]
    MethodNotAllowed(String),

    /// The request line does not have the `GET <path> HTTP/...` shape.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The path component is missing or starts with a query string.
    #[error("Invalid HTTP path")]
    InvalidPath,
}
