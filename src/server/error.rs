//! Error types for the HTTP server.

use std::path::PathBuf;

use thiserror::Error;

use crate::parser::Error as ParserError;
use crate::server::response::StatusCode;

/// Errors that can occur while serving a connection.
///
/// None of these leave the connection they occurred on. The ones that carry a
/// [`status`](Error::status) are answered with an error page, the rest
/// abandon the connection.
#[derive(Debug, Error)]
pub enum Error {
    /// The request could not be parsed, or was not a GET.
    #[error("Parse error: {0}")]
    ParseError(#[from] ParserError),

    /// The request path tried to climb out of the document root.
    #[error("Forbidden path: {0}")]
    Forbidden(String),

    /// No regular file exists at the resolved path.
    #[error("Not found: {}", path.display())]
    NotFound {
        path: PathBuf,
        /// Whether `index.html` was appended to a directory path.
        index_fallback: bool,
    },

    /// The file exists but could not be opened.
    #[error("Failed to open {}: {source}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error on the connection itself.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The worker pool no longer accepts connections.
    #[error("Worker pool is shut down")]
    PoolClosed,
}

impl Error {
    /// The status to answer this error with, if it warrants a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::ParseError(_) => Some(StatusCode::MethodNotAllowed),
            Error::Forbidden(_) => Some(StatusCode::Forbidden),
            // A directory without an index is reported as forbidden.
            Error::NotFound { index_fallback: true, .. } => Some(StatusCode::Forbidden),
            Error::NotFound { index_fallback: false, .. } => Some(StatusCode::NotFound),
            Error::FileOpen { .. } => Some(StatusCode::InternalServerError),
            Error::IoError(_) | Error::PoolClosed => None,
        }
    }
}

/// Errors that can occur while loading the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A required key is absent.
    #[error("Missing config key: {0}")]
    MissingKey(&'static str),

    /// A key is the last token of the file.
    #[error("Config key {0} has no value")]
    MissingValue(String),

    /// A value could not be interpreted.
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
