//! HTTP request parsing.
//!
//! Reads the head of a request off a connection and extracts the path of a
//! `GET` request line. Anything that is not a `GET <path> HTTP/...` line is
//! rejected.

mod error;
mod reader;
mod request;
mod tests;

// Re-export public items
pub use error::Error;
pub use reader::{read_request, MAX_REQUEST_SIZE, READ_CHUNK_SIZE};
pub use request::{parse_request, HttpRequest};
