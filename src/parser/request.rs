//! HTTP request parsing and representation.

use std::borrow::Cow;

use crate::parser::error::Error;

/// The only method served. Matched case-sensitively.
const GET: &str = "GET";

/// A `GET` request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// The percent-decoded request path, without any query string.
    pub path: String,
}

impl HttpRequest {
    /// Create a new HTTP request.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Parse a raw request.
///
/// The request line must read `GET`, whitespace, a path without whitespace,
/// whitespace, then `HTTP/` followed by anything. A query string attached to
/// the path is dropped. Header lines are not examined.
///
/// # Arguments
///
/// * `input` - The bytes read from the connection
///
/// # Returns
///
/// The parsed request with its path percent-decoded, or the reason the
/// request was rejected
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    let text = String::from_utf8_lossy(input);
    let malformed = || Error::MalformedRequestLine(request_line(&text).to_string());

    let (token, rest) = split_token(&text);
    if token != GET {
        return Err(Error::MethodNotAllowed(token.to_string()));
    }

    let rest = strip_whitespace(rest).ok_or_else(malformed)?;
    let (target, rest) = split_token(rest);
    let path = target.split('?').next().unwrap_or_default();
    if path.is_empty() {
        return Err(Error::InvalidPath);
    }

    let rest = strip_whitespace(rest).ok_or_else(malformed)?;
    if !rest.starts_with("HTTP/") {
        return Err(malformed());
    }

    Ok(HttpRequest::new(decode_path(path)))
}

/// Percent-decode a request path. A path whose decoded bytes are not valid
/// UTF-8 is kept as it was sent.
fn decode_path(path: &str) -> String {
    urlencoding::decode(path).map_or_else(|_| path.to_string(), Cow::into_owned)
}

/// Split at the first whitespace character.
fn split_token(s: &str) -> (&str, &str) {
    s.find(char::is_whitespace)
        .map_or((s, ""), |idx| s.split_at(idx))
}

/// Strip leading whitespace, requiring at least one whitespace character.
fn strip_whitespace(s: &str) -> Option<&str> {
    let trimmed = s.trim_start();
    (trimmed.len() < s.len()).then_some(trimmed)
}

fn request_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}
