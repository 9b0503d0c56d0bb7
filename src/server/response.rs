//! HTTP response heads and error pages.

use std::borrow::Cow;
use std::time::SystemTime;

/// Value of the `Server` header.
pub const SERVER_NAME: &str = "topkek";

/// Bytes written after a file body.
pub const BODY_SENTINEL: &[u8] = b"\r\n\r\n";

/// HTTP status codes the server answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok = 200,
    Forbidden = 403,
    NotFound = 404,
    MethodNotAllowed = 405,
    InternalServerError = 500,
}

impl StatusCode {
    /// The numeric status code.
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Get the reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// The status line and headers of a response.
///
/// Header lines end in a bare `\n`, and the fields always appear in the same
/// order: `Content-type`, `Content-Length`, `Server`, `Date`, `Connection`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    /// The HTTP status code
    pub status: StatusCode,
    /// Value of the `Content-type` header
    pub content_type: Cow<'static, str>,
    /// Value of the `Content-Length` header
    pub content_length: u64,
}

impl ResponseHead {
    /// Create a response head.
    pub fn new(status: StatusCode, content_type: impl Into<Cow<'static, str>>, content_length: u64) -> Self {
        Self {
            status,
            content_type: content_type.into(),
            content_length,
        }
    }

    /// Convert the head to bytes, dated now.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_at(SystemTime::now())
    }

    /// Convert the head to bytes with an explicit `Date`.
    pub fn to_bytes_at(&self, date: SystemTime) -> Vec<u8> {
        format!(
            "HTTP/1.1 {code} {reason}\n\
             Content-type: {content_type}\n\
             Content-Length: {length}\n\
             Server: {SERVER_NAME}\n\
             Date: {date}\n\
             Connection: close\n\n",
            code = self.status.as_u16(),
            reason = self.status.reason_phrase(),
            content_type = self.content_type,
            length = self.content_length,
            date = httpdate::fmt_http_date(date),
        )
        .into_bytes()
    }
}

/// The HTML page sent for an error status.
pub fn error_page(status: StatusCode) -> String {
    format!(
        "<html><body><h1 style=\"margin: 0 10em 5em; text-align: center;\">{code} {reason}</h1></body></html>\r\n\r\n",
        code = status.as_u16(),
        reason = status.reason_phrase(),
    )
}
