//! Tests for the HTTP parser.

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio::io::{AsyncRead, ReadBuf};

    use crate::parser::{parse_request, read_request, Error, HttpRequest, MAX_REQUEST_SIZE};

    // Hands out at most `step` bytes per read so reads split the input.
    struct TrickleReader {
        data: Cursor<Vec<u8>>,
        step: usize,
    }

    impl TrickleReader {
        fn new(data: Vec<u8>, step: usize) -> Self {
            Self {
                data: Cursor::new(data),
                step,
            }
        }

        fn consumed(&self) -> usize {
            self.data.position() as usize
        }
    }

    impl AsyncRead for TrickleReader {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            let this = self.get_mut();
            let unfilled = buf.initialize_unfilled();
            let limit = unfilled.len().min(this.step);
            let n = std::io::Read::read(&mut this.data, &mut unfilled[..limit])?;
            buf.advance(n);
            Poll::Ready(Ok(()))
        }
    }

    #[test]
    fn test_parse_simple_get_request() {
        let request = b"GET /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n";
        let result = parse_request(request).unwrap();
        assert_eq!(result, HttpRequest::new("/index.html"));
    }

    #[test]
    fn test_headers_are_not_required() {
        let result = parse_request(b"GET /style.css HTTP/1.0\r\n\r\n").unwrap();
        assert_eq!(result.path, "/style.css");
    }

    #[test]
    fn test_any_http_version_is_accepted() {
        let result = parse_request(b"GET /a HTTP/9.9 trailing tokens\r\n\r\n").unwrap();
        assert_eq!(result.path, "/a");
    }

    #[test]
    fn test_query_string_is_dropped() {
        let result = parse_request(b"GET /search.html?q=rust&page=2 HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.path, "/search.html");
    }

    #[test]
    fn test_path_is_percent_decoded() {
        let result = parse_request(b"GET /my%20file.txt HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.path, "/my file.txt");

        let result = parse_request(b"GET /%2e%2e/secret HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.path, "/../secret");
    }

    #[test]
    fn test_undecodable_path_is_kept_raw() {
        let result = parse_request(b"GET /bad%FF HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.path, "/bad%FF");
    }

    #[test]
    fn test_multiple_whitespace_separators() {
        let result = parse_request(b"GET \t /spaced.html  HTTP/1.1\r\n\r\n").unwrap();
        assert_eq!(result.path, "/spaced.html");
    }

    #[test]
    fn test_other_methods_are_rejected() {
        for method in ["POST", "PUT", "DELETE", "HEAD", "OPTIONS", "PATCH"] {
            let request = format!("{method} /index.html HTTP/1.1\r\n\r\n");
            let result = parse_request(request.as_bytes());
            assert!(
                matches!(result, Err(Error::MethodNotAllowed(ref m)) if m == method),
                "{method} should be rejected"
            );
        }
    }

    #[test]
    fn test_method_is_case_sensitive() {
        let result = parse_request(b"get /index.html HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(Error::MethodNotAllowed(ref m)) if m == "get"));
    }

    #[test]
    fn test_method_must_be_followed_by_whitespace() {
        let result = parse_request(b"GETX /index.html HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(Error::MethodNotAllowed(ref m)) if m == "GETX"));

        let result = parse_request(b"GET");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_leading_whitespace_is_rejected() {
        let result = parse_request(b" GET /index.html HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(Error::MethodNotAllowed(ref m)) if m.is_empty()));
    }

    #[test]
    fn test_missing_version() {
        let result = parse_request(b"GET /index.html\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(ref l)) if l == "GET /index.html"));

        let result = parse_request(b"GET /index.html FTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(Error::MalformedRequestLine(_))));
    }

    #[test]
    fn test_missing_path() {
        let result = parse_request(b"GET ?q=1 HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(Error::InvalidPath)));

        let result = parse_request(b"GET ");
        assert!(matches!(result, Err(Error::InvalidPath)));
    }

    #[test]
    fn test_empty_request() {
        let result = parse_request(b"");
        assert!(matches!(result, Err(Error::EmptyRequest)));
    }

    #[tokio::test]
    async fn test_read_stops_at_terminator() {
        let mut input = b"GET / HTTP/1.1\r\nHost: x\r\n\r\n".to_vec();
        let head_len = input.len();
        input.extend_from_slice(&[b'z'; 2000]);

        let mut reader = TrickleReader::new(input, 5);
        let raw = read_request(&mut reader).await.unwrap();

        // Reads of 5 bytes overshoot the terminator by at most 4 bytes.
        assert!(raw.len() >= head_len && raw.len() < head_len + 5);
        assert!(raw.starts_with(b"GET / HTTP/1.1\r\n"));
        assert_eq!(reader.consumed(), raw.len());
    }

    #[tokio::test]
    async fn test_read_finds_terminator_split_across_reads() {
        let mut input = b"GET /split HTTP/1.1\r\n\r\n".to_vec();
        input.extend_from_slice(&[b'E'; 100]);

        // The first 22 bytes end in "\r\n\r", the second read completes the terminator.
        let mut reader = TrickleReader::new(input, 22);
        let raw = read_request(&mut reader).await.unwrap();
        assert_eq!(raw.len(), 44);
        assert_eq!(reader.consumed(), 44);
    }

    #[tokio::test]
    async fn test_read_is_capped() {
        let input = vec![b'a'; MAX_REQUEST_SIZE * 3];
        let mut reader = TrickleReader::new(input, 1000);
        let raw = read_request(&mut reader).await.unwrap();
        assert_eq!(raw.len(), MAX_REQUEST_SIZE);
        assert_eq!(reader.consumed(), MAX_REQUEST_SIZE);
    }

    #[tokio::test]
    async fn test_read_until_eof() {
        let mut reader = TrickleReader::new(b"GET / HTTP/1.1\r\n".to_vec(), 1024);
        let raw = read_request(&mut reader).await.unwrap();
        assert_eq!(raw, b"GET / HTTP/1.1\r\n");

        let mut reader = TrickleReader::new(Vec::new(), 1024);
        let raw = read_request(&mut reader).await.unwrap();
        assert!(raw.is_empty());
        assert!(matches!(parse_request(&raw), Err(Error::EmptyRequest)));
    }
}
