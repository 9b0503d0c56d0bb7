//! Reading the head of a request off a connection.

use tokio::io::{AsyncRead, AsyncReadExt};

/// Upper bound on the bytes read for a single request.
pub const MAX_REQUEST_SIZE: usize = 4096;

/// Size of each individual read from the connection.
pub const READ_CHUNK_SIZE: usize = 1024;

const TERMINATOR: &[u8] = b"\r\n\r\n";

/// Read a raw request from `reader`.
///
/// Reading stops as soon as the accumulated bytes contain `\r\n\r\n`, once
/// [`MAX_REQUEST_SIZE`] bytes have been read, or when the peer closes its
/// side, whichever comes first. Never more than [`MAX_REQUEST_SIZE`] bytes
/// are consumed from the stream.
///
/// # Errors
///
/// Returns any I/O error raised by the underlying stream.
pub async fn read_request<R>(reader: &mut R) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut raw = Vec::with_capacity(READ_CHUNK_SIZE);
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    while raw.len() < MAX_REQUEST_SIZE {
        let want = (MAX_REQUEST_SIZE - raw.len()).min(READ_CHUNK_SIZE);
        let n = reader.read(&mut chunk[..want]).await?;
        if n == 0 {
            break;
        }

        // A terminator split across two reads starts at most 3 bytes back.
        let search_from = raw.len().saturating_sub(TERMINATOR.len() - 1);
        raw.extend_from_slice(&chunk[..n]);
        if contains_terminator(&raw[search_from..]) {
            break;
        }
    }

    Ok(raw)
}

fn contains_terminator(buf: &[u8]) -> bool {
    buf.windows(TERMINATOR.len()).any(|w| w == TERMINATOR)
}
