//! Writing responses to a connection.
//!
//! Both entry points take the connection by value and shut it down once the
//! response is written, so a connection can only ever be answered and closed
//! once.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::server::resolver::ContentDescriptor;
use crate::server::response::{error_page, ResponseHead, StatusCode, BODY_SENTINEL};

/// Size of each chunk copied from a file to the connection.
pub const WRITE_CHUNK_SIZE: usize = 1024;

/// Send a `200 OK` response streaming `file`, then close the connection.
///
/// At most `descriptor.length` bytes are copied. If the file turns out to be
/// shorter, whatever it held is sent. Returns the number of body bytes sent,
/// not counting the trailing `\r\n\r\n`.
pub async fn write_success<C, F>(mut conn: C, descriptor: &ContentDescriptor, mut file: F) -> std::io::Result<u64>
where
    C: AsyncWrite + Unpin,
    F: AsyncRead + Unpin,
{
    let head = ResponseHead::new(StatusCode::Ok, descriptor.content_type.clone(), descriptor.length);
    conn.write_all(&head.to_bytes()).await?;

    let mut buf = [0u8; WRITE_CHUNK_SIZE];
    let mut sent = 0u64;
    while sent < descriptor.length {
        let want = usize::try_from(descriptor.length - sent).map_or(WRITE_CHUNK_SIZE, |left| left.min(WRITE_CHUNK_SIZE));
        let n = file.read(&mut buf[..want]).await?;
        if n == 0 {
            break;
        }
        conn.write_all(&buf[..n]).await?;
        sent += n as u64;
    }

    conn.write_all(BODY_SENTINEL).await?;
    drop(file);
    conn.shutdown().await?;
    Ok(sent)
}

/// Send the error page for `status`, then close the connection.
pub async fn write_error<C>(mut conn: C, status: StatusCode) -> std::io::Result<()>
where
    C: AsyncWrite + Unpin,
{
    let page = error_page(status);
    let head = ResponseHead::new(status, "text/html", page.len() as u64);

    let mut response = head.to_bytes();
    response.extend_from_slice(page.as_bytes());
    conn.write_all(&response).await?;
    conn.shutdown().await
}
