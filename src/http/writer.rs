use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::{Response, StatusCode};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Status line, headers and the blank separator line.
pub fn serialize_head(status: StatusCode, headers: &[(String, String)]) -> BytesMut {
    let mut buf = BytesMut::with_capacity(128);

    buf.put_slice(
        format!(
            "{} {} {}\r\n",
            HTTP_VERSION,
            status.as_u16(),
            status.reason_phrase()
        )
        .as_bytes(),
    );

    for (k, v) in headers {
        buf.put_slice(k.as_bytes());
        buf.put_slice(b": ");
        buf.put_slice(v.as_bytes());
        buf.put_slice(b"\r\n");
    }

    buf.put_slice(b"\r\n");
    buf
}

pub fn serialize_response(resp: &Response) -> BytesMut {
    let mut buf = serialize_head(resp.status, &resp.headers);
    buf.put_slice(&resp.body);
    buf
}

/// Writes responses, or a head followed by streamed body chunks, to one
/// connection. Counts the bytes handed to the stream.
pub struct ResponseWriter<W> {
    stream: W,
    written: u64,
}

impl<W: AsyncWrite + Unpin> ResponseWriter<W> {
    pub fn new(stream: W) -> Self {
        Self { stream, written: 0 }
    }

    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    pub async fn write_response(&mut self, response: &Response) -> std::io::Result<()> {
        let buf = serialize_response(response);
        self.write_bytes(&buf).await
    }

    pub async fn write_head(
        &mut self,
        status: StatusCode,
        headers: &[(String, String)],
    ) -> std::io::Result<()> {
        let buf = serialize_head(status, headers);
        self.write_bytes(&buf).await
    }

    pub async fn write_chunk(&mut self, chunk: &[u8]) -> std::io::Result<()> {
        self.write_bytes(chunk).await
    }

    pub async fn flush(&mut self) -> std::io::Result<()> {
        self.stream.flush().await
    }

    pub async fn shutdown(&mut self) -> std::io::Result<()> {
        self.stream.shutdown().await
    }

    async fn write_bytes(&mut self, buf: &[u8]) -> std::io::Result<()> {
        self.stream.write_all(buf).await?;
        self.written += buf.len() as u64;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::ResponseBuilder;

    #[test]
    fn bare_status_has_only_terminator() {
        let buf = serialize_response(&Response::ok());
        assert_eq!(&buf[..], b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn headers_keep_insertion_order() {
        let resp = ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Encoding", "gzip")
            .header("Content-Type", "text/plain")
            .body(&b"xy"[..])
            .build();

        assert_eq!(
            &serialize_response(&resp)[..],
            &b"HTTP/1.1 200 OK\r\nContent-Encoding: gzip\r\nContent-Type: text/plain\r\nContent-Length: 2\r\n\r\nxy"[..]
        );
    }

    #[tokio::test]
    async fn writer_counts_bytes() {
        let mut out = Vec::new();
        let mut writer = ResponseWriter::new(&mut out);
        assert_eq!(writer.bytes_written(), 0);

        writer.write_head(StatusCode::NotFound, &[]).await.unwrap();
        writer.write_chunk(b"xy").await.unwrap();
        assert_eq!(writer.bytes_written(), b"HTTP/1.1 404 Not Found\r\n\r\nxy".len() as u64);
        assert_eq!(out, b"HTTP/1.1 404 Not Found\r\n\r\nxy");
    }
}
