//! File transfer under the configured root
//!
//! GET streams a file to the client in fixed-size chunks; POST stores
//! exactly `Content-Length` body bytes, chunk by chunk, into a file.
//! Neither loads a whole file into memory.

use std::path::PathBuf;

use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::config::FilesConfig;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};
use crate::http::writer::ResponseWriter;

/// Size of the buffer used for both directions
pub const CHUNK_SIZE: usize = 4096;

/// Serves `/files/<name>` from a single root directory
#[derive(Debug, Clone)]
pub struct FileHandler {
    /// Root directory, ending in `/`. `None` disables file routes.
    root: Option<String>,

    /// Refuse names with `..` segments instead of joining them blindly
    reject_traversal: bool,
}

impl FileHandler {
    pub fn new(config: &FilesConfig) -> Self {
        let mut config = config.clone();
        config.normalize();

        Self {
            root: config.directory,
            reject_traversal: config.reject_traversal,
        }
    }

    /// Resolves `name` by concatenating it onto the root.
    ///
    /// Returns `None` when no root is configured or the name is refused.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let root = self.root.as_ref()?;

        if self.reject_traversal && is_unsafe(name) {
            tracing::warn!(name, "Rejected file name outside root");
            return None;
        }

        Some(PathBuf::from(format!("{}{}", root, name)))
    }

    /// Handles one file request, writing the whole response to `out`.
    ///
    /// An `Err` means the connection failed; the response may be partial.
    pub async fn handle<R, W>(
        &self,
        request: &Request,
        name: &str,
        body: &mut R,
        out: &mut ResponseWriter<W>,
    ) -> std::io::Result<StatusCode>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        match request.method() {
            Method::GET => self.send_file(name, out).await,
            Method::POST => {
                let response = self.receive_file(request, name, body).await;
                out.write_response(&response).await?;
                Ok(response.status)
            }
            Method::Other(method) => {
                tracing::debug!(method = %method, "Unsupported method for file route");
                out.write_response(&Response::not_found()).await?;
                Ok(StatusCode::NotFound)
            }
        }
    }

    async fn send_file<W>(&self, name: &str, out: &mut ResponseWriter<W>) -> std::io::Result<StatusCode>
    where
        W: AsyncWrite + Unpin,
    {
        let Some(path) = self.resolve(name) else {
            out.write_response(&Response::not_found()).await?;
            return Ok(StatusCode::NotFound);
        };

        let mut file = match File::open(&path).await {
            Ok(file) => file,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "File not found");
                out.write_response(&Response::not_found()).await?;
                return Ok(StatusCode::NotFound);
            }
        };

        let size = match file.metadata().await {
            Ok(meta) if meta.is_file() => meta.len(),
            Ok(_) => {
                tracing::debug!(path = %path.display(), "Not a regular file");
                out.write_response(&Response::not_found()).await?;
                return Ok(StatusCode::NotFound);
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to stat file");
                out.write_response(&Response::internal_error()).await?;
                return Ok(StatusCode::InternalServerError);
            }
        };

        let headers = [
            ("Content-Type".to_string(), "application/octet-stream".to_string()),
            ("Content-Length".to_string(), size.to_string()),
        ];
        out.write_head(StatusCode::Ok, &headers).await?;

        // Status is committed from here on; failures can only abort.
        let mut buffer = [0u8; CHUNK_SIZE];
        let mut sent: u64 = 0;
        loop {
            let n = file.read(&mut buffer).await?;
            if n == 0 {
                break;
            }
            out.write_chunk(&buffer[..n]).await?;
            sent += n as u64;
            tracing::trace!(sent, size, "Streamed chunk");
        }

        tracing::debug!(path = %path.display(), bytes = sent, "File sent");
        Ok(StatusCode::Ok)
    }

    async fn receive_file<R>(&self, request: &Request, name: &str, body: &mut R) -> Response
    where
        R: AsyncRead + Unpin,
    {
        let Some(content_length) = request.content_length() else {
            tracing::debug!(
                content_length = request.header("Content-Length"),
                "Missing or invalid Content-Length"
            );
            return Response::bad_request();
        };

        let Some(path) = self.resolve(name) else {
            return Response::not_found();
        };

        let mut file = match File::create(&path).await {
            Ok(file) => file,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to create file");
                return Response::internal_error();
            }
        };

        let mut buffer = [0u8; CHUNK_SIZE];
        let mut remaining = content_length;
        while remaining > 0 {
            let want = remaining.min(CHUNK_SIZE as u64) as usize;
            let n = match body.read(&mut buffer[..want]).await {
                Ok(n) => n,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read request body");
                    return Response::internal_error();
                }
            };

            // Peer closed early; keep what arrived.
            if n == 0 {
                tracing::debug!(missing = remaining, "Request body ended early");
                break;
            }

            if let Err(e) = file.write_all(&buffer[..n]).await {
                tracing::error!(path = %path.display(), error = %e, "Failed to write file");
                return Response::internal_error();
            }
            remaining -= n as u64;
        }

        if let Err(e) = file.flush().await {
            tracing::error!(path = %path.display(), error = %e, "Failed to flush file");
            return Response::internal_error();
        }

        tracing::debug!(
            path = %path.display(),
            bytes = content_length - remaining,
            "File stored"
        );
        Response::created()
    }
}

fn is_unsafe(name: &str) -> bool {
    name.contains('\0') || name.split(['/', '\\']).any(|segment| segment == "..")
}
