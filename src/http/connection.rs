use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, BufReader, BufWriter, ReadHalf, WriteHalf};

use crate::handlers::{FileHandler, simple};
use crate::http::parser::read_request;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::router::Route;
use crate::http::writer::ResponseWriter;

/// Drives a single request/response cycle on one connection.
pub struct Connection<S> {
    reader: BufReader<ReadHalf<S>>,
    writer: ResponseWriter<BufWriter<WriteHalf<S>>>,
    files: Arc<FileHandler>,
    header_timeout: Option<Duration>,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Routing(Request),
    Responding(Response),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, files: Arc<FileHandler>) -> Self {
        let (read_half, write_half) = tokio::io::split(stream);
        Self {
            reader: BufReader::new(read_half),
            writer: ResponseWriter::new(BufWriter::new(write_half)),
            files,
            header_timeout: None,
            state: ConnectionState::Reading,
        }
    }

    /// Gives up on clients that do not finish their headers in time.
    pub fn with_header_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.header_timeout = timeout;
        self
    }

    /// Runs until the connection is closed. At most one request is served.
    ///
    /// An `Err` is a transport failure; the client may have received a
    /// partial response or nothing at all.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = self.read().await?;
                }

                ConnectionState::Routing(req) => {
                    self.state = self.route(req).await?;
                }

                ConnectionState::Responding(response) => {
                    self.writer.write_response(&response).await?;
                    tracing::debug!(status = response.status.as_u16(), "Response sent");
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    self.writer.flush().await?;
                    // Peer may already be gone; the response is flushed either way.
                    let _ = self.writer.shutdown().await;
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read(&mut self) -> anyhow::Result<ConnectionState> {
        let result = match self.header_timeout {
            Some(limit) => match tokio::time::timeout(limit, read_request(&mut self.reader)).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(timeout = ?limit, "Timed out waiting for request headers");
                    return Ok(ConnectionState::Closed);
                }
            },
            None => read_request(&mut self.reader).await,
        };

        match result {
            Ok(req) => Ok(ConnectionState::Routing(req)),
            Err(e) => match e.status() {
                Some(status) => {
                    tracing::debug!(error = %e, "Malformed request");
                    Ok(ConnectionState::Responding(Response::status_only(status)))
                }
                None => Err(e.into()),
            },
        }
    }

    async fn route(&mut self, req: Request) -> anyhow::Result<ConnectionState> {
        let route = Route::classify(req.route_path());
        tracing::debug!(
            method = req.method().as_str(),
            path = %req.line.target,
            route = route.name(),
            "Routing request"
        );

        let response = match route {
            Route::Root => simple::root(),
            Route::UserAgent => simple::user_agent(&req),
            Route::Echo(word) => simple::echo(&req, word),
            Route::NotFound => Response::not_found(),
            Route::Files(name) => {
                let status = self
                    .files
                    .handle(&req, name, &mut self.reader, &mut self.writer)
                    .await?;
                tracing::debug!(
                    status = status.as_u16(),
                    bytes = self.writer.bytes_written(),
                    "Response sent"
                );
                return Ok(ConnectionState::Closed);
            }
        };

        Ok(ConnectionState::Responding(response))
    }
}
