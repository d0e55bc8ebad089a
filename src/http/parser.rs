use tokio::io::AsyncBufRead;

use crate::http::headers::HeaderLines;
use crate::http::request::{Method, Request, RequestLine};
use crate::http::response::StatusCode;
use crate::http::scanner::{ScanError, read_header_lines};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("request line has no target")]
    MissingTarget,
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl RequestError {
    /// Status to answer with, or `None` when the connection is unusable.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Scan(ScanError::Io(_)) => None,
            RequestError::Scan(ScanError::Empty) | RequestError::Parse(_) => {
                Some(StatusCode::BadRequest)
            }
        }
    }
}

/// Splits a request line on single spaces into method, target and version.
pub fn parse_request_line(line: &str) -> Result<RequestLine, ParseError> {
    let mut parts = line.split(' ');

    let method = parts.next().unwrap_or_default();
    let target = parts.next().ok_or(ParseError::MissingTarget)?;
    let version = parts.next().unwrap_or_default();

    Ok(RequestLine {
        method: Method::parse(method),
        target: target.to_string(),
        version: version.to_string(),
    })
}

pub fn parse_request(headers: HeaderLines) -> Result<Request, ParseError> {
    let line = parse_request_line(headers.request_line().unwrap_or_default())?;
    Ok(Request { line, headers })
}

/// Scans the header block from `reader` and parses its request line.
pub async fn read_request<R>(reader: &mut R) -> Result<Request, RequestError>
where
    R: AsyncBufRead + Unpin,
{
    let headers = read_header_lines(reader).await?;
    Ok(parse_request(headers)?)
}
