use crate::http::encoding::ContentEncoding;
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// `GET /`: bare `200 OK`.
pub fn root() -> Response {
    Response::ok()
}

/// Echoes the `User-Agent` header. A missing header yields an empty body.
pub fn user_agent(request: &Request) -> Response {
    Response::text(request.header("User-Agent").as_bytes().to_vec())
}

/// Echoes `word`, gzip-compressed when the client accepts it.
pub fn echo(request: &Request, word: &str) -> Response {
    let encoding = ContentEncoding::negotiate(request.header("Accept-Encoding"));

    let body = match encoding.encode(word.as_bytes()) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode echo body");
            return Response::internal_error();
        }
    };

    let mut builder = ResponseBuilder::new(StatusCode::Ok);
    if let Some(value) = encoding.header_value() {
        builder = builder.header("Content-Encoding", value);
    }

    builder
        .header("Content-Type", "text/plain")
        .body(body)
        .build()
}
