//! Content-Encoding negotiation for buffered response bodies.

use std::io::Write;

use flate2::Compression;
use flate2::write::GzEncoder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Identity,
    Gzip,
}

impl ContentEncoding {
    /// Picks gzip when any space-separated token of `Accept-Encoding`,
    /// minus a trailing comma, is exactly `gzip`. Weights are not parsed.
    pub fn negotiate(accept_encoding: &str) -> Self {
        let gzip = accept_encoding
            .split(' ')
            .map(|token| token.strip_suffix(',').unwrap_or(token))
            .any(|token| token == "gzip");

        if gzip {
            ContentEncoding::Gzip
        } else {
            ContentEncoding::Identity
        }
    }

    /// Value for the `Content-Encoding` header, if one is sent.
    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            ContentEncoding::Identity => None,
            ContentEncoding::Gzip => Some("gzip"),
        }
    }

    /// Encodes the whole body into a single complete stream.
    pub fn encode(&self, body: &[u8]) -> std::io::Result<Vec<u8>> {
        match self {
            ContentEncoding::Identity => Ok(body.to_vec()),
            ContentEncoding::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(body)?;
                encoder.finish()
            }
        }
    }
}
