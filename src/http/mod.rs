//! HTTP/1.1 framing over raw streams.
//!
//! # Architecture
//!
//! - **`scanner`**: Reads header lines up to the blank line
//! - **`headers`**: Ordered header lines with first-match lookup
//! - **`parser`**: Request line parsing and request-level errors
//! - **`request`**: Method, request line and route path
//! - **`router`**: Maps a route path to a handler
//! - **`response`**: Status codes and buffered responses
//! - **`encoding`**: Content-Encoding negotiation and gzip
//! - **`writer`**: Serializes responses and streams body chunks
//! - **`connection`**: The per-connection state machine
//!
//! # Connection State Machine
//!
//! Each connection serves exactly one request:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Scan header lines
//!        └──────┬──────┘
//!               │ Request line parsed      (malformed → Responding 400)
//!               ▼
//!        ┌──────────────────┐
//!        │     Routing      │ ← Pick handler; file routes stream directly
//!        └──────┬───────────┘
//!               │ Buffered response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Responding    │ ← Write status line, headers, body
//!        └──────┬───────────┘
//!               ▼
//!             Closed
//! ```

pub mod connection;
pub mod encoding;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod router;
pub mod scanner;
pub mod writer;
