//! Forge - a small HTTP/1.1 server over raw sockets
//!
//! Request framing, routing and response streaming are written by hand
//! on top of tokio streams; no HTTP library is involved.

pub mod config;
pub mod handlers;
pub mod http;
pub mod server;
