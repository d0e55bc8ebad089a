//! Route handlers.
//!
//! `simple` assembles fully buffered responses; `files` streams file
//! contents to and from the connection.

pub mod files;
pub mod simple;

pub use files::FileHandler;
