#![forbid(unsafe_code)]

//! Shared test helpers for the vexil crates.
//!
//! Not part of the public API; `publish = false`.

mod gated_source;
mod http_server;
mod png;

pub use gated_source::GatedSource;
pub use http_server::TestHttpServer;
pub use png::png_bytes;
