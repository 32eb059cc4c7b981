#![forbid(unsafe_code)]

//! # vexil-cache
//!
//! The opaque key→image store consumed by the loader. Entries appear only
//! when a fetch succeeds; eviction is transparent, so a `get` after
//! eviction simply misses and the loader re-fetches.

mod store;

pub use store::ImageCache;
