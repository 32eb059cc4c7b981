#![forbid(unsafe_code)]

//! # vexil-core
//!
//! Leaf domain types shared by the vexil crates:
//!
//! - [`ImageKey`]: normalized identifier for a fetchable remote image.
//!   Two callers requesting the same normalized key share one fetch.
//! - [`Image`]: a decoded image. [`Image::from_bytes`] is the pure,
//!   synchronous decode step applied to fetched bytes before caching.
//!
//! This crate holds no I/O and no coordination state.

mod error;
mod image;
mod key;

pub use error::{CoreError, CoreResult};
pub use image::Image;
pub use key::ImageKey;
