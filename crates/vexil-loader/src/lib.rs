#![forbid(unsafe_code)]

//! # vexil-loader
//!
//! The coordination core: deduplicates concurrent loads of one resource,
//! serves cached results synchronously, and lets each caller withdraw its
//! own interest in an in-flight fetch without disturbing other waiters or
//! the network operation.
//!
//! Per resource the loader moves through three states: *absent* (no cache
//! entry, no fetch), *pending* (exactly one fetch in flight, any number of
//! waiters), and *resolved* (cache entry present). All waiter bookkeeping
//! lives on a single driver task; fetches run on worker tasks and marshal
//! their results back through the driver before any callback fires.
//!
//! ```ignore
//! let loader = ImageLoader::new(DefaultImageService::default());
//!
//! match loader.load("https://example.com/flag.png", |image| show(image))? {
//!     LoadOutcome::Complete => {}               // served from cache, callback already ran
//!     LoadOutcome::Pending(token) => {
//!         // callback runs when the fetch resolves; `loader.cancel(token)`
//!         // withdraws this caller only
//!     }
//! }
//! ```

mod driver;
mod error;
mod loader;
mod outcome;
mod token;

pub use crate::{
    driver::ImageCallback,
    error::{LoaderError, LoaderResult},
    loader::{ImageLoader, LoaderBuilder},
    outcome::LoadOutcome,
    token::LoadToken,
};
