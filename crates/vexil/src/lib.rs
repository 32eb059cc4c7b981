#![forbid(unsafe_code)]

//! # Vexil
//!
//! Facade crate for the vexil image loader: fetch remote images over
//! HTTP, decode them once, cache them in memory, and share one fetch
//! among every caller asking for the same resource.
//!
//! ## Quick start
//!
//! ```ignore
//! use vexil::prelude::*;
//!
//! // One loader at the composition root; clones are cheap.
//! let loader = ImageLoader::new(DefaultImageService::default());
//!
//! match loader.load("https://example.com/flag.png", |image| render(image))? {
//!     LoadOutcome::Complete => {}       // cache hit, callback already ran
//!     LoadOutcome::Pending(token) => {} // keep the token to cancel this caller
//! }
//! ```

// ── Re-export sub-crates ────────────────────────────────────────────────

pub mod cache {
    pub use vexil_cache::*;
}

pub mod loader {
    pub use vexil_loader::*;
}

pub mod net {
    pub use vexil_net::*;
}

pub mod service {
    pub use vexil_service::*;
}

pub use vexil_core::{CoreError, CoreResult, Image, ImageKey};
pub use vexil_loader::{
    ImageLoader, LoadOutcome, LoadToken, LoaderBuilder, LoaderError, LoaderResult,
};
pub use vexil_service::{DefaultImageService, ImageService, ImageSource};

// ── Prelude ─────────────────────────────────────────────────────────────

pub mod prelude {
    pub use vexil_cache::ImageCache;
    pub use vexil_net::{HttpClient, Net, NetExt, NetOptions};

    pub use crate::{
        DefaultImageService, Image, ImageKey, ImageLoader, ImageService, ImageSource, LoadOutcome,
        LoadToken, LoaderBuilder, LoaderError, LoaderResult,
    };
}
