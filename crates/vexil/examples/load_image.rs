//! Example: Load a remote image through the deduplicating loader.
//!
//! Demonstrates the top-level `ImageLoader` API:
//! - `ImageLoader::new(service)` spawns the driver task
//! - `load` returns `Complete` on a cache hit or `Pending(token)` on a miss
//! - a second load of the same URL attaches to the in-flight fetch
//!
//! Run with:
//! ```
//! cargo run -p vexil --example load_image [URL]
//! ```

use std::{env::args, error::Error};

use tracing::{info, metadata::LevelFilter};
use tracing_subscriber::EnvFilter;
use vexil::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::default()
                .add_directive("vexil_loader=debug".parse()?)
                .add_directive("vexil_service=debug".parse()?)
                .add_directive("vexil_net=warn".parse()?)
                .add_directive(LevelFilter::INFO.into()),
        )
        .with_line_number(false)
        .with_file(false)
        .init();

    let url = args()
        .nth(1)
        .unwrap_or_else(|| "https://flagcdn.com/w320/nz.png".to_string());

    info!("Loading: {}", url);

    let loader = ImageLoader::new(DefaultImageService::default());
    let (done_tx, done_rx) = tokio::sync::oneshot::channel();

    let outcome = loader.load(&url, move |image| {
        let _ = done_tx.send(image.dimensions());
    })?;

    match outcome {
        LoadOutcome::Complete => info!("Served synchronously from cache"),
        LoadOutcome::Pending(token) => info!(?token, "Fetch in flight"),
    }

    let (width, height) = done_rx.await?;
    info!(width, height, "Image decoded");

    // A second load of the same URL is now a synchronous cache hit.
    let outcome = loader.load(&url, |image| {
        info!(dimensions = ?image.dimensions(), "Cache hit");
    })?;
    assert!(outcome.is_complete());

    Ok(())
}
