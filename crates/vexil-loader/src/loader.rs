use std::{
    num::NonZeroUsize,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::trace;
use vexil_cache::ImageCache;
use vexil_core::{Image, ImageKey};
use vexil_service::ImageSource;

use crate::{
    driver::{LoaderDriver, Msg},
    error::{LoaderError, LoaderResult},
    outcome::LoadOutcome,
    token::LoadToken,
};

/// Handle to a loader driver task.
///
/// Cheap to clone; all clones share one cache, one driver, and one token
/// counter. Construct one at the application's composition root and hand
/// clones to whichever components load images.
///
/// A component reusing a display slot must hold at most one live token
/// per slot and cancel the previous token before issuing a new `load` for
/// that slot; the loader does not enforce this.
#[derive(Clone)]
pub struct ImageLoader {
    tx: mpsc::UnboundedSender<Msg>,
    cache: Arc<ImageCache>,
    next_token: Arc<AtomicU64>,
    cancel: CancellationToken,
}

impl ImageLoader {
    /// Loader with default settings over the given source.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new<S: ImageSource + 'static>(source: S) -> Self {
        LoaderBuilder::new().build(source)
    }

    #[must_use]
    pub fn builder() -> LoaderBuilder {
        LoaderBuilder::new()
    }

    /// Load the image at `location`.
    ///
    /// On a cache hit `on_image` runs synchronously in the caller's
    /// context and no token is issued. On a miss the callback is
    /// registered as a waiter and runs on the driver task once the fetch
    /// resolves; concurrent loads of the same resource share one fetch.
    /// The returned token withdraws this caller's interest only.
    ///
    /// A fetch that fails never invokes the callback; absence of delivery
    /// is how failure is communicated. A later `load` for the same
    /// location starts a fresh fetch cycle.
    ///
    /// # Errors
    ///
    /// [`LoaderError::InvalidLocation`] if `location` is not a usable URL
    /// (synchronous, nothing registered); [`LoaderError::Stopped`] if the
    /// driver has shut down.
    pub fn load<F>(&self, location: &str, on_image: F) -> LoaderResult<LoadOutcome>
    where
        F: FnOnce(Arc<Image>) + Send + 'static,
    {
        let key = ImageKey::parse(location)?;

        if let Some(image) = self.cache.get(&key) {
            trace!(key = %key, "cache hit, delivering synchronously");
            on_image(image);
            return Ok(LoadOutcome::Complete);
        }

        let token = LoadToken::new(self.next_token.fetch_add(1, Ordering::Relaxed));
        self.send(Msg::Register {
            key,
            token,
            callback: Box::new(on_image),
        })?;
        Ok(LoadOutcome::Pending(token))
    }

    /// Warm the cache for `location` without interest in the result.
    ///
    /// # Errors
    ///
    /// Same conditions as [`load`](Self::load).
    pub fn preload(&self, location: &str) -> LoaderResult<()> {
        self.load(location, |_| {}).map(|_| ())
    }

    /// Withdraw the waiter registered under `token`.
    ///
    /// Idempotent: tokens that were already cancelled or fulfilled are
    /// ignored. Never affects the in-flight fetch or other waiters on the
    /// same resource.
    pub fn cancel(&self, token: LoadToken) {
        // A stopped loader has no waiters left to cancel.
        let _ = self.tx.send(Msg::Cancel { token });
    }

    fn send(&self, msg: Msg) -> LoaderResult<()> {
        if self.cancel.is_cancelled() {
            return Err(LoaderError::Stopped);
        }
        self.tx.send(msg).map_err(|_| LoaderError::Stopped)
    }
}

impl std::fmt::Debug for ImageLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader")
            .field("cache", &self.cache)
            .field("stopped", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ImageLoader`].
pub struct LoaderBuilder {
    cache_capacity: NonZeroUsize,
    cancel: CancellationToken,
}

impl LoaderBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache_capacity: ImageCache::DEFAULT_CAPACITY,
            cancel: CancellationToken::new(),
        }
    }

    /// Capacity of the backing LRU cache.
    #[must_use]
    pub fn cache_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Token that stops the driver task when cancelled.
    #[must_use]
    pub fn cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Spawn the driver task and return a handle to it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn build<S: ImageSource + 'static>(self, source: S) -> ImageLoader {
        let cache = Arc::new(ImageCache::new(self.cache_capacity));
        let (tx, rx) = mpsc::unbounded_channel();

        let driver = LoaderDriver::new(
            source,
            Arc::clone(&cache),
            rx,
            tx.clone(),
            self.cancel.clone(),
        );
        tokio::spawn(driver.run());

        ImageLoader {
            tx,
            cache,
            next_token: Arc::new(AtomicU64::new(0)),
            cancel: self.cancel,
        }
    }
}

impl Default for LoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
