#![forbid(unsafe_code)]

use std::{num::NonZeroUsize, sync::Arc};

use lru::LruCache;
use parking_lot::Mutex;
use vexil_core::{Image, ImageKey};

/// In-memory image store with LRU eviction.
///
/// ## Normative
/// - Entries are inserted only on fetch success and shared behind [`Arc`].
/// - `put` on an existing key replaces the entry (a re-fetch after
///   eviction overwrites).
/// - Eviction is transparent: a post-eviction `get` returns `None`, which
///   forces the loader to issue a fresh fetch.
/// - Safe to call from any task: fetch completion writes from a worker
///   while the loader reads from its own context.
pub struct ImageCache {
    entries: Mutex<LruCache<ImageKey, Arc<Image>>>,
}

impl ImageCache {
    /// Capacity used by [`ImageCache::default`].
    pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(128) {
        Some(capacity) => capacity,
        None => panic!("default capacity is non-zero"),
    };

    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Look up `key`, marking the entry as recently used.
    #[must_use]
    pub fn get(&self, key: &ImageKey) -> Option<Arc<Image>> {
        self.entries.lock().get(key).cloned()
    }

    /// Insert or replace the entry for `key`.
    pub fn put(&self, key: ImageKey, image: Arc<Image>) {
        self.entries.lock().put(key, image);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for ImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let size = self.entries.try_lock().map(|entries| entries.len());
        f.debug_struct("ImageCache")
            .field("size", &size)
            .finish_non_exhaustive()
    }
}
