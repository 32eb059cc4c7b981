use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};
use vexil_cache::ImageCache;
use vexil_core::{Image, ImageKey};
use vexil_service::ImageSource;

use crate::token::LoadToken;

/// Callback invoked with the decoded image when a load resolves.
pub type ImageCallback = Box<dyn FnOnce(Arc<Image>) + Send>;

pub(crate) enum Msg {
    Register {
        key: ImageKey,
        token: LoadToken,
        callback: ImageCallback,
    },
    Cancel {
        token: LoadToken,
    },
    Fetched {
        key: ImageKey,
        image: Option<Arc<Image>>,
    },
}

struct Waiter {
    token: LoadToken,
    callback: ImageCallback,
}

/// Single task owning all load coordination state.
///
/// The waiter table, token routing table, and pending-fetch set are
/// mutated only here, and every pending-waiter callback runs here, so no
/// locking is needed around any of them. Fetches run on spawned worker
/// tasks and report back through the same message channel, which makes a
/// cancel racing a completion resolve in plain arrival order.
pub(crate) struct LoaderDriver<S> {
    source: Arc<S>,
    cache: Arc<ImageCache>,
    rx: mpsc::UnboundedReceiver<Msg>,
    // Cloned into fetch tasks for completion delivery.
    tx: mpsc::UnboundedSender<Msg>,
    waiters: HashMap<ImageKey, Vec<Waiter>>,
    tokens: HashMap<LoadToken, ImageKey>,
    pending: HashSet<ImageKey>,
    cancel: CancellationToken,
}

impl<S: ImageSource + 'static> LoaderDriver<S> {
    pub(crate) fn new(
        source: S,
        cache: Arc<ImageCache>,
        rx: mpsc::UnboundedReceiver<Msg>,
        tx: mpsc::UnboundedSender<Msg>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source: Arc::new(source),
            cache,
            rx,
            tx,
            waiters: HashMap::new(),
            tokens: HashMap::new(),
            pending: HashSet::new(),
            cancel,
        }
    }

    pub(crate) async fn run(mut self) {
        trace!("loader driver started");

        loop {
            tokio::select! {
                biased;

                () = self.cancel.cancelled() => break,

                msg = self.rx.recv() => match msg {
                    Some(msg) => self.handle(msg),
                    None => break, // all handles dropped
                },
            }
        }

        trace!("loader driver stopped");
    }

    fn handle(&mut self, msg: Msg) {
        match msg {
            Msg::Register {
                key,
                token,
                callback,
            } => self.register(key, token, callback),
            Msg::Cancel { token } => self.cancel_waiter(token),
            Msg::Fetched { key, image } => self.complete(key, image),
        }
    }

    fn register(&mut self, key: ImageKey, token: LoadToken, callback: ImageCallback) {
        // The fetch may have resolved while the register message was in
        // flight; deliver straight from the cache and retire the token.
        if let Some(image) = self.cache.get(&key) {
            trace!(key = %key, "register raced a completed fetch, delivering from cache");
            callback(image);
            return;
        }

        self.tokens.insert(token, key.clone());
        self.waiters
            .entry(key.clone())
            .or_default()
            .push(Waiter { token, callback });

        if self.pending.insert(key.clone()) {
            self.spawn_fetch(key);
        } else {
            trace!(key = %key, "fetch already in flight, waiter attached");
        }
    }

    fn spawn_fetch(&self, key: ImageKey) {
        debug!(key = %key, "issuing fetch");
        let source = Arc::clone(&self.source);
        let cache = Arc::clone(&self.cache);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let image = match source.get_image(key.url()).await {
                Ok(image) => {
                    let image = Arc::new(image);
                    // Written from the worker task; the cache is
                    // independently thread-safe.
                    cache.put(key.clone(), Arc::clone(&image));
                    Some(image)
                }
                Err(error) => {
                    debug!(key = %key, %error, "fetch failed");
                    None
                }
            };
            // Ignore send failure: the driver is gone and any result is
            // already cached.
            let _ = tx.send(Msg::Fetched { key, image });
        });
    }

    fn cancel_waiter(&mut self, token: LoadToken) {
        let Some(key) = self.tokens.remove(&token) else {
            trace!(?token, "cancel on retired token ignored");
            return;
        };

        if let Some(waiters) = self.waiters.get_mut(&key) {
            waiters.retain(|waiter| waiter.token != token);
            if waiters.is_empty() {
                self.waiters.remove(&key);
            }
        }
        trace!(?token, key = %key, "waiter cancelled");
    }

    fn complete(&mut self, key: ImageKey, image: Option<Arc<Image>>) {
        // Clear the pending marker unconditionally so a failed key returns
        // to absent and a later load starts a fresh fetch cycle.
        self.pending.remove(&key);

        let waiters = self.waiters.remove(&key).unwrap_or_default();
        for waiter in &waiters {
            self.tokens.remove(&waiter.token);
        }

        match image {
            Some(image) => {
                debug!(key = %key, waiters = waiters.len(), "fetch resolved, dispatching");
                for waiter in waiters {
                    (waiter.callback)(Arc::clone(&image));
                }
            }
            None => {
                // Failure is communicated by absence of delivery.
                debug!(key = %key, dropped = waiters.len(), "fetch failed, dropping waiters");
            }
        }
    }
}
