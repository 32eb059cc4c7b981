#![forbid(unsafe_code)]

//! Gated image source for driving loader tests.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use image::DynamicImage;
use tokio::sync::{Semaphore, mpsc};
use url::Url;
use vexil_core::Image;
use vexil_net::NetError;
use vexil_service::{ImageSource, ServiceResult};

/// [`ImageSource`] whose fetches block until explicitly released.
///
/// Each `get_image` call reports its URL on the started channel, then
/// waits for one gate permit before resolving. Tests hold a fetch open
/// while they register more waiters or cancel tokens, then call
/// [`release`](GatedSource::release) to let one fetch through.
pub struct GatedSource {
    gate: Semaphore,
    started_tx: mpsc::UnboundedSender<Url>,
    calls: AtomicUsize,
    fail: bool,
}

impl GatedSource {
    /// Source whose released fetches resolve to a 1x1 image.
    ///
    /// Returns the source and the receiver reporting each started fetch.
    #[must_use]
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<Url>) {
        Self::with_outcome(false)
    }

    /// Source whose released fetches fail with a transport error.
    #[must_use]
    pub fn failing() -> (Arc<Self>, mpsc::UnboundedReceiver<Url>) {
        Self::with_outcome(true)
    }

    fn with_outcome(fail: bool) -> (Arc<Self>, mpsc::UnboundedReceiver<Url>) {
        let (started_tx, started_rx) = mpsc::unbounded_channel();
        let source = Arc::new(Self {
            gate: Semaphore::new(0),
            started_tx,
            calls: AtomicUsize::new(0),
            fail,
        });
        (source, started_rx)
    }

    /// Let one blocked fetch proceed.
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    /// Number of fetches started so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageSource for GatedSource {
    async fn get_image(&self, url: &Url) -> ServiceResult<Image> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _ = self.started_tx.send(url.clone());

        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|_| NetError::http("gate closed"))?;
        permit.forget();

        if self.fail {
            return Err(NetError::http("gated fetch failed").into());
        }
        Ok(Image::from(DynamicImage::new_rgba8(1, 1)))
    }
}
