use std::sync::Arc;

use async_trait::async_trait;
use url::Url;
use vexil_core::Image;

use crate::error::ServiceResult;

/// Produces decoded images for the loader.
///
/// One capability: fetch and decode the image at a URL. Implementations
/// must be safe to call from any task; the loader runs one call per
/// in-flight resource on a worker task.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch and decode the image at `url`.
    async fn get_image(&self, url: &Url) -> ServiceResult<Image>;
}

#[async_trait]
impl<S: ImageSource + ?Sized> ImageSource for Arc<S> {
    async fn get_image(&self, url: &Url) -> ServiceResult<Image> {
        (**self).get_image(url).await
    }
}
