use async_trait::async_trait;
use tracing::{debug, trace};
use url::Url;
use vexil_core::Image;
use vexil_net::{HttpClient, Net, NetOptions};

use crate::{error::ServiceResult, traits::ImageSource};

/// Fetch-and-decode adapter over a [`Net`] transport.
///
/// Decoding happens on the fetching task, so a slow decode never stalls
/// the loader.
#[derive(Clone, Debug)]
pub struct ImageService<N> {
    net: N,
}

/// Service over the default HTTP transport.
pub type DefaultImageService = ImageService<HttpClient>;

impl<N: Net> ImageService<N> {
    pub fn new(net: N) -> Self {
        Self { net }
    }

    #[must_use]
    pub fn net(&self) -> &N {
        &self.net
    }
}

impl Default for DefaultImageService {
    fn default() -> Self {
        Self::new(HttpClient::new(NetOptions::default()))
    }
}

#[async_trait]
impl<N: Net> ImageSource for ImageService<N> {
    async fn get_image(&self, url: &Url) -> ServiceResult<Image> {
        trace!(%url, "fetching image bytes");
        let bytes = self.net.get_bytes(url.clone(), None).await?;
        debug!(%url, len = bytes.len(), "decoding fetched bytes");
        let image = Image::from_bytes(&bytes)?;
        Ok(image)
    }
}
