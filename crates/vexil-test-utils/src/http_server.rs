#![forbid(unsafe_code)]

//! Ephemeral HTTP server for exercising the transport layer in tests.

use std::net::SocketAddr;

use axum::Router;
use tokio::{net::TcpListener, sync::oneshot};
use url::Url;

/// Axum server bound to a random localhost port, shut down on drop.
pub struct TestHttpServer {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestHttpServer {
    /// Serve `router` on an OS-assigned port.
    ///
    /// The listener is bound before this returns, so requests issued from
    /// here on connect even if accept runs a moment later.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind.
    pub async fn new(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test HTTP listener");
        let addr = listener.local_addr().expect("read test listener addr");

        let (shutdown, shutdown_rx) = oneshot::channel();
        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("run test HTTP server");
        });

        Self {
            addr,
            shutdown: Some(shutdown),
        }
    }

    /// Absolute URL for `path` on this server.
    ///
    /// # Panics
    ///
    /// Panics if `path` does not join onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.base_url().join(path).expect("join server URL path")
    }

    /// Base URL of this server.
    ///
    /// # Panics
    ///
    /// Panics if the bound address does not form a valid URL.
    #[must_use]
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("parse base URL")
    }
}

impl Drop for TestHttpServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}
