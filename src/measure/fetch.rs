//! The HTTP seam the measurer is written against.

use crate::base::neterror::NetError;
use crate::client::Client;
use crate::http::HttpResponse;
use std::future::Future;

/// Something that can issue a GET and hand back the response head.
///
/// Implementations must be safe to share between concurrently running
/// measurement tasks.
pub trait Fetch: Send + Sync + 'static {
    type Response: FetchResponse;

    /// Resolves once the status line and headers have arrived.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Self::Response, NetError>> + Send;
}

/// A response whose body has not been read yet.
pub trait FetchResponse: Send + 'static {
    fn status_code(&self) -> u16;

    /// Read the body to the end, discarding it. Returns the byte count.
    fn drain(self) -> impl Future<Output = Result<u64, NetError>> + Send;
}

impl Fetch for Client {
    type Response = HttpResponse;

    async fn fetch(&self, url: &str) -> Result<HttpResponse, NetError> {
        self.get(url).await
    }
}

impl FetchResponse for HttpResponse {
    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }

    async fn drain(self) -> Result<u64, NetError> {
        HttpResponse::drain(self).await
    }
}
