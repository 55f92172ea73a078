//! Response body streaming.
//! Mirrors Chromium's HttpStream::ReadResponseBody.

use crate::base::context::HyperResultExt;
use crate::base::neterror::NetError;
use crate::http::streamfactory::{HttpStream, HttpStreamFactory};
use http_body::Body as _;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use std::sync::Arc;

/// Response body bound to the connection it streams from.
///
/// The connection goes back to the pool only after the body has been read to
/// the end. Dropping the body early, or failing mid-stream, drops the
/// connection with it.
#[derive(Debug)]
pub struct ResponseBody {
    inner: Incoming,
    stream: Option<(HttpStream, Arc<HttpStreamFactory>)>,
}

impl ResponseBody {
    pub fn new(inner: Incoming, stream: HttpStream, factory: Arc<HttpStreamFactory>) -> Self {
        Self {
            inner,
            stream: Some((stream, factory)),
        }
    }

    /// Exact body length announced by the server, when known.
    pub fn content_length(&self) -> Option<u64> {
        self.inner.size_hint().exact()
    }

    /// Read the body to the end, discarding the data. Returns the number of
    /// bytes read.
    pub async fn drain(mut self) -> Result<u64, NetError> {
        let expected = self.content_length();
        let mut total: u64 = 0;

        while let Some(frame) = self.inner.frame().await {
            if let Ok(data) = frame.body_context()?.into_data() {
                total += data.len() as u64;
            }
        }

        tracing::debug!(bytes = total, ?expected, "response body drained");
        if let Some((stream, factory)) = self.stream.take() {
            factory.release(stream);
        }
        Ok(total)
    }
}

impl Drop for ResponseBody {
    fn drop(&mut self) {
        if self.stream.take().is_some() {
            tracing::debug!("response body not fully read, closing connection");
        }
    }
}
