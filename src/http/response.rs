//! HTTP Response with body access.

use crate::base::neterror::NetError;
use crate::http::streamfactory::{HttpStream, HttpStreamFactory};
use crate::http::ResponseBody;
use http::{HeaderMap, StatusCode, Version};
use hyper::body::Incoming;
use std::sync::Arc;

/// HTTP response head plus the not yet consumed body.
#[derive(Debug)]
pub struct HttpResponse {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    reused: bool,
    body: Option<ResponseBody>,
}

impl HttpResponse {
    /// Create from a hyper response and the stream it arrived on.
    pub fn new(
        resp: http::Response<Incoming>,
        stream: HttpStream,
        factory: Arc<HttpStreamFactory>,
    ) -> Self {
        let reused = stream.is_reused();
        let (parts, body) = resp.into_parts();
        Self {
            status: parts.status,
            version: parts.version,
            headers: parts.headers,
            reused,
            body: Some(ResponseBody::new(body, stream, factory)),
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the HTTP version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Get a reference to the headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Whether the request went out on a pooled keep-alive connection.
    pub fn connection_reused(&self) -> bool {
        self.reused
    }

    /// Take the response body for consumption.
    /// Can only be called once - subsequent calls return None.
    pub fn take_body(&mut self) -> Option<ResponseBody> {
        self.body.take()
    }

    /// Read and discard the whole body, returning its length.
    pub async fn drain(mut self) -> Result<u64, NetError> {
        match self.take_body() {
            Some(body) => body.drain().await,
            None => Ok(0),
        }
    }
}
