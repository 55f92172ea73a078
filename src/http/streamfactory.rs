use crate::base::context::HyperResultExt;
use crate::base::neterror::NetError;
use crate::socket::connectjob::ConnectJob;
use crate::socket::pool::{ClientSocketPool, GroupId, RequestSender};
use bytes::Bytes;
use http::{Request, Response};
use http_body_util::Empty;
use hyper::body::Incoming;
use hyper::client::conn::http1;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use url::Url;

/// One HTTP/1.1 connection checked out for a single exchange.
/// Equivalent to net::HttpStream.
#[derive(Debug)]
pub struct HttpStream {
    group: GroupId,
    sender: RequestSender,
    reused: bool,
}

impl HttpStream {
    pub async fn send_request(
        &mut self,
        req: Request<Empty<Bytes>>,
    ) -> Result<Response<Incoming>, NetError> {
        self.sender.send_request(req).await.transport_context()
    }

    /// Whether this stream came out of the idle pool.
    pub fn is_reused(&self) -> bool {
        self.reused
    }
}

#[derive(Debug)]
pub struct HttpStreamFactory {
    pool: Arc<ClientSocketPool>,
}

impl HttpStreamFactory {
    pub fn new(pool: Arc<ClientSocketPool>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &ClientSocketPool {
        &self.pool
    }

    /// Get a ready stream for `url`: an idle pooled connection if one is
    /// still usable, a fresh connection otherwise.
    pub async fn request_stream(&self, url: &Url) -> Result<HttpStream, NetError> {
        let group = GroupId::from_url(url).ok_or(NetError::InvalidUrl)?;

        while let Some(mut sender) = self.pool.checkout(&group) {
            match sender.ready().await {
                Ok(()) => {
                    tracing::debug!(%url, "reusing idle connection");
                    return Ok(HttpStream {
                        group,
                        sender,
                        reused: true,
                    });
                }
                Err(e) => tracing::debug!(error = %e, "discarding stale idle connection"),
            }
        }

        self.connect_stream(url).await
    }

    /// Always open a new connection.
    pub async fn connect_stream(&self, url: &Url) -> Result<HttpStream, NetError> {
        let group = GroupId::from_url(url).ok_or(NetError::InvalidUrl)?;
        let socket = ConnectJob::connect(url).await?;
        let tls = socket.is_tls();
        let peer = socket.peer_addr();

        let (sender, conn) = http1::handshake(TokioIo::new(socket))
            .await
            .transport_context()?;

        // Drive the connection until both halves are gone.
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::debug!(error = %e, "connection driver exited with error");
            }
        });

        tracing::debug!(%url, tls, ?peer, "opened new connection");
        Ok(HttpStream {
            group,
            sender,
            reused: false,
        })
    }

    /// Hand a stream whose response was fully consumed back to the pool.
    pub fn release(&self, stream: HttpStream) {
        self.pool.release(stream.group, stream.sender);
    }
}
