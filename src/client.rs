//! HTTP Client with builder pattern.
//!
//! A small HTTP/1.1 GET client over the connection pool. Clones are cheap and
//! share the pool, so one client can serve any number of concurrent tasks.
//!
//! ```rust,ignore
//! use getclock::client::Client;
//!
//! let client = Client::builder().max_idle_per_host(2).build();
//! let resp = client.get("http://example.com").await?;
//! let bytes = resp.drain().await?;
//! ```

use crate::base::neterror::NetError;
use crate::http::streamfactory::HttpStreamFactory;
use crate::http::HttpResponse;
use crate::socket::pool::ClientSocketPool;
use bytes::Bytes;
use http::header::{ACCEPT, HOST, LOCATION, USER_AGENT};
use http::{HeaderValue, Method, Request, StatusCode};
use http_body_util::Empty;
use std::sync::Arc;
use url::{Position, Url};

const DEFAULT_USER_AGENT: &str = concat!("getclock/", env!("CARGO_PKG_VERSION"));

/// Requests a single [`Client::get`] may issue while following redirects.
pub const MAX_REDIRECTS: usize = 10;

/// HTTP Client for making requests.
///
/// Use [`Client::builder()`] to configure and create a client.
#[derive(Clone)]
pub struct Client {
    factory: Arc<HttpStreamFactory>,
    user_agent: HeaderValue,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("pool", self.factory.pool())
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Client {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// The pool shared by all clones of this client.
    pub fn pool(&self) -> &ClientSocketPool {
        self.factory.pool()
    }

    /// Send a GET and return once the head of the final response has
    /// arrived. Redirects are followed until [`MAX_REDIRECTS`] requests have
    /// gone out; the body of the final response is left on the wire for the
    /// caller to drain.
    pub async fn get(&self, url: &str) -> Result<HttpResponse, NetError> {
        let mut url = Url::parse(url)?;
        let mut hops = 0;

        loop {
            let response = self.send(&url).await?;
            let Some(next) = redirect_target(&url, &response)? else {
                return Ok(response);
            };

            hops += 1;
            if hops >= MAX_REDIRECTS {
                return Err(NetError::TooManyRedirects);
            }
            tracing::debug!(from = %url, to = %next, status = %response.status(), "following redirect");

            // A drained body hands its connection back for the next hop.
            if let Err(e) = response.drain().await {
                tracing::debug!(%url, error = %e, "redirect body not drained");
            }
            url = next;
        }
    }

    /// One request/response exchange against `url`.
    async fn send(&self, url: &Url) -> Result<HttpResponse, NetError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(NetError::UnknownUrlScheme);
        }

        let mut stream = self.factory.request_stream(url).await?;
        let first_attempt = stream.send_request(self.build_request(url)?).await;
        let response = match first_attempt {
            Ok(response) => response,
            // The peer may close an idle keep-alive connection at any time;
            // that says nothing about the target, so go again on a fresh one.
            Err(e) if stream.is_reused() => {
                tracing::debug!(%url, error = %e, "pooled connection failed, reconnecting");
                stream = self.factory.connect_stream(url).await?;
                stream.send_request(self.build_request(url)?).await?
            }
            Err(e) => return Err(e),
        };

        if stream.is_reused() {
            self.factory.pool().record_reuse();
        }

        let response = HttpResponse::new(response, stream, self.factory.clone());
        tracing::debug!(
            %url,
            status = %response.status(),
            version = ?response.version(),
            reused = response.connection_reused(),
            "response head received"
        );
        Ok(response)
    }

    fn build_request(&self, url: &Url) -> Result<Request<Empty<Bytes>>, NetError> {
        let host = url.host_str().ok_or(NetError::InvalidUrl)?;
        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Request::builder()
            .method(Method::GET)
            .uri(&url[Position::BeforePath..Position::AfterQuery])
            .header(HOST, authority)
            .header(USER_AGENT, self.user_agent.clone())
            .header(ACCEPT, "*/*")
            .body(Empty::new())
            .map_err(|_| NetError::InvalidUrl)
    }
}

/// Where a response redirects to, if it is a redirect worth following.
/// A redirect status without a `Location` is handed back as the final answer.
fn redirect_target(base: &Url, response: &HttpResponse) -> Result<Option<Url>, NetError> {
    if !matches!(
        response.status(),
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    ) {
        return Ok(None);
    }
    let Some(location) = response.headers().get(LOCATION) else {
        return Ok(None);
    };

    let location = location.to_str().map_err(|_| NetError::InvalidRedirect)?;
    base.join(location)
        .map(Some)
        .map_err(|_| NetError::InvalidRedirect)
}

/// Builder for creating a [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    max_idle_per_host: Option<usize>,
    user_agent: Option<HeaderValue>,
}

impl ClientBuilder {
    /// Maximum idle keep-alive connections kept per host. `0` disables reuse.
    pub fn max_idle_per_host(mut self, max: usize) -> Self {
        self.max_idle_per_host = Some(max);
        self
    }

    /// Set the User-Agent header. Invalid header values are ignored.
    pub fn user_agent<V: TryInto<HeaderValue>>(mut self, value: V) -> Self {
        if let Ok(val) = value.try_into() {
            self.user_agent = Some(val);
        }
        self
    }

    /// Build the client.
    pub fn build(self) -> Client {
        let pool = Arc::new(ClientSocketPool::new(
            self.max_idle_per_host
                .unwrap_or(ClientSocketPool::DEFAULT_MAX_IDLE_PER_GROUP),
        ));

        Client {
            factory: Arc::new(HttpStreamFactory::new(pool)),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_USER_AGENT)),
        }
    }
}
