use crate::base::context::IoResultExt;
use crate::base::neterror::NetError;
use crate::socket::client::SocketType;
use boring::ssl::{SslConnector, SslMethod};
use std::io;
use std::net::SocketAddr;
use tokio::net::TcpStream;
use url::{Host, Url};

/// Manages the connection process: DNS -> TCP -> SSL.
/// Roughly equivalent to net::ConnectJob.
pub struct ConnectJob;

impl ConnectJob {
    pub async fn connect(url: &Url) -> Result<SocketType, NetError> {
        let host = lookup_host_of(url)?;
        let port = url.port_or_known_default().ok_or(NetError::InvalidUrl)?;

        // 1. DNS Resolution
        let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host.as_str(), port))
            .await
            .dns_context(&host)?
            .collect();
        if addrs.is_empty() {
            return Err(NetError::NameNotResolvedFor {
                domain: host,
                reason: "no addresses returned".to_string(),
            });
        }

        // 2. TCP Connect, first address that accepts wins
        let stream = connect_first(&addrs).await.connection_context(&host, port)?;
        tracing::debug!(%host, port, "tcp connected");

        // 3. SSL Handshake (if https)
        match url.scheme() {
            "https" => Ok(SocketType::Ssl(tls_handshake(&host, stream).await?)),
            "http" => Ok(SocketType::Tcp(stream)),
            _ => Err(NetError::UnknownUrlScheme),
        }
    }
}

/// Host as accepted by the resolver: IPv6 literals lose their brackets.
fn lookup_host_of(url: &Url) -> Result<String, NetError> {
    match url.host() {
        Some(Host::Domain(domain)) => Ok(domain.to_string()),
        Some(Host::Ipv4(addr)) => Ok(addr.to_string()),
        Some(Host::Ipv6(addr)) => Ok(addr.to_string()),
        None => Err(NetError::InvalidUrl),
    }
}

async fn connect_first(addrs: &[SocketAddr]) -> io::Result<TcpStream> {
    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(e) => {
                tracing::debug!(%addr, error = %e, "tcp connect attempt failed");
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no address")))
}

async fn tls_handshake(
    host: &str,
    stream: TcpStream,
) -> Result<tokio_boring::SslStream<TcpStream>, NetError> {
    let mut builder =
        SslConnector::builder(SslMethod::tls()).map_err(|_| NetError::SslProtocolError)?;

    // Only HTTP/1.1 is spoken on top of the tunnel.
    builder
        .set_alpn_protos(b"\x08http/1.1")
        .map_err(|_| NetError::SslProtocolError)?;

    let config = builder
        .build()
        .configure()
        .map_err(|_| NetError::SslProtocolError)?;

    tokio_boring::connect(config, host, stream)
        .await
        .map_err(|e| NetError::SslHandshakeFailed {
            host: host.to_string(),
            reason: e.to_string(),
        })
}
