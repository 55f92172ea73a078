//! Error context helpers.
//!
//! Extension traits that turn lower-level `io::Error` and `hyper::Error`
//! results into [`NetError`] values carrying host or phase context.

use crate::base::neterror::NetError;
use std::io;

/// Extension trait for adding context to IO Results.
pub trait IoResultExt<T> {
    /// Add connection context to an IO error.
    ///
    /// ```ignore
    /// let stream = TcpStream::connect(addr).await
    ///     .connection_context("example.com", 443)?;
    /// // Error: "Connection to example.com:443 failed: connection refused"
    /// ```
    fn connection_context(self, host: &str, port: u16) -> Result<T, NetError>;

    /// Add DNS resolution context to an IO error.
    fn dns_context(self, domain: &str) -> Result<T, NetError>;
}

impl<T> IoResultExt<T> for Result<T, io::Error> {
    fn connection_context(self, host: &str, port: u16) -> Result<T, NetError> {
        self.map_err(|e| match NetError::from_io(&e) {
            // Refusals keep their own variant so callers can match on them.
            NetError::ConnectionRefused => NetError::ConnectionRefused,
            _ => NetError::connection_failed_to(host, port, e),
        })
    }

    fn dns_context(self, domain: &str) -> Result<T, NetError> {
        self.map_err(|e| NetError::dns_failed(domain, e))
    }
}

/// Extension trait classifying hyper errors by the phase they occurred in.
pub trait HyperResultExt<T> {
    /// The error happened before the response head was received.
    fn transport_context(self) -> Result<T, NetError>;

    /// The error happened while the response body was streaming.
    fn body_context(self) -> Result<T, NetError>;
}

impl<T> HyperResultExt<T> for Result<T, hyper::Error> {
    fn transport_context(self) -> Result<T, NetError> {
        self.map_err(|e| {
            tracing::debug!(error = %e, "request failed before response head");
            NetError::from_hyper(&e)
        })
    }

    fn body_context(self) -> Result<T, NetError> {
        self.map_err(|e| {
            tracing::debug!(error = %e, "response body stream failed");
            NetError::from_hyper_body(&e)
        })
    }
}
