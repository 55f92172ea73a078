use std::io;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum NetError {
    // Connection Errors
    #[error("Connection closed (TCP FIN)")]
    ConnectionClosed,
    #[error("Connection reset (TCP RST)")]
    ConnectionReset,
    #[error("Connection refused")]
    ConnectionRefused,
    #[error("Connection aborted")]
    ConnectionAborted,
    #[error("Connection failed")]
    ConnectionFailed,
    #[error("Connection to {host}:{port} failed: {reason}")]
    ConnectionFailedTo {
        host: String,
        port: u16,
        reason: String,
    },
    #[error("Name not resolved")]
    NameNotResolved,
    #[error("Name not resolved for {domain}: {reason}")]
    NameNotResolvedFor { domain: String, reason: String },
    #[error("SSL protocol error")]
    SslProtocolError,
    #[error("SSL handshake with {host} failed: {reason}")]
    SslHandshakeFailed { host: String, reason: String },
    #[error("Address unreachable")]
    AddressUnreachable,
    #[error("Connection timed out")]
    ConnectionTimedOut,

    // HTTP Errors
    #[error("Invalid URL")]
    InvalidUrl,
    #[error("Unknown URL scheme")]
    UnknownUrlScheme,
    #[error("Invalid redirect")]
    InvalidRedirect,
    #[error("Too many redirects")]
    TooManyRedirects,
    #[error("Empty response")]
    EmptyResponse,
    #[error("Content-Length mismatch")]
    ContentLengthMismatch,
    #[error("Incomplete chunked encoding")]
    IncompleteChunkedEncoding,
    #[error("Invalid HTTP response")]
    InvalidHttpResponse,
    #[error("Error reading response body")]
    HttpBodyError,

    // Measurement Errors
    #[error("Measurement task failed")]
    TaskFailed,

    #[error("Unknown error: {0}")]
    Unknown(i32),
}

impl NetError {
    /// Chromium-compatible numeric code. Context-carrying variants share the
    /// code of their plain counterpart.
    pub fn as_i32(&self) -> i32 {
        match self {
            NetError::ConnectionClosed => -100,
            NetError::ConnectionReset => -101,
            NetError::ConnectionRefused => -102,
            NetError::ConnectionAborted => -103,
            NetError::ConnectionFailed | NetError::ConnectionFailedTo { .. } => -104,
            NetError::NameNotResolved | NetError::NameNotResolvedFor { .. } => -105,
            NetError::SslProtocolError | NetError::SslHandshakeFailed { .. } => -107,
            NetError::AddressUnreachable => -109,
            NetError::ConnectionTimedOut => -118,

            NetError::InvalidUrl => -300,
            NetError::UnknownUrlScheme => -302,
            NetError::InvalidRedirect => -303,
            NetError::TooManyRedirects => -310,
            NetError::EmptyResponse => -324,
            NetError::ContentLengthMismatch => -354,
            NetError::IncompleteChunkedEncoding => -355,
            NetError::InvalidHttpResponse => -370,
            // Custom codes live far outside Chromium's ranges
            NetError::HttpBodyError => -10000,
            NetError::TaskFailed => -10001,
            NetError::Unknown(code) => *code,
        }
    }

    /// Build a [`NetError::ConnectionFailedTo`] from an IO error.
    pub fn connection_failed_to(host: &str, port: u16, err: io::Error) -> Self {
        NetError::ConnectionFailedTo {
            host: host.to_string(),
            port,
            reason: err.to_string(),
        }
    }

    /// Build a [`NetError::NameNotResolvedFor`] from an IO error.
    pub fn dns_failed(domain: &str, err: io::Error) -> Self {
        NetError::NameNotResolvedFor {
            domain: domain.to_string(),
            reason: err.to_string(),
        }
    }

    /// Classify a socket-level IO error.
    pub fn from_io(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::ConnectionRefused => NetError::ConnectionRefused,
            io::ErrorKind::ConnectionReset => NetError::ConnectionReset,
            io::ErrorKind::ConnectionAborted => NetError::ConnectionAborted,
            io::ErrorKind::TimedOut => NetError::ConnectionTimedOut,
            io::ErrorKind::AddrNotAvailable => NetError::AddressUnreachable,
            io::ErrorKind::NotConnected
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof => NetError::ConnectionClosed,
            _ => NetError::ConnectionFailed,
        }
    }

    /// Classify an error returned while sending a request and awaiting the
    /// response head.
    pub fn from_hyper(err: &hyper::Error) -> Self {
        if err.is_parse() || err.is_parse_status() {
            NetError::InvalidHttpResponse
        } else if err.is_incomplete_message() {
            NetError::EmptyResponse
        } else if err.is_timeout() {
            NetError::ConnectionTimedOut
        } else if let Some(io_err) = find_io_source(err) {
            NetError::from_io(io_err)
        } else if err.is_canceled() || err.is_closed() {
            NetError::ConnectionClosed
        } else {
            NetError::ConnectionFailed
        }
    }

    /// Classify an error raised while streaming a response body.
    pub fn from_hyper_body(err: &hyper::Error) -> Self {
        if err.is_incomplete_message() {
            return NetError::ContentLengthMismatch;
        }
        match find_io_source(err) {
            Some(io_err) => match io_err.kind() {
                io::ErrorKind::UnexpectedEof => NetError::ContentLengthMismatch,
                io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput => {
                    NetError::IncompleteChunkedEncoding
                }
                _ => NetError::from_io(io_err),
            },
            None => NetError::HttpBodyError,
        }
    }
}

fn find_io_source<'a>(err: &'a (dyn std::error::Error + 'static)) -> Option<&'a io::Error> {
    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return Some(io_err);
        }
        source = cause.source();
    }
    None
}

impl From<i32> for NetError {
    fn from(code: i32) -> Self {
        match code {
            -100 => NetError::ConnectionClosed,
            -101 => NetError::ConnectionReset,
            -102 => NetError::ConnectionRefused,
            -103 => NetError::ConnectionAborted,
            -104 => NetError::ConnectionFailed,
            -105 => NetError::NameNotResolved,
            -107 => NetError::SslProtocolError,
            -109 => NetError::AddressUnreachable,
            -118 => NetError::ConnectionTimedOut,

            -300 => NetError::InvalidUrl,
            -302 => NetError::UnknownUrlScheme,
            -303 => NetError::InvalidRedirect,
            -310 => NetError::TooManyRedirects,
            -324 => NetError::EmptyResponse,
            -354 => NetError::ContentLengthMismatch,
            -355 => NetError::IncompleteChunkedEncoding,
            -370 => NetError::InvalidHttpResponse,
            -10000 => NetError::HttpBodyError,
            -10001 => NetError::TaskFailed,
            _ => NetError::Unknown(code),
        }
    }
}

impl From<url::ParseError> for NetError {
    fn from(_: url::ParseError) -> Self {
        NetError::InvalidUrl
    }
}
