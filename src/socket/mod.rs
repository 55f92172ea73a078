//! Socket and connection management.
//!
//! - [`connectjob`]: DNS → TCP → TLS connection flow
//! - [`client`]: the connected socket type
//! - [`pool`]: idle keep-alive connections per (scheme, host, port)

pub mod client;
pub mod connectjob;
pub mod pool;
