//! # getclock
//!
//! Concurrent HTTP GET timing.
//!
//! For every URL, `getclock` issues one GET and takes two checkpoints: when
//! the response head arrives and when the body has been read to the end.
//! All URLs are measured at the same time, one tokio task each, and the
//! results come back in input order.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use getclock::measure::{Collector, CollectorConfig, Measurer};
//! use getclock::client::Client;
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::builder().max_idle_per_host(4).build();
//!     let collector = Collector::new(Measurer::new(client), CollectorConfig::default());
//!     for record in collector.measure_all(["http://example.com/"]).await {
//!         println!("{record:?}");
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`client`] - HTTP/1.1 GET client with connection reuse and redirects
//! - [`http`] - Streams, responses and body draining
//! - [`socket`] - DNS/TCP/TLS connect and the idle pool
//! - [`measure`] - Measurer, collector and records
//! - [`report`] - Plain-text output lines

pub mod base;
pub mod client;
pub mod http;
pub mod measure;
pub mod report;
pub mod socket;
pub mod telemetry;
