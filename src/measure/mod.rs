//! Per-URL GET timing and concurrent collection.
//!
//! - [`Measurer`]: one GET, two checkpoints (headers received, body drained)
//! - [`Collector`]: one task per URL, records returned in input order
//! - [`Fetch`]/[`FetchResponse`]: the HTTP seam, implemented by [`Client`]

pub mod collector;
pub mod fetch;
pub mod record;

pub use collector::{Collector, CollectorConfig};
pub use fetch::{Fetch, FetchResponse};
pub use record::Record;

use crate::client::Client;
use tokio::time::Instant;

/// Times GET requests through a configured client.
///
/// `Measurer::default()` owns a fresh [`Client`]; `Measurer::new` takes any
/// [`Fetch`] implementation, typically a clone of a shared client.
#[derive(Debug, Clone)]
pub struct Measurer<F = Client> {
    fetcher: F,
}

impl Default for Measurer<Client> {
    fn default() -> Self {
        Self::new(Client::default())
    }
}

impl<F: Fetch> Measurer<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Measure a single GET. Never fails: errors end up in the record.
    pub async fn measure(&self, url: &str) -> Record {
        let record = Record::new(url);
        let t0 = Instant::now();

        let response = match self.fetcher.fetch(url).await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(%url, error = %err, "request failed");
                return record.failed(err);
            }
        };
        let time_to_headers = t0.elapsed();
        let status = response.status_code();

        // The response is moved into drain and released there on every path.
        let record = Record {
            time_to_headers,
            ..record
        };
        match response.drain().await {
            Ok(body_bytes) => Record {
                status,
                time_to_full_read: t0.elapsed(),
                body_bytes,
                ..record
            },
            Err(err) => {
                tracing::debug!(%url, error = %err, "reading body failed");
                record.failed(err)
            }
        }
    }
}

/// Measure every URL with a default client and no concurrency cap.
pub async fn measure_all<I, S>(urls: I) -> Vec<Record>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Collector::default().measure_all(urls).await
}
