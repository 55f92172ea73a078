use crate::base::neterror::NetError;
use crate::client::Client;
use crate::measure::{Fetch, Measurer, Record};
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Collector tuning.
#[derive(Debug, Clone, Default)]
pub struct CollectorConfig {
    /// Upper bound on measurements in flight. `None` runs all at once.
    pub concurrency: Option<usize>,
}

/// Fans out one task per URL and gathers the records in input order.
///
/// Every task owns its own record and hands it back through its join
/// handle; the handles are awaited together as the completion barrier, so
/// there is no shared results buffer to synchronize.
pub struct Collector<F = Client> {
    measurer: Arc<Measurer<F>>,
    limit: Option<Arc<Semaphore>>,
}

impl Default for Collector<Client> {
    fn default() -> Self {
        Self::new(Measurer::default(), CollectorConfig::default())
    }
}

impl<F: Fetch> Collector<F> {
    pub fn new(measurer: Measurer<F>, config: CollectorConfig) -> Self {
        Self {
            measurer: Arc::new(measurer),
            // A zero cap would never let anything through
            limit: config
                .concurrency
                .map(|n| Arc::new(Semaphore::new(n.max(1)))),
        }
    }

    /// Measure all `urls` concurrently. Output position `i` holds the record
    /// for input URL `i`; the output is exactly as long as the input.
    pub async fn measure_all<I, S>(&self, urls: I) -> Vec<Record>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (urls, tasks): (Vec<String>, Vec<_>) = urls
            .into_iter()
            .map(|url| {
                let url: String = url.into();
                let measurer = Arc::clone(&self.measurer);
                let limit = self.limit.clone();
                let task_url = url.clone();

                let task = tokio::spawn(async move {
                    let _permit = match limit {
                        Some(limit) => limit.acquire_owned().await.ok(),
                        None => None,
                    };
                    measurer.measure(&task_url).await
                });
                (url, task)
            })
            .unzip();

        tracing::debug!(tasks = tasks.len(), "measurement tasks launched");
        let results = futures::future::join_all(tasks).await;

        urls.into_iter()
            .zip(results)
            .map(|(url, result)| match result {
                Ok(record) => record,
                Err(err) => {
                    tracing::error!(%url, error = %err, "measurement task did not complete");
                    Record::new(url).failed(NetError::TaskFailed)
                }
            })
            .collect()
    }
}
