//! Stub HTTP layer for measurer and collector tests.
#![allow(dead_code)]

use getclock::base::neterror::NetError;
use getclock::measure::{Fetch, FetchResponse};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub mod server;

/// What the stub does for one URL.
#[derive(Debug, Clone)]
pub enum Canned {
    /// Headers after `head_delay`, `body_len` bytes after `body_delay`.
    Ok {
        status: u16,
        body_len: u64,
        head_delay: Duration,
        body_delay: Duration,
    },
    /// Fails before a response head exists.
    Transport(NetError),
    /// Head arrives after `head_delay`, then reading the body fails.
    BodyFails {
        status: u16,
        error: NetError,
        head_delay: Duration,
    },
    /// The fetch itself panics.
    Panic,
}

impl Canned {
    pub fn ok(status: u16, body_len: u64) -> Self {
        Canned::Ok {
            status,
            body_len,
            head_delay: Duration::ZERO,
            body_delay: Duration::from_millis(1),
        }
    }

    pub fn body_fails(error: NetError, head_delay: Duration) -> Self {
        Canned::BodyFails {
            status: 200,
            error,
            head_delay,
        }
    }

    pub fn slow(status: u16, body_len: u64, head_delay: Duration) -> Self {
        Canned::Ok {
            status,
            body_len,
            head_delay,
            body_delay: Duration::from_millis(1),
        }
    }
}

#[derive(Debug, Default)]
pub struct Counters {
    pub fetches: AtomicUsize,
    pub drains: AtomicUsize,
    pub released: AtomicUsize,
    pub in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

#[derive(Clone, Default)]
pub struct StubFetch {
    routes: Arc<HashMap<String, Canned>>,
    pub counters: Arc<Counters>,
}

impl StubFetch {
    pub fn new<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = (S, Canned)>,
        S: Into<String>,
    {
        Self {
            routes: Arc::new(routes.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            counters: Arc::default(),
        }
    }

    pub fn drains(&self) -> usize {
        self.counters.drains.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.counters.released.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.counters.max_in_flight.load(Ordering::SeqCst)
    }
}

/// Counts a request as in flight until dropped.
pub struct InFlight(Arc<Counters>);

impl InFlight {
    fn enter(counters: &Arc<Counters>) -> Self {
        let now = counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        counters.max_in_flight.fetch_max(now, Ordering::SeqCst);
        InFlight(Arc::clone(counters))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.0.released.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct StubResponse {
    status: u16,
    body: Result<u64, NetError>,
    body_delay: Duration,
    _in_flight: InFlight,
}

impl Fetch for StubFetch {
    type Response = StubResponse;

    async fn fetch(&self, url: &str) -> Result<StubResponse, NetError> {
        self.counters.fetches.fetch_add(1, Ordering::SeqCst);
        let in_flight = InFlight::enter(&self.counters);

        match self.routes.get(url).cloned() {
            Some(Canned::Ok {
                status,
                body_len,
                head_delay,
                body_delay,
            }) => {
                tokio::time::sleep(head_delay).await;
                Ok(StubResponse {
                    status,
                    body: Ok(body_len),
                    body_delay,
                    _in_flight: in_flight,
                })
            }
            Some(Canned::BodyFails {
                status,
                error,
                head_delay,
            }) => {
                tokio::time::sleep(head_delay).await;
                Ok(StubResponse {
                    status,
                    body: Err(error),
                    body_delay: Duration::from_millis(1),
                    _in_flight: in_flight,
                })
            }
            Some(Canned::Transport(error)) => Err(error),
            Some(Canned::Panic) => panic!("stub asked to panic for {url}"),
            None => Err(NetError::NameNotResolved),
        }
    }
}

impl FetchResponse for StubResponse {
    fn status_code(&self) -> u16 {
        self.status
    }

    async fn drain(self) -> Result<u64, NetError> {
        tokio::time::sleep(self.body_delay).await;
        // Counted after the wait so a drain is only recorded once it ran.
        self._in_flight.0.drains.fetch_add(1, Ordering::SeqCst);
        self.body
    }
}
