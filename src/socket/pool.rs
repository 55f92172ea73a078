use bytes::Bytes;
use dashmap::DashMap;
use http_body_util::Empty;
use hyper::client::conn::http1;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use url::Url;

/// Request half of an HTTP/1.1 connection. The connection itself is driven
/// by a spawned task and lives as long as this sender or a body reading
/// from it.
pub type RequestSender = http1::SendRequest<Empty<Bytes>>;

/// Identifies a connection group (scheme, host, port).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupId {
    scheme: String,
    host: String,
    port: u16,
}

impl GroupId {
    pub fn from_url(url: &Url) -> Option<Self> {
        Some(GroupId {
            scheme: url.scheme().to_string(),
            host: url.host_str()?.to_string(),
            port: url.port_or_known_default()?,
        })
    }
}

/// Keeps idle keep-alive connections per group so that concurrent
/// measurements against the same origin can reuse them.
///
/// Clones share the same idle sets.
#[derive(Clone)]
pub struct ClientSocketPool {
    max_idle_per_group: usize,
    groups: Arc<DashMap<GroupId, VecDeque<RequestSender>>>,
    reused: Arc<AtomicUsize>,
}

impl std::fmt::Debug for ClientSocketPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSocketPool")
            .field("max_idle_per_group", &self.max_idle_per_group)
            .field("idle", &self.idle_socket_count())
            .field("reused", &self.reused_count())
            .finish()
    }
}

impl Default for ClientSocketPool {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_IDLE_PER_GROUP)
    }
}

impl ClientSocketPool {
    /// Chromium's per-host socket limit.
    pub const DEFAULT_MAX_IDLE_PER_GROUP: usize = 6;

    pub fn new(max_idle_per_group: usize) -> Self {
        Self {
            max_idle_per_group,
            groups: Arc::new(DashMap::new()),
            reused: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Take the most recently released connection for `group`, skipping
    /// connections the peer already closed.
    pub fn checkout(&self, group: &GroupId) -> Option<RequestSender> {
        let mut idle = self.groups.get_mut(group)?;
        while let Some(sender) = idle.pop_back() {
            if !sender.is_closed() {
                return Some(sender);
            }
        }
        None
    }

    /// Return a connection whose last response body was fully read.
    pub fn release(&self, group: GroupId, sender: RequestSender) {
        if sender.is_closed() || self.max_idle_per_group == 0 {
            return;
        }

        let mut idle = self.groups.entry(group).or_default();
        if idle.len() >= self.max_idle_per_group {
            // Oldest goes first
            idle.pop_front();
        }
        idle.push_back(sender);
    }

    /// Get total idle socket count across all groups.
    pub fn idle_socket_count(&self) -> usize {
        self.groups.iter().map(|g| g.len()).sum()
    }

    /// Count a request that was answered over a pooled connection.
    pub fn record_reuse(&self) {
        self.reused.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of requests answered over a pooled connection.
    pub fn reused_count(&self) -> usize {
        self.reused.load(Ordering::Relaxed)
    }
}
