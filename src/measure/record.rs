use crate::base::neterror::NetError;
use std::time::Duration;

/// Outcome of measuring one URL.
///
/// `status`, `time_to_full_read` and `body_bytes` are only meaningful when
/// `error` is `None`. A body-read failure keeps `time_to_headers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub url: String,
    pub status: u16,
    pub time_to_headers: Duration,
    pub time_to_full_read: Duration,
    pub body_bytes: u64,
    pub error: Option<NetError>,
}

impl Record {
    /// Empty record for `url`, before anything was measured.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: 0,
            time_to_headers: Duration::ZERO,
            time_to_full_read: Duration::ZERO,
            body_bytes: 0,
            error: None,
        }
    }

    /// Mark the record failed. Only `time_to_headers` survives.
    pub fn failed(self, error: NetError) -> Self {
        Self {
            status: 0,
            time_to_full_read: Duration::ZERO,
            body_bytes: 0,
            error: Some(error),
            ..self
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
