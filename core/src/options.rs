//! Per-call request options.

use std::time::Duration;

/// Options that adjust a single call before it reaches the pipeline.
///
/// Headers set here are sent first, in insertion order, followed by the
/// operation's own headers. A caller header whose name matches one the
/// operation defines (for example `accept`, compared case-insensitively) is
/// dropped, so the operation's value always wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Upper bound for the whole round trip, enforced by the pipeline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}
