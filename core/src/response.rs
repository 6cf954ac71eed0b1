//! Typed response envelope.

use crate::http::find_header;

/// A successful response: the raw status and headers plus the decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<T> {
    status: u16,
    headers: Vec<(String, String)>,
    value: T,
}

impl<T> Response<T> {
    pub(crate) fn new(status: u16, headers: Vec<(String, String)>, value: T) -> Self {
        Self {
            status,
            headers,
            value,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Case-insensitive header lookup; returns the first match.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }
}
