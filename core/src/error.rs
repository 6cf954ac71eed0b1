//! Error types for the pet store client.
//!
//! # Design
//! Transport failures keep their own variant so callers never confuse "the
//! request never completed" with "the service answered with an unexpected
//! status." An unexpected status always carries the raw status and body; the
//! parsed `PetStoreError` is attached only when the body actually parses.

use std::error::Error as StdError;

use crate::types::PetStoreError;

/// Failure raised by an `HttpPipeline` before a response was obtained.
#[derive(Debug, thiserror::Error)]
#[error("transport failure: {message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by resource accessor operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The pipeline could not complete the round trip.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The status code was outside the operation's expected set.
    #[error("unexpected status {status}{}", describe_service_error(.error, .body))]
    UnexpectedStatus {
        status: u16,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
        error: Option<PetStoreError>,
    },

    /// The status matched but the body did not decode into the expected type.
    #[error("response body did not match the expected type")]
    Deserialization(#[source] serde_json::Error),

    /// A typed request payload could not be encoded to JSON.
    #[error("request payload could not be encoded as JSON")]
    Serialization(#[source] serde_json::Error),

    /// A header name or value cannot be put on the wire; nothing was sent.
    #[error("invalid header {name:?}: {reason}")]
    InvalidHeader { name: String, reason: String },

    /// Client configuration is missing or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status for `UnexpectedStatus`, `None` for every other variant.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Parsed service error body, if the service sent one that decoded.
    pub fn service_error(&self) -> Option<&PetStoreError> {
        match self {
            ApiError::UnexpectedStatus { error, .. } => error.as_ref(),
            _ => None,
        }
    }
}

fn describe_service_error(error: &Option<PetStoreError>, body: &[u8]) -> String {
    match error {
        Some(e) => format!(": {} (code {})", e.message, e.code),
        None if body.is_empty() => String::new(),
        None => format!(": {}", String::from_utf8_lossy(body)),
    }
}
