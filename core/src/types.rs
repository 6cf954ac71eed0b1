//! Wire models for the owner insurance resource.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use serde::{Deserialize, Serialize};

/// The insurance singleton attached to an owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Insurance {
    pub provider: String,
    pub premium: i32,
    pub deductible: i32,
}

/// Partial update for an owner's insurance. Only the fields present in the
/// JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsuranceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deductible: Option<i32>,
}

/// Error body the service returns alongside a non-success status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PetStoreError {
    pub code: i32,
    pub message: String,
}
