//! Blocking client for the pet store owner insurance resource.
//!
//! # Overview
//! `PetStoreClient` owns an endpoint and a shared `HttpPipeline`. Its
//! `owner_insurances()` accessor exposes `get` and `update` on
//! `/owners/{ownerId}/insurance`, turning each call into one request, one
//! pipeline round trip, and one typed outcome.
//!
//! # Design
//! - The pipeline is a trait, so tests and hosts can swap the transport;
//!   `UreqPipeline` is the default.
//! - Every operation is also available as separate `build_*` / `parse_*`
//!   halves for callers that want to run the round trip themselves.
//! - Success is decided by exact membership in a per-operation expected
//!   status set; anything else is `ApiError::UnexpectedStatus`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod options;
pub mod owner_insurances;
pub mod pipeline;
pub mod response;
pub mod types;

pub use client::PetStoreClient;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use options::RequestOptions;
pub use owner_insurances::OwnerInsurances;
pub use pipeline::{HttpPipeline, UreqPipeline};
pub use response::Response;
pub use types::{Insurance, InsuranceUpdate, PetStoreError};
