//! Accessor for the insurance singleton nested under an owner.
//!
//! # Design
//! Each operation is split into a `build_*` method that produces an
//! `HttpRequest`, a `parse_*` method that consumes an `HttpResponse`, and a
//! `*_with_response` method that runs the two around one pipeline round trip.
//! The build/parse halves touch no I/O, so the wire contract can be checked
//! without a server.

use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::options::RequestOptions;
use crate::pipeline::HttpPipeline;
use crate::response::Response;
use crate::types::{Insurance, InsuranceUpdate, PetStoreError};

/// Path template shared by both operations, relative to the endpoint.
pub const OWNER_INSURANCE_PATH: &str = "/owners/{ownerId}/insurance";

/// Statuses `get` treats as success.
pub const GET_EXPECTED_STATUS: &[u16] = &[200];

/// Statuses `update` treats as success.
pub const UPDATE_EXPECTED_STATUS: &[u16] = &[200];

const APPLICATION_JSON: &str = "application/json";

/// Operations on `/owners/{ownerId}/insurance`.
///
/// Borrows the endpoint and pipeline from the `PetStoreClient` that created
/// it and holds no other state, so it can be shared across threads freely.
#[derive(Clone, Copy)]
pub struct OwnerInsurances<'a> {
    endpoint: &'a str,
    pipeline: &'a dyn HttpPipeline,
}

impl<'a> OwnerInsurances<'a> {
    pub(crate) fn new(endpoint: &'a str, pipeline: &'a dyn HttpPipeline) -> Self {
        Self { endpoint, pipeline }
    }

    pub fn build_get(&self, owner_id: i64, options: &RequestOptions) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.url(owner_id),
            headers: merge_headers(options, &[("accept", APPLICATION_JSON)]),
            body: None,
            timeout: options.timeout(),
        }
    }

    /// `payload` is sent as-is; it must already be a JSON merge document.
    pub fn build_update(&self, owner_id: i64, payload: &[u8], options: &RequestOptions) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Patch,
            url: self.url(owner_id),
            headers: merge_headers(
                options,
                &[("content-type", APPLICATION_JSON), ("accept", APPLICATION_JSON)],
            ),
            body: Some(payload.to_vec()),
            timeout: options.timeout(),
        }
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Response<Insurance>, ApiError> {
        parse_response(response, GET_EXPECTED_STATUS)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Response<Insurance>, ApiError> {
        parse_response(response, UPDATE_EXPECTED_STATUS)
    }

    /// Fetch the owner's insurance together with the raw status and headers.
    #[instrument(level = "debug", skip(self, options))]
    pub fn get_with_response(
        &self,
        owner_id: i64,
        options: &RequestOptions,
    ) -> Result<Response<Insurance>, ApiError> {
        let request = self.build_get(owner_id, options);
        let response = self.dispatch(request)?;
        self.parse_get(response)
    }

    /// Apply a pre-serialized partial update and return the resulting insurance.
    #[instrument(level = "debug", skip(self, payload, options), fields(payload_len = payload.len()))]
    pub fn update_with_response(
        &self,
        owner_id: i64,
        payload: &[u8],
        options: &RequestOptions,
    ) -> Result<Response<Insurance>, ApiError> {
        let request = self.build_update(owner_id, payload, options);
        let response = self.dispatch(request)?;
        self.parse_update(response)
    }

    pub fn get(&self, owner_id: i64) -> Result<Insurance, ApiError> {
        self.get_with_response(owner_id, &RequestOptions::default())
            .map(Response::into_value)
    }

    pub fn update(&self, owner_id: i64, update: &InsuranceUpdate) -> Result<Insurance, ApiError> {
        let payload = serde_json::to_vec(update).map_err(ApiError::Serialization)?;
        self.update_with_response(owner_id, &payload, &RequestOptions::default())
            .map(Response::into_value)
    }

    fn url(&self, owner_id: i64) -> String {
        let path = OWNER_INSURANCE_PATH.replace("{ownerId}", &owner_id.to_string());
        format!("{}{path}", self.endpoint)
    }

    fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        validate_headers(&request.headers)?;
        debug!(method = %request.method, url = %request.url, "dispatching request");
        let response = self.pipeline.send(request)?;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

/// Caller headers first, minus any the operation defines itself, then the
/// operation's headers.
fn merge_headers(options: &RequestOptions, fixed: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut headers = Vec::with_capacity(options.headers().len() + fixed.len());
    for (name, value) in options.headers() {
        if fixed.iter().any(|(f, _)| f.eq_ignore_ascii_case(name)) {
            debug!(header = %name, "caller header replaced by operation header");
            continue;
        }
        headers.push((name.clone(), value.clone()));
    }
    headers.extend(fixed.iter().map(|(n, v)| (n.to_string(), v.to_string())));
    headers
}

/// Reject headers the transport could not encode, before anything is sent.
fn validate_headers(headers: &[(String, String)]) -> Result<(), ApiError> {
    for (name, value) in headers {
        if let Err(e) = ::http::HeaderName::from_bytes(name.as_bytes()) {
            return Err(ApiError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            });
        }
        if let Err(e) = ::http::HeaderValue::from_bytes(value.as_bytes()) {
            return Err(ApiError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            });
        }
    }
    Ok(())
}

fn parse_response<T: DeserializeOwned>(
    response: HttpResponse,
    expected: &[u16],
) -> Result<Response<T>, ApiError> {
    let response = check_status(response, expected)?;
    let value = serde_json::from_slice(&response.body).map_err(ApiError::Deserialization)?;
    Ok(Response::new(response.status, response.headers, value))
}

/// Pass the response through if its status is in `expected`, otherwise turn
/// it into `UnexpectedStatus`, keeping the raw body either way.
fn check_status(response: HttpResponse, expected: &[u16]) -> Result<HttpResponse, ApiError> {
    if expected.contains(&response.status) {
        return Ok(response);
    }
    let error = serde_json::from_slice::<PetStoreError>(&response.body).ok();
    warn!(
        status = response.status,
        parsed = error.is_some(),
        "service returned unexpected status"
    );
    Err(ApiError::UnexpectedStatus {
        status: response.status,
        headers: response.headers,
        body: response.body,
        error,
    })
}
