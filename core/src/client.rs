//! Service client that owns the endpoint and the transport pipeline.
//!
//! # Design
//! `PetStoreClient` is immutable after construction. Resource accessors
//! borrow the endpoint and pipeline from it, so cloning the client or sharing
//! it across threads never duplicates transport state.

use std::env::VarError;
use std::fmt;
use std::sync::Arc;

use crate::error::ApiError;
use crate::owner_insurances::OwnerInsurances;
use crate::pipeline::{HttpPipeline, UreqPipeline};

/// Environment variable read by `PetStoreClient::from_env`.
pub const ENDPOINT_ENV: &str = "PETSTORE_ENDPOINT";

#[derive(Clone)]
pub struct PetStoreClient {
    endpoint: String,
    pipeline: Arc<dyn HttpPipeline>,
}

impl PetStoreClient {
    pub fn new(endpoint: &str, pipeline: impl HttpPipeline + 'static) -> Self {
        Self::with_shared_pipeline(endpoint, Arc::new(pipeline))
    }

    pub fn with_shared_pipeline(endpoint: &str, pipeline: Arc<dyn HttpPipeline>) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            pipeline,
        }
    }

    /// Build a client for `$PETSTORE_ENDPOINT` over the default ureq pipeline.
    pub fn from_env() -> Result<Self, ApiError> {
        let endpoint = endpoint_from(std::env::var(ENDPOINT_ENV))?;
        Ok(Self::new(&endpoint, UreqPipeline::default()))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn owner_insurances(&self) -> OwnerInsurances<'_> {
        OwnerInsurances::new(&self.endpoint, self.pipeline.as_ref())
    }
}

impl fmt::Debug for PetStoreClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PetStoreClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

fn endpoint_from(value: Result<String, VarError>) -> Result<String, ApiError> {
    let value = match value {
        Ok(v) => v,
        Err(VarError::NotPresent) => return Err(ApiError::Config(format!("{ENDPOINT_ENV} is not set"))),
        Err(VarError::NotUnicode(_)) => {
            return Err(ApiError::Config(format!("{ENDPOINT_ENV} is not valid unicode")))
        }
    };
    let value = value.trim();
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ApiError::Config(format!(
            "{ENDPOINT_ENV} must be an http(s) URL, got {value:?}"
        )));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::RequestOptions;
    use crate::pipeline::testing::StubPipeline;

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PetStoreClient::new("http://localhost:3000/", StubPipeline::responding(200, "{}"));
        assert_eq!(client.endpoint(), "http://localhost:3000");
        let req = client.owner_insurances().build_get(1, &RequestOptions::default());
        assert_eq!(req.url, "http://localhost:3000/owners/1/insurance");
    }

    #[test]
    fn clones_share_one_pipeline() {
        let pipeline = Arc::new(StubPipeline::responding(
            200,
            r#"{"provider":"Acme","premium":1,"deductible":2}"#,
        ));
        let client = PetStoreClient::with_shared_pipeline("http://localhost:3000", pipeline.clone());
        let other = client.clone();

        client.owner_insurances().get(1).unwrap();
        other.owner_insurances().get(2).unwrap();

        let urls: Vec<String> = pipeline.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:3000/owners/1/insurance",
                "http://localhost:3000/owners/2/insurance",
            ]
        );
    }

    #[test]
    fn concurrent_calls_on_one_accessor() {
        let pipeline = StubPipeline::responding(200, r#"{"provider":"Acme","premium":1,"deductible":2}"#);
        let client = PetStoreClient::new("http://localhost:3000", pipeline);
        let insurances = client.owner_insurances();

        std::thread::scope(|s| {
            for id in 0..4 {
                s.spawn(move || insurances.get(id).unwrap());
            }
        });
    }

    #[test]
    fn from_env_reads_endpoint_variable() {
        std::env::set_var(ENDPOINT_ENV, "http://localhost:4000/");
        let client = PetStoreClient::from_env().unwrap();
        assert_eq!(client.endpoint(), "http://localhost:4000");

        std::env::remove_var(ENDPOINT_ENV);
        let err = PetStoreClient::from_env().unwrap_err();
        assert!(matches!(err, ApiError::Config(ref msg) if msg.contains(ENDPOINT_ENV)));
    }

    #[test]
    fn endpoint_from_env_value() {
        assert_eq!(
            endpoint_from(Ok(" https://petstore.example ".to_string())).unwrap(),
            "https://petstore.example"
        );
        assert!(matches!(endpoint_from(Err(VarError::NotPresent)), Err(ApiError::Config(_))));
        assert!(matches!(
            endpoint_from(Ok("petstore.example".to_string())),
            Err(ApiError::Config(_))
        ));
    }
}
