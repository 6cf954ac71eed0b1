//! Transport pipeline abstraction and the default ureq-backed implementation.
//!
//! # Design
//! The accessor never talks to the network itself: it builds an
//! `HttpRequest` and hands it to whatever `HttpPipeline` the client was
//! constructed with. Pipelines must return non-2xx responses as data; only
//! failures that prevent a response (DNS, refused connection, TLS, timeout)
//! become `TransportError`.

use std::sync::Arc;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one HTTP round trip, blocking until it completes.
pub trait HttpPipeline: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<P: HttpPipeline + ?Sized> HttpPipeline for Arc<P> {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

impl<P: HttpPipeline + ?Sized> HttpPipeline for &P {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

/// Blocking pipeline on top of a `ureq::Agent`.
///
/// Every request is sent with `http_status_as_error(false)`, whatever the
/// agent's own config, so 4xx/5xx responses come back as data and the
/// accessor decides what they mean.
#[derive(Clone)]
pub struct UreqPipeline {
    agent: ureq::Agent,
}

impl UreqPipeline {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    /// Wrap an existing agent, keeping its pooling, proxy and TLS settings.
    pub fn with_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpPipeline for UreqPipeline {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match request.method {
            HttpMethod::Get => prepare(self.agent.get(request.url.as_str()), &request).call(),
            HttpMethod::Patch => {
                let body = request.body.as_deref().unwrap_or(&[]);
                prepare(self.agent.patch(request.url.as_str()), &request).send(body)
            }
        };

        let mut response = result.map_err(|e| {
            TransportError::with_source(format!("{} {}", request.method, request.url), e)
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.body_mut().read_to_vec().map_err(|e| {
            TransportError::with_source(
                format!("reading body of {} {}", request.method, request.url),
                e,
            )
        })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn prepare<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &HttpRequest,
) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    let mut config = builder.config().http_status_as_error(false);
    if let Some(timeout) = request.timeout {
        config = config.timeout_global(Some(timeout));
    }
    config.build()
}
