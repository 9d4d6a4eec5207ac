//! Request execution.

use ureq::tls::TlsConfig;
use ureq::{Agent, RequestBuilder};

use crate::error::ZosmfError;

use super::request::{ApiRequest, ApiResponse, Method};

/// Executes shaped requests. Implementations perform exactly one round trip
/// per call and do not retry.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ZosmfError>;
}

/// Blocking transport backed by a `ureq` agent.
///
/// Non-2xx statuses are returned as responses, not errors, so the caller can
/// compare them against the codes it expects.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(ssl_verification: bool) -> Self {
        let tls_config = TlsConfig::builder()
            .disable_verification(!ssl_verification)
            .build();
        let config = Agent::config_builder()
            .tls_config(tls_config)
            .http_status_as_error(false)
            .build();

        Self {
            agent: config.into(),
        }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ZosmfError> {
        let url = full_url(request)?;
        let http_error = |source: ureq::Error| ZosmfError::Http {
            method: request.method.as_str(),
            url: url.clone(),
            source,
        };

        let result = match request.method {
            Method::Get => with_headers(self.agent.get(url.as_str()), request).call(),
            Method::Delete => with_headers(self.agent.delete(url.as_str()), request).call(),
            Method::Put => {
                let builder = with_headers(self.agent.put(url.as_str()), request);
                match request.body.as_deref() {
                    Some(body) => builder.send(body),
                    None => builder.send_empty(),
                }
            }
            Method::Post => {
                let builder = with_headers(self.agent.post(url.as_str()), request);
                match request.body.as_deref() {
                    Some(body) => builder.send(body),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(http_error)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(http_error)?;

        tracing::debug!(method = request.method.as_str(), %url, status, bytes = body.len(), "request completed");
        Ok(ApiResponse {
            status,
            content_type,
            body,
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, request: &ApiRequest) -> RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Appends the request's query pairs to its URL.
pub fn full_url(request: &ApiRequest) -> Result<String, ZosmfError> {
    let mut url = url::Url::parse(&request.url).map_err(|source| ZosmfError::InvalidUrl {
        url: request.url.clone(),
        source,
    })?;

    if !request.query.is_empty() {
        let mut query = url.query_pairs_mut();
        for (key, value) in &request.query {
            query.append_pair(key, value);
        }
    }

    Ok(url.to_string())
}
