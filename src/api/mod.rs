//! Shared plumbing for z/OSMF REST API clients.
//!
//! Each API (files, jobs, ...) is rooted at an endpoint below the server URL
//! and sends every call through a [`RequestHandler`], which adds the default
//! z/OSMF headers and checks the response status against the codes the call
//! expects.

mod request;
mod transport;

pub use request::{ApiRequest, ApiResponse, Method};
pub use transport::{full_url, Transport, UreqTransport};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;

use crate::connection::ZosmfConnection;
use crate::error::ZosmfError;

/// Header z/OSMF requires on every request as a CSRF guard.
pub const CSRF_HEADER: &str = "X-CSRF-ZOSMF-HEADER";

/// Builds and executes requests for one API endpoint.
pub struct RequestHandler {
    endpoint: url::Url,
    authorization: String,
    transport: Box<dyn Transport>,
}

impl RequestHandler {
    /// Handler for `endpoint` (for example `/zosmf/restfiles/`) on the server
    /// described by `connection`.
    pub fn new(
        connection: &ZosmfConnection,
        endpoint: &str,
        transport: Box<dyn Transport>,
    ) -> Result<Self, ZosmfError> {
        let raw = format!("{}{}", connection.base_url(), endpoint);
        let endpoint = url::Url::parse(&raw).map_err(|source| ZosmfError::InvalidUrl {
            url: raw.clone(),
            source,
        })?;
        let credentials = format!("{}:{}", connection.user(), connection.password());

        Ok(Self {
            endpoint,
            authorization: format!("Basic {}", STANDARD.encode(credentials)),
            transport,
        })
    }

    /// Root URL of the endpoint, with a trailing slash.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// Starts a request for `segments` below the endpoint. Each segment is
    /// percent-encoded, so dataset names containing `#` or `$` stay intact.
    pub fn request(&self, method: Method, segments: &[&str]) -> ApiRequest {
        let mut url = self.endpoint.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        ApiRequest::new(method, url.to_string())
            .with_header("Authorization", self.authorization.clone())
            .with_header(CSRF_HEADER, "")
            .with_header("Content-Type", "application/json")
    }

    /// Sends `request` and fails unless the status is one of `expected`.
    pub fn perform(&self, request: &ApiRequest, expected: &[u16]) -> Result<ApiResponse, ZosmfError> {
        tracing::debug!(method = request.method.as_str(), url = %request.url, "sending request");
        let response = self.transport.execute(request)?;

        if !expected.contains(&response.status) {
            return Err(ZosmfError::UnexpectedStatus {
                method: request.method.as_str(),
                url: request.url.clone(),
                expected: expected.to_vec(),
                status: response.status,
                body: response.text(),
            });
        }

        Ok(response)
    }

    /// Sends `request`, expecting 200, and decodes the JSON body.
    pub fn perform_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ZosmfError> {
        let response = self.perform(request, &[200])?;
        serde_json::from_slice(&response.body).map_err(|source| ZosmfError::ResponseDecode {
            url: request.url.clone(),
            source,
        })
    }
}
