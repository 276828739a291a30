//! Request dispatch.
//!
//! # Design
//! `ApiManager` owns the transport and nothing else. Credentials arrive as a
//! parameter on every call, so the dispatcher never reaches back into the
//! client that owns it. Each call issues exactly one request: no retries, no
//! backoff, no timeout beyond the transport's own.

use tracing::{debug, warn};

use crate::config::CredentialProvider;
use crate::error::ApiError;
use crate::http::{HttpResponse, Transport};
use crate::options::{CallOptions, Route};
use crate::request::ApiRequest;
use crate::response::RawResponse;

#[derive(Debug, Clone)]
pub struct ApiManager<T> {
    transport: T,
}

impl<T: Transport> ApiManager<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one call and normalize its outcome.
    pub async fn request(
        &self,
        route: Route,
        end_point: &str,
        options: CallOptions,
        credentials: &(dyn CredentialProvider + Sync),
    ) -> Result<RawResponse, ApiError> {
        let request = ApiRequest::new(route, end_point, options);
        let path = request.path();
        debug!(path = %path, url = %request.url, auth = request.options.auth, "dispatching request");

        let http = request.into_http(credentials)?;
        let response = self.transport.execute(http).await.map_err(|e| {
            warn!(path = %path, error = %e, "transport failure");
            ApiError::Backend(e.to_string())
        })?;

        parse_response(&path, response)
    }
}

fn parse_response(path: &str, response: HttpResponse) -> Result<RawResponse, ApiError> {
    if !response.is_success() {
        warn!(path = %path, status = response.status, "backend returned an error status");
        return Err(ApiError::Backend(format!(
            "HTTP {}: {}",
            response.status, response.body
        )));
    }
    let raw = RawResponse::from_body(&response.body)?;
    debug!(path = %path, empty = raw.is_empty(), "request completed");
    Ok(raw)
}
