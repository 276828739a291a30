//! Per-call request composition.

use serde_json::Value;

use crate::config::CredentialProvider;
use crate::error::ApiError;
use crate::http::{HttpRequest, APPLICATION_JSON, AUTHORIZATION, CONTENT_TYPE};
use crate::options::{CallOptions, Route};

/// Compose `{api}[/v{version}]/{route}/{end_point}`.
pub fn build_url(route: Route, end_point: &str, options: &CallOptions) -> String {
    let root = if options.versioned {
        format!("{}/v{}", options.http.api, options.http.version)
    } else {
        options.http.api.clone()
    };
    format!("{root}/{route}/{end_point}")
}

/// One call to the backend, created and consumed by a single dispatch.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub route: Route,
    pub end_point: String,
    pub url: String,
    pub options: CallOptions,
}

impl ApiRequest {
    pub fn new(route: Route, end_point: impl Into<String>, options: CallOptions) -> Self {
        let end_point = end_point.into();
        let url = build_url(route, &end_point, &options);
        Self {
            route,
            end_point,
            url,
            options,
        }
    }

    /// `route/end_point`, used in logs and error messages.
    pub fn path(&self) -> String {
        format!("{}/{}", self.route, self.end_point)
    }

    /// Turn this request into wire data.
    ///
    /// Fails with [`ApiError::Configuration`] when `auth` is set and the
    /// provider has no key; nothing has been sent at that point.
    pub fn into_http(self, credentials: &dyn CredentialProvider) -> Result<HttpRequest, ApiError> {
        let mut headers = vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())];
        if self.options.auth {
            let key = credentials.api_key().ok_or_else(ApiError::missing_credential)?;
            headers.push((AUTHORIZATION.to_string(), format!("Bearer {key}")));
        }

        let data = self
            .options
            .data
            .unwrap_or_else(|| Value::Object(Default::default()));
        let body = serde_json::to_string(&data).map_err(|e| ApiError::Serialization(e.to_string()))?;

        Ok(HttpRequest {
            url: self.url,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::options::HttpOptions;

    fn options(versioned: bool) -> CallOptions {
        CallOptions {
            versioned,
            http: HttpOptions {
                version: 3,
                api: "http://localhost:5346/api".to_string(),
            },
            ..CallOptions::default()
        }
    }

    fn no_key() -> Option<String> {
        None
    }

    fn key() -> Option<String> {
        Some("abc123".to_string())
    }

    #[test]
    fn versioned_url_includes_version_segment() {
        assert_eq!(
            build_url(Route::Item, "embed", &options(true)),
            "http://localhost:5346/api/v3/item/embed"
        );
    }

    #[test]
    fn unversioned_url_skips_version_segment() {
        assert_eq!(
            build_url(Route::BossFight, "gear", &options(false)),
            "http://localhost:5346/api/bossfight/gear"
        );
    }

    #[test]
    fn every_route_composes_the_same_way() {
        for route in Route::ALL {
            let url = build_url(route, "x", &options(true));
            assert_eq!(url, format!("http://localhost:5346/api/v3/{}/x", route.as_str()));
        }
    }

    #[test]
    fn request_records_url_and_path() {
        let request = ApiRequest::new(Route::Trivia, "q", options(true));
        assert_eq!(request.url, "http://localhost:5346/api/v3/trivia/q");
        assert_eq!(request.path(), "trivia/q");
    }

    #[test]
    fn authenticated_request_carries_bearer_header() {
        let request = ApiRequest::new(Route::Item, "embed", options(true).with_data(json!({ "id": 501 })));
        let http = request.into_http(&key).unwrap();
        assert_eq!(
            http.headers,
            vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("authorization".to_string(), "Bearer abc123".to_string()),
            ]
        );
        let body: Value = serde_json::from_str(&http.body).unwrap();
        assert_eq!(body, json!({ "id": 501 }));
    }

    #[test]
    fn authenticated_request_without_key_fails() {
        let request = ApiRequest::new(Route::Item, "embed", options(true));
        let err = request.into_http(&no_key).unwrap_err();
        assert!(matches!(err, ApiError::Configuration(_)));
    }

    #[test]
    fn unauthenticated_request_skips_credentials() {
        let request = ApiRequest::new(Route::Util, "validate", options(true).with_auth(false));
        let http = request.into_http(&no_key).unwrap();
        assert_eq!(http.header(AUTHORIZATION), None);
        assert_eq!(http.header(CONTENT_TYPE), Some(APPLICATION_JSON));
    }

    #[test]
    fn missing_data_is_sent_as_empty_object() {
        let request = ApiRequest::new(Route::Disguise, "mob", options(true));
        let http = request.into_http(&key).unwrap();
        assert_eq!(http.body, "{}");
    }
}
