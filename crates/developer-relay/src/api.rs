//! Shared control-plane request layer.
//!
//! [`ApiClient::fetch`] resolves a path against the API base URL and attaches
//! credentials. The response checks (`assert_ok`, `assert_content_type`,
//! `decode_json`) are free functions so each endpoint can chain exactly the
//! checks it needs.

use crate::{AccessTokenSource, RelayError, RelayResult};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use url::Url;

/// Authenticated HTTP access to the control-plane API.
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: Url,
    should_authenticate: bool,
    tokens: Arc<dyn AccessTokenSource>,
}

impl ApiClient {
    /// Create a client rooted at `base_url`.
    ///
    /// A base URL without a trailing slash is treated as a directory, so
    /// `https://api.example.com/v` and `https://api.example.com/v/` resolve
    /// endpoints identically.
    pub fn new(
        base_url: Url,
        should_authenticate: bool,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: as_directory(base_url),
            should_authenticate,
            tokens,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn should_authenticate(&self) -> bool {
        self.should_authenticate
    }

    /// Resolve a relative API path against the base URL.
    pub fn endpoint(&self, path: &str) -> RelayResult<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Resolve `collection_path` and append `id` as one percent-encoded
    /// path segment.
    pub fn resource_endpoint(&self, collection_path: &str, id: &str) -> RelayResult<Url> {
        let mut url = self.endpoint(collection_path)?;
        url.path_segments_mut()
            .map_err(|_| RelayError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    /// Send a request, adding a bearer token when authentication is enabled.
    ///
    /// Status codes are not inspected here; chain [`assert_ok`].
    pub async fn fetch(&self, method: Method, url: Url, accept: &str) -> RelayResult<Response> {
        let mut request = self
            .http_client
            .request(method.clone(), url.clone())
            .header(ACCEPT, accept);

        if self.should_authenticate {
            request = request.bearer_auth(self.tokens.access_token()?);
        }

        tracing::debug!(method = %method, path = url.path(), "Sending relay API request");

        Ok(request.send().await?)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("should_authenticate", &self.should_authenticate)
            .finish()
    }
}

fn as_directory(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn summarize_response_body(body: &str) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("len={},digest={:016x}", body.len(), hasher.finish())
}

/// Fail with [`RelayError::Http`] unless the status is 2xx.
pub async fn assert_ok(response: Response) -> RelayResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let reason = status.canonical_reason().unwrap_or("Unknown status");
    Err(RelayError::Http {
        status: status.as_u16(),
        message: format!("{} ({})", reason, summarize_response_body(&body)),
    })
}

/// Fail with [`RelayError::ContentType`] unless the declared media type is
/// `expected`. Parameters such as `charset` are ignored and the comparison
/// is case-insensitive. The body is left unread.
pub fn assert_content_type(expected: &'static str, response: Response) -> RelayResult<Response> {
    let actual = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    match actual.as_deref().map(media_type) {
        Some(media) if media.eq_ignore_ascii_case(expected) => Ok(response),
        _ => Err(RelayError::ContentType { expected, actual }),
    }
}

/// Strip parameters from a Content-Type value.
fn media_type(content_type: &str) -> &str {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
}

/// Read the body and decode it strictly into `T`.
///
/// Any shape mismatch, including a body that is not JSON at all, is a
/// [`RelayError::SchemaValidation`].
pub async fn decode_json<T: DeserializeOwned>(response: Response) -> RelayResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(RelayError::SchemaValidation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoToken, StaticToken};

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).unwrap(), false, Arc::new(NoToken))
    }

    #[test]
    fn test_endpoint_joins_relative_path() {
        let api = client("https://api.example.com/");
        let url = api.endpoint("1/user/-/developer-relay/hosts.json").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/1/user/-/developer-relay/hosts.json"
        );
    }

    #[test]
    fn test_base_without_trailing_slash_keeps_prefix() {
        let api = client("http://localhost:8080/proxy");
        assert_eq!(api.base_url().as_str(), "http://localhost:8080/proxy/");
        let url = api.endpoint("1/user/-/developer-relay/hosts.json").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/proxy/1/user/-/developer-relay/hosts.json"
        );
    }

    #[test]
    fn test_resource_endpoint_encodes_id() {
        let api = client("https://api.example.com/");
        let url = api
            .resource_endpoint("1/user/-/developer-relay/hosts/", "host 1/../x")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/1/user/-/developer-relay/hosts/host%201%2F..%2Fx"
        );
    }

    #[test]
    fn test_resource_endpoint_plain_id() {
        let api = client("https://api.example.com/");
        let url = api
            .resource_endpoint("1/user/-/developer-relay/hosts/", "abc-123")
            .unwrap();
        assert_eq!(
            url.path(),
            "/1/user/-/developer-relay/hosts/abc-123"
        );
    }

    #[test]
    fn test_media_type_strips_parameters() {
        assert_eq!(media_type("text/uri-list; charset=utf-8"), "text/uri-list");
        assert_eq!(media_type("  text/uri-list  "), "text/uri-list");
        assert_eq!(media_type(""), "");
    }

    #[test]
    fn test_summarize_response_body_hides_content() {
        let summary = summarize_response_body("secret token value");
        assert!(summary.starts_with("len=18,digest="));
        assert!(!summary.contains("secret"));
    }

    #[test]
    fn test_debug_omits_token_source() {
        let api = ApiClient::new(
            Url::parse("https://api.example.com/").unwrap(),
            true,
            Arc::new(StaticToken::new("hidden")),
        );
        let rendered = format!("{:?}", api);
        assert!(rendered.contains("should_authenticate: true"));
        assert!(!rendered.contains("hidden"));
    }
}
