//! Developer relay client: host listing and connection negotiation.

use crate::api::{self, ApiClient};
use crate::hosts::{Hosts, HostsResponse};
use crate::stream::{self, RelayStream};
use crate::uri_list::{self, URI_LIST_CONTENT_TYPE};
use crate::{AccessTokenSource, RelayResult};
use reqwest::Method;
use std::sync::Arc;
use tracing::debug;
use url::Url;

/// Hosts belonging to the authenticated user.
const HOSTS_PATH: &str = "1/user/-/developer-relay/hosts.json";

/// Collection under which each host accepts session requests.
const HOST_SESSIONS_PATH: &str = "1/user/-/developer-relay/hosts/";

/// Construction-time settings for a [`DeveloperRelay`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayClientConfig {
    /// Base URL of the control-plane API.
    pub api_url: Url,
    /// Attach a bearer token to every control-plane request.
    pub should_authenticate: bool,
}

impl RelayClientConfig {
    /// Authenticated access to `api_url`.
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            should_authenticate: true,
        }
    }

    /// Take the API URL from the loaded application config.
    pub fn from_config(config: &relay_config::Config) -> RelayResult<Self> {
        Ok(Self::new(Url::parse(&config.api_url)?))
    }

    pub fn with_authentication(mut self, should_authenticate: bool) -> Self {
        self.should_authenticate = should_authenticate;
        self
    }
}

/// Client for the developer relay.
///
/// Settings are fixed at construction; talking to a second API, or to the
/// same API without authentication, takes a second instance. Cloning is
/// cheap and clones share the HTTP connection pool.
#[derive(Clone, Debug)]
pub struct DeveloperRelay {
    api: ApiClient,
}

impl DeveloperRelay {
    /// Create a new relay client.
    pub fn new(config: RelayClientConfig, tokens: impl AccessTokenSource + 'static) -> Self {
        Self::with_token_source(config, Arc::new(tokens))
    }

    /// Create a relay client sharing an existing token source.
    pub fn with_token_source(
        config: RelayClientConfig,
        tokens: Arc<dyn AccessTokenSource>,
    ) -> Self {
        Self {
            api: ApiClient::new(config.api_url, config.should_authenticate, tokens),
        }
    }

    pub fn api_url(&self) -> &Url {
        self.api.base_url()
    }

    pub fn should_authenticate(&self) -> bool {
        self.api.should_authenticate()
    }

    /// List the user's hosts, grouped by role.
    ///
    /// The payload is validated strictly; any deviation fails the whole call
    /// with `RelayError::SchemaValidation`.
    pub async fn hosts(&self) -> RelayResult<Hosts> {
        let url = self.api.endpoint(HOSTS_PATH)?;
        let response = self.api.fetch(Method::GET, url, "application/json").await?;
        let response = api::assert_ok(response).await?;
        let listing: HostsResponse = api::decode_json(response).await?;

        debug!(count = listing.hosts.len(), "Fetched relay hosts");
        Ok(Hosts::classify(&listing.hosts))
    }

    /// Ask the relay for a connection URL to `host_id`.
    ///
    /// The response must be a 2xx `text/uri-list`; the first non-comment
    /// line is returned and any further candidates are ignored.
    pub async fn connection_url(&self, host_id: &str) -> RelayResult<String> {
        let url = self.api.resource_endpoint(HOST_SESSIONS_PATH, host_id)?;
        let response = self
            .api
            .fetch(Method::POST, url, URI_LIST_CONTENT_TYPE)
            .await?;
        let response = api::assert_ok(response).await?;
        let response = api::assert_content_type(URI_LIST_CONTENT_TYPE, response)?;

        let body = response.text().await?;
        let candidate = uri_list::first_candidate(&body)?;

        debug!(host_id, "Negotiated relay connection url");
        Ok(candidate.to_string())
    }

    /// Negotiate a connection URL for `host_id` and open a stream to it.
    ///
    /// Negotiation always completes before the upgrade starts. Either an open
    /// stream is returned or the first failure is; nothing is retried.
    pub async fn connect(&self, host_id: &str) -> RelayResult<RelayStream> {
        let url = self.connection_url(host_id).await?;
        let stream = stream::open(&url).await?;

        debug!(host_id, "Relay stream open");
        Ok(stream)
    }
}
