//! CLI command implementations.

mod connect;
mod hosts;

pub use connect::{connect, connection_url};
pub use hosts::hosts_list;

use anyhow::{Context, Result};
use developer_relay::{DeveloperRelay, NoToken, RelayClientConfig, StaticToken};
use relay_config::{Config, Paths};
use url::Url;

/// Client settings collected from global flags.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub no_auth: bool,
}

/// Load the config file once and build a relay client from it.
pub fn build_relay(options: &ClientOptions) -> Result<DeveloperRelay> {
    let config = match Paths::new() {
        Ok(paths) => Config::load(&paths).context("failed to load config")?,
        Err(_) => Config::new(),
    };
    relay_from_config(&config, options)
}

/// Build a relay client from an already-loaded config plus flag overrides.
pub fn relay_from_config(config: &Config, options: &ClientOptions) -> Result<DeveloperRelay> {
    let mut client_config =
        RelayClientConfig::from_config(config).context("invalid api_url in config")?;

    if let Some(api_url) = &options.api_url {
        client_config.api_url =
            Url::parse(api_url).with_context(|| format!("invalid --api-url: {}", api_url))?;
    }

    let client_config = client_config.with_authentication(!options.no_auth);

    let relay = if options.no_auth {
        DeveloperRelay::new(client_config, NoToken)
    } else {
        let token = options
            .token
            .as_deref()
            .filter(|token| !token.trim().is_empty())
            .context("an access token is required: pass --token, set DEVELOPER_RELAY_TOKEN, or use --no-auth")?;
        DeveloperRelay::new(client_config, StaticToken::new(token))
    };

    Ok(relay)
}
