//! Credentials for control-plane requests.

use crate::{RelayError, RelayResult};

/// Supplies the bearer token attached to authenticated API requests.
///
/// Token acquisition and refresh live outside this crate; implementors hand
/// back whatever token is currently valid.
pub trait AccessTokenSource: Send + Sync {
    fn access_token(&self) -> RelayResult<String>;
}

/// A fixed token, e.g. from a CLI flag or environment variable.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken").field(&"<redacted>").finish()
    }
}

impl AccessTokenSource for StaticToken {
    fn access_token(&self) -> RelayResult<String> {
        if self.0.trim().is_empty() {
            return Err(RelayError::Authentication("access token is empty".to_string()));
        }
        Ok(self.0.clone())
    }
}

/// No credential available. Only usable with authentication disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl AccessTokenSource for NoToken {
    fn access_token(&self) -> RelayResult<String> {
        Err(RelayError::Authentication(
            "no access token configured".to_string(),
        ))
    }
}
