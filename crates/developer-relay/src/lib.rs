//! Developer relay client.
//!
//! This crate provides:
//! - Host discovery with strict payload validation and role classification
//! - Connection negotiation: an authenticated `text/uri-list` handshake that
//!   yields one relay URL
//! - Upgrade of that URL into a message-mode WebSocket stream owned by the caller
//!
//! The stream is handed off as-is: reconnection, keepalive and framing
//! beyond one message per frame are the caller's concern.

pub mod api;
mod auth;
mod client;
mod error;
pub mod hosts;
pub mod stream;
pub mod uri_list;

pub use auth::{AccessTokenSource, NoToken, StaticToken};
pub use client::{DeveloperRelay, RelayClientConfig};
pub use error::{RelayError, RelayResult};
pub use hosts::{hosts_with_role, Host, HostState, Hosts, APP_HOST_ROLE, COMPANION_HOST_ROLE};
pub use stream::{RelayFrame, RelaySocket, RelayStream};
