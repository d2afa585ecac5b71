//! Host directory types and role classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role tag for hosts that run developer applications.
pub const APP_HOST_ROLE: &str = "APP_HOST";

/// Role tag for hosts that run the companion side.
pub const COMPANION_HOST_ROLE: &str = "COMPANION_HOST";

/// Availability reported by the relay for a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HostState {
    Available,
    Busy,
}

impl fmt::Display for HostState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            HostState::Available => "available",
            HostState::Busy => "busy",
        })
    }
}

/// A remote host reachable through the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Host {
    /// Opaque host identifier, passed to `DeveloperRelay::connect`.
    pub id: String,
    /// Human-readable name.
    pub display_name: String,
    /// Role tags, e.g. `APP_HOST`, `COMPANION_HOST`.
    pub roles: Vec<String>,
    pub state: HostState,
}

impl Host {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// Wire shape of the host listing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct HostsResponse {
    pub hosts: Vec<Host>,
}

/// Hosts grouped by role.
///
/// The buckets are independent filters over the same listing: a host with
/// both role tags appears in both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hosts {
    pub app_host: Vec<Host>,
    pub companion_host: Vec<Host>,
}

impl Hosts {
    /// Classify a raw listing, preserving server order within each bucket.
    pub fn classify(hosts: &[Host]) -> Self {
        Self {
            app_host: hosts_with_role(hosts, APP_HOST_ROLE),
            companion_host: hosts_with_role(hosts, COMPANION_HOST_ROLE),
        }
    }

    /// Look up a host by id in either bucket.
    pub fn find(&self, id: &str) -> Option<&Host> {
        self.app_host
            .iter()
            .chain(self.companion_host.iter())
            .find(|host| host.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.app_host.is_empty() && self.companion_host.is_empty()
    }
}

/// Every host whose roles contain `role`, in the original order.
pub fn hosts_with_role(hosts: &[Host], role: &str) -> Vec<Host> {
    hosts
        .iter()
        .filter(|host| host.has_role(role))
        .cloned()
        .collect()
}
