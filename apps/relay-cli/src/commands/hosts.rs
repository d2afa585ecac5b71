//! Host listing command.

use super::{build_relay, ClientOptions};
use crate::output::{self, OutputFormat};
use anyhow::Result;

/// List hosts grouped by role.
pub async fn hosts_list(options: &ClientOptions, format: &OutputFormat) -> Result<()> {
    let relay = build_relay(options)?;
    let hosts = relay.hosts().await?;

    match format {
        OutputFormat::Text => {
            output::print_hosts("App hosts", &hosts.app_host);
            output::print_hosts("Companion hosts", &hosts.companion_host);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&hosts)?);
        }
    }

    Ok(())
}
