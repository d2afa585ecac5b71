//! relay - command-line client for the developer relay.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use commands::ClientOptions;
use tracing::debug;

/// List relay hosts and open streams to them.
#[derive(Parser)]
#[command(name = "relay")]
#[command(about = "Developer relay client: discover hosts and connect through the relay")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Control-plane API URL (overrides the config file)
    #[arg(long, global = true, env = "DEVELOPER_RELAY_API_URL")]
    api_url: Option<String>,

    /// Bearer token for control-plane requests
    #[arg(long, global = true, env = "DEVELOPER_RELAY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Send control-plane requests without credentials
    #[arg(long, global = true)]
    no_auth: bool,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List hosts grouped by role
    Hosts,

    /// Print the negotiated connection URL for a host
    Url {
        /// Host ID
        host_id: String,
    },

    /// Open a stream to a host and bridge it to stdin/stdout
    Connect {
        /// Host ID
        host_id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    relay_config::init_logging("relay-cli", &cli.log_level, false);

    let options = ClientOptions {
        api_url: cli.api_url.clone(),
        token: cli.token.clone(),
        no_auth: cli.no_auth,
    };

    let result = match cli.command {
        Commands::Hosts => commands::hosts_list(&options, &cli.format).await,
        Commands::Url { host_id } => commands::connection_url(&options, &host_id, &cli.format).await,
        Commands::Connect { host_id } => commands::connect(&options, &host_id, &cli.format).await,
    };

    if let Err(e) = result {
        debug!(error = %e, "Command failed");
        output::print_error(&format!("{:#}", e), &cli.format);
        std::process::exit(1);
    }
}
