//! Output formatting for the CLI.

use clap::ValueEnum;
use developer_relay::Host;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print an error message.
pub fn print_error(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => eprintln!("Error: {}", message),
        OutputFormat::Json => {
            eprintln!(
                "{}",
                serde_json::json!({ "status": "error", "message": message })
            );
        }
    }
}

/// Print a heading.
pub fn print_heading(text: &str) {
    println!("\n{}", text);
    println!("{}", "-".repeat(80));
}

/// One table row for a host.
pub fn host_row(host: &Host) -> String {
    format!(
        "{:<24} {:<28} {:<10} {}",
        host.id,
        host.display_name,
        host.state,
        host.roles.join(",")
    )
}

/// Print a host table, or a placeholder when empty.
pub fn print_hosts(title: &str, hosts: &[Host]) {
    print_heading(title);
    if hosts.is_empty() {
        println!("No hosts found");
        return;
    }
    println!("{:<24} {:<28} {:<10} {}", "ID", "Name", "State", "Roles");
    for host in hosts {
        println!("{}", host_row(host));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use developer_relay::HostState;

    #[test]
    fn test_host_row_columns() {
        let host = Host {
            id: "h1".to_string(),
            display_name: "Versa 3".to_string(),
            roles: vec!["APP_HOST".to_string(), "COMPANION_HOST".to_string()],
            state: HostState::Busy,
        };

        let row = host_row(&host);
        assert!(row.starts_with("h1 "));
        assert!(row.contains("Versa 3"));
        assert!(row.contains("busy"));
        assert!(row.ends_with("APP_HOST,COMPANION_HOST"));
    }

    #[test]
    fn test_default_format_is_text() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
