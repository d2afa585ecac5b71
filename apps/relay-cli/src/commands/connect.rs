//! Connection commands.

use super::{build_relay, ClientOptions};
use crate::output::OutputFormat;
use anyhow::Result;
use developer_relay::RelayFrame;
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// Print the negotiated connection URL without opening a stream.
pub async fn connection_url(
    options: &ClientOptions,
    host_id: &str,
    format: &OutputFormat,
) -> Result<()> {
    let relay = build_relay(options)?;
    let url = relay.connection_url(host_id).await?;

    match format {
        OutputFormat::Text => println!("{}", url),
        OutputFormat::Json => println!("{}", json!({ "host_id": host_id, "url": url })),
    }
    Ok(())
}

/// Open a stream to `host_id` and bridge it to stdin/stdout.
///
/// Each stdin line is sent as one text frame. Received frames are printed one
/// per line. On stdin EOF a close frame is sent and remaining frames are
/// drained until the relay closes.
pub async fn connect(options: &ClientOptions, host_id: &str, format: &OutputFormat) -> Result<()> {
    let relay = build_relay(options)?;
    let stream = relay.connect(host_id).await?;
    info!(host_id, "Connected through relay");

    if *format == OutputFormat::Text {
        eprintln!("Connected to {}. Lines typed here are sent as messages.", host_id);
    }

    let (mut sink, mut source) = stream.split();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => sink.send(RelayFrame::Text(line)).await?,
                None => {
                    debug!("stdin closed, closing relay stream");
                    stdin_open = false;
                    sink.close().await?;
                }
            },
            frame = source.next() => match frame {
                Some(frame) => print_frame(&frame?, format),
                None => break,
            },
        }
    }

    debug!(host_id, "Relay stream ended");
    Ok(())
}

fn print_frame(frame: &RelayFrame, format: &OutputFormat) {
    println!("{}", render_frame(frame, format));
}

fn render_frame(frame: &RelayFrame, format: &OutputFormat) -> String {
    match (format, frame) {
        (OutputFormat::Text, RelayFrame::Text(text)) => text.clone(),
        (OutputFormat::Text, RelayFrame::Binary(bytes)) => format!("<{} bytes>", bytes.len()),
        (OutputFormat::Json, RelayFrame::Text(text)) => {
            json!({ "type": "text", "data": text }).to_string()
        }
        (OutputFormat::Json, RelayFrame::Binary(bytes)) => {
            json!({ "type": "binary", "data": bytes }).to_string()
        }
    }
}
