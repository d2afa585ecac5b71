#![allow(dead_code)]

use developer_relay::{DeveloperRelay, NoToken, RelayClientConfig, StaticToken};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::Message;
use url::Url;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-access-token";

/// Relay client pointed at the mock control plane, authenticated.
pub fn relay_for(mock: &MockServer) -> DeveloperRelay {
    let url = Url::parse(&mock.uri()).unwrap();
    DeveloperRelay::new(RelayClientConfig::new(url), StaticToken::new(TEST_TOKEN))
}

/// Relay client pointed at the mock control plane, no credentials.
pub fn anonymous_relay_for(mock: &MockServer) -> DeveloperRelay {
    let url = Url::parse(&mock.uri()).unwrap();
    DeveloperRelay::new(
        RelayClientConfig::new(url).with_authentication(false),
        NoToken,
    )
}

/// Local WebSocket server that echoes every text and binary frame and
/// records the request path of each upgrade.
pub struct EchoServer {
    pub addr: SocketAddr,
    pub paths: Arc<Mutex<Vec<String>>>,
}

impl EchoServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let paths = Arc::new(Mutex::new(Vec::new()));

        let recorded = paths.clone();
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let recorded = recorded.clone();
                tokio::spawn(async move {
                    let callback = move |request: &Request,
                                         response: Response|
                          -> Result<Response, ErrorResponse> {
                        recorded.lock().unwrap().push(request.uri().path().to_string());
                        Ok(response)
                    };
                    let Ok(mut ws) = tokio_tungstenite::accept_hdr_async(socket, callback).await
                    else {
                        return;
                    };
                    while let Some(Ok(message)) = ws.next().await {
                        match message {
                            Message::Text(_) | Message::Binary(_) => {
                                if ws.send(message).await.is_err() {
                                    break;
                                }
                            }
                            Message::Close(_) => break,
                            _ => {}
                        }
                    }
                });
            }
        });

        Self { addr, paths }
    }

    pub fn url(&self, path: &str) -> String {
        format!("ws://{}{}", self.addr, path)
    }

    pub fn recorded_paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

/// TCP server that answers every connection with a plain HTTP 400, so the
/// WebSocket handshake fails. Counts connection attempts.
pub struct RejectingServer {
    pub addr: SocketAddr,
    pub attempts: Arc<AtomicUsize>,
}

impl RejectingServer {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let attempts = Arc::new(AtomicUsize::new(0));

        let counter = attempts.clone();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(async move {
                    let mut buf = [0u8; 2048];
                    let _ = socket.read(&mut buf).await;
                    let _ = socket
                        .write_all(
                            b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                        )
                        .await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { addr, attempts }
    }

    pub fn url(&self) -> String {
        format!("ws://{}/session", self.addr)
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

/// CRLF-joined URI list body.
pub fn uri_list(lines: &[&str]) -> String {
    lines.join("\r\n")
}
