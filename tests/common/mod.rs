//! Shared utilities for integration testing.
#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use fx_quote::client::Requestor;
use fx_quote::config::{ClientConfig, QuoteConfig, StorageConfig};
use fx_quote::http::HttpServer;
use fx_quote::lifecycle::Shutdown;
use fx_quote::persistence::QuoteStore;
use fx_quote::quoting::QuoteEngine;
use fx_quote::upstream::UpstreamClient;

pub const UPSTREAM_PATH: &str = "/json/last/USD-BRL";

/// A body shaped like the provider's `USD-BRL` answer.
pub fn usd_brl_body(bid: &str) -> String {
    format!(
        r#"{{"USDBRL":{{"code":"USD","codein":"BRL","name":"Dólar Americano/Real Brasileiro","high":"5.4612","low":"5.4011","varBid":"-0.0123","pctChange":"-0.23","bid":"{bid}","ask":"5.4312","timestamp":"1718035200","create_date":"2024-06-10 13:00:00"}}}}"#
    )
}

/// HTTP client that never goes through an environment proxy.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// Start a programmable mock server with async support.
///
/// `f` yields the status code and body; it may sleep to simulate a slow peer.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        read_request_head(&mut socket).await;
                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\n\
                             Content-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock provider that always answers `bid` after `delay`.
pub async fn start_upstream(bid: &'static str, delay: Duration) -> String {
    let addr = start_programmable_backend(move || async move {
        tokio::time::sleep(delay).await;
        (200, usd_brl_body(bid))
    })
    .await;
    format!("http://{}{}", addr, UPSTREAM_PATH)
}

async fn read_request_head(socket: &mut TcpStream) {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => head.extend_from_slice(&buf[..n]),
        }
    }
}

/// Config pointing at `upstream_url`, with budgets roomy enough for CI.
pub fn test_config(upstream_url: String) -> QuoteConfig {
    let mut config = QuoteConfig::default();
    config.upstream.url = upstream_url;
    config.storage = StorageConfig {
        database_url: "sqlite::memory:".to_string(),
        table: "cotacoes".to_string(),
        max_connections: 1,
    };
    config.timeouts.request_ms = 1_000;
    config.timeouts.fetch_ms = 500;
    config.timeouts.persist_ms = 400;
    config
}

pub async fn memory_store(config: &QuoteConfig) -> QuoteStore {
    QuoteStore::connect(&config.storage).await.unwrap()
}

/// Run a quote service on an ephemeral port. Returns its quote URL.
pub async fn start_quote_server(config: QuoteConfig, store: QuoteStore) -> (String, Shutdown) {
    let upstream = UpstreamClient::with_http_client(config.upstream.clone(), http_client());
    let engine = QuoteEngine::new(upstream, store, config.timeouts.clone());
    let path = config.listener.path.clone();
    let server = HttpServer::new(config, engine);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (format!("http://{}{}", addr, path), shutdown)
}

/// Scratch directory for requestor output; removed on drop.
pub fn output_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

pub fn requestor(server_url: String, output: &Path, timeout_ms: u64) -> Requestor {
    Requestor::with_http_client(
        ClientConfig {
            server_url,
            timeout_ms,
            output_path: output.to_string_lossy().into_owned(),
            label: "Dólar".to_string(),
        },
        http_client(),
    )
}
