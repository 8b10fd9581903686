//! Requestor behaviour against a scripted quote service.

use std::time::Duration;

use fx_quote::client::{FetchError, RequestorError};

mod common;

async fn service_answering(status: u16, body: &'static str, delay: Duration) -> String {
    let addr = common::start_programmable_backend(move || async move {
        tokio::time::sleep(delay).await;
        (status, body.to_string())
    })
    .await;
    format!("http://{}/cotacao", addr)
}

#[tokio::test]
async fn test_decodes_scalar_bid() {
    let url = service_answering(200, r#""5.4321""#, Duration::ZERO).await;
    let dir = common::output_dir();
    let output = dir.path().join("cotacao.txt");

    let bid = common::requestor(url, &output, 1_000).fetch_bid().await.unwrap();

    assert_eq!(bid, "5.4321");
    assert!(!output.exists(), "fetch alone writes nothing");
}

#[tokio::test]
async fn test_overwrites_previous_output() {
    let url = service_answering(200, r#""5.50""#, Duration::ZERO).await;
    let dir = common::output_dir();
    let output = dir.path().join("cotacao.txt");
    std::fs::write(&output, "Dólar: 4.99 from an older run").unwrap();

    common::requestor(url, &output, 1_000).run().await.unwrap();

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Dólar: 5.50");
}

#[tokio::test]
async fn test_non_string_body_is_decode_error() {
    let url = service_answering(200, r#"{"bid":"5.43"}"#, Duration::ZERO).await;
    let dir = common::output_dir();
    let output = dir.path().join("cotacao.txt");

    let err = common::requestor(url, &output, 1_000).run().await.unwrap_err();

    assert!(matches!(err, RequestorError::Decode(_)));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_server_error_is_fetch_error_with_description() {
    let url = service_answering(500, "failed to fetch quote", Duration::ZERO).await;
    let dir = common::output_dir();
    let output = dir.path().join("cotacao.txt");

    let err = common::requestor(url, &output, 1_000).run().await.unwrap_err();

    assert!(err.to_string().contains("failed to fetch quote"));
    assert!(matches!(err, RequestorError::Fetch(FetchError::Status { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_slow_service_hits_client_deadline() {
    let url = service_answering(200, r#""5.43""#, Duration::from_secs(3)).await;
    let dir = common::output_dir();
    let output = dir.path().join("cotacao.txt");

    let started = std::time::Instant::now();
    let err = common::requestor(url, &output, 300).run().await.unwrap_err();

    assert!(matches!(err, RequestorError::Fetch(FetchError::Timeout(_))));
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_unreachable_service() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let dir = common::output_dir();
    let output = dir.path().join("cotacao.txt");

    let err = common::requestor(format!("http://{}/cotacao", addr), &output, 1_000)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, RequestorError::Fetch(FetchError::Transport(_))));
    assert!(!output.exists());
}
