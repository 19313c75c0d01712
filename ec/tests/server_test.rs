//! End-to-end test against a real listener

use std::time::Duration;

use echochamber::{AppState, serve_on};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[tokio::test]
async fn test_server_round_trip_and_shutdown() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind");
    let addr = listener.local_addr().unwrap();
    let state = AppState::new(1000);
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    let server_state = state.clone();
    let server = tokio::spawn(async move {
        serve_on(listener, server_state, None, async {
            let _ = stop_rx.await;
        })
        .await
    });

    let client = reqwest::Client::new();
    let base = format!("http://{}", addr);

    let response = client
        .post(format!("{}/api/predict", base))
        .json(&json!({"sequence": [3, 6, 9, 12]}))
        .send()
        .await
        .expect("predict request failed");
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["prediction"], json!(15));

    let response = client
        .get(format!("{}/api/status", base))
        .send()
        .await
        .expect("status request failed");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], json!("online"));
    assert_eq!(body["echoCount"], json!(1));

    let response = client.get(format!("{}/nowhere", base)).send().await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);

    // The shared state is the one the server records into
    assert_eq!(state.echo_count().await, 1);

    stop_tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), server)
        .await
        .expect("Server should shut down gracefully")
        .unwrap();
    assert!(result.is_ok());
}
