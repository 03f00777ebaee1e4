//! HTTP-level tests: the real `reqwest` transport against a local mock server.

use mockito::Matcher;
use serde_json::json;

use revolutx::api::*;

const API_KEY: &str = "test-api-key";
const ZERO_SEED_HEX: &str = "0000000000000000000000000000000000000000000000000000000000000000";

fn client_for(server: &mockito::Server) -> RevolutXClient {
    RevolutXClient::builder(API_KEY, ZERO_SEED_HEX)
        .base_url(server.url())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_signed_post_on_the_wire() {
    let mut server = mockito::Server::new_async().await;
    let body = r#"{"client_order_id":"3b364427-1f4f-4f66-9935-86b6fb115d26"}"#;

    let mock = server
        .mock("POST", "/api/1.0/orders")
        .match_header("x-revx-api-key", API_KEY)
        .match_header("x-revx-timestamp", "1765360896219")
        .match_header(
            "x-revx-signature",
            "DGpHiOQWf4zDA02D6zO/tcbSlcfH12FRDkMrsA4ZCB/EH7vUXQidKnUX2oODobNfrsUm8wHglLuOCj/+4pyrAA==",
        )
        .match_header("content-type", "application/json")
        .match_body(Matcher::Exact(body.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"venue_order_id":"7a52e92e","state":"new"}"#)
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let order = json!({"client_order_id": "3b364427-1f4f-4f66-9935-86b6fb115d26"});
    let request =
        CanonicalRequest::build_at(1765360896219, HttpMethod::Post, "/orders", None, Some(&order))
            .unwrap();

    let value = client.dispatch(&request).await.unwrap();
    assert_eq!(value["venue_order_id"], "7a52e92e");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_query_sent_as_signed() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", "/api/1.0/trades?symbol=BTC-EUR&limit=100")
        .match_header("x-revx-signature", Matcher::Regex(r"^[A-Za-z0-9+/]{86}==$".to_string()))
        .with_status(200)
        .with_body("[]")
        .expect(1)
        .create_async()
        .await;

    let client = client_for(&server);
    let trades = client
        .get_trades(&TradesParams::new().with_symbol("BTC-EUR"))
        .await
        .unwrap();

    assert_eq!(trades, json!([]));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_success_body() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("DELETE", "/api/1.0/orders?symbol=ETH-EUR")
        .with_status(204)
        .create_async()
        .await;

    let client = client_for(&server);
    let value = client.cancel_all_orders(Some("ETH-EUR")).await.unwrap();

    assert_eq!(value, json!({}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_authentication_failure() {
    let mut server = mockito::Server::new_async().await;
    let body = r#"{"message":"Invalid API Key","code":"AUTH_FAILED"}"#;

    let _mock = server
        .mock("GET", "/api/1.0/balances")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_balances().await.unwrap_err();

    assert_eq!(err.kind(), Some(FailureKind::Authentication));
    assert_eq!(err.status_code(), Some(401));
    assert_eq!(err.api_error_code(), Some("AUTH_FAILED"));
    assert_eq!(err.raw_body(), Some(body));
}

#[tokio::test]
async fn test_rate_limited() {
    let mut server = mockito::Server::new_async().await;

    let _mock = server
        .mock("GET", "/api/1.0/public/quote?symbol=BTC-EUR")
        .with_status(429)
        .with_body("Too Many Requests")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.get_quote("BTC-EUR").await.unwrap_err();

    assert!(matches!(err, ApiError::RateLimited(_)));
    assert_eq!(err.raw_body(), Some("Too Many Requests"));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on port 1
    let client = RevolutXClient::builder(API_KEY, ZERO_SEED_HEX)
        .base_url("http://127.0.0.1:1")
        .build()
        .unwrap();

    let err = client.get_balances().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)), "got {:?}", err);
    assert!(err.is_retryable());
}
