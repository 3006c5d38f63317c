use bankwire_core::{BankwireError, GetAccountsRequest, HttpConfig, Provider, RetryConfig};
use bankwire_teller::TellerConnector;
use bankwire_teller::config::TellerConfig;
use httpmock::prelude::*;
use serde_json::json;

fn connector(server: &MockServer) -> TellerConnector {
    let config = TellerConfig::default()
        .base_url(server.base_url())
        .http(HttpConfig {
            retry: RetryConfig {
                min_backoff_ms: 1,
                max_backoff_ms: 2,
                ..RetryConfig::default()
            },
            ..HttpConfig::default()
        });
    TellerConnector::new(&config).unwrap()
}

fn request() -> GetAccountsRequest {
    GetAccountsRequest::teller("token_abc")
}

#[tokio::test]
async fn access_token_is_sent_as_basic_auth_user() {
    let server = MockServer::start_async().await;
    let accounts = server
        .mock_async(|when, then| {
            // base64("token_abc:")
            when.method(GET)
                .path("/accounts")
                .header("authorization", "Basic dG9rZW5fYWJjOg==");
            then.status(200).json_body(json!([{
                "id": "acc_1",
                "enrollment_id": "enr_1",
                "name": "Checking",
                "type": "depository",
                "subtype": "checking",
                "currency": "USD",
                "institution": { "id": "chase", "name": "Chase" },
                "last_four": "7890",
                "status": "open"
            }]));
        })
        .await;

    let list = connector(&server).get_accounts(&request()).await.unwrap();

    accounts.assert_async().await;
    assert_eq!(list[0].id, "acc_1");
}

#[tokio::test]
async fn server_errors_retry_then_surface() {
    let server = MockServer::start_async().await;
    let accounts = server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts");
            then.status(503);
        })
        .await;

    let err = connector(&server).get_accounts(&request()).await.unwrap_err();

    accounts.assert_hits_async(3).await;
    assert!(matches!(
        err,
        BankwireError::Upstream {
            status: Some(503),
            ..
        }
    ));
}

#[tokio::test]
async fn revoked_enrollment_is_not_retried() {
    let server = MockServer::start_async().await;
    let accounts = server
        .mock_async(|when, then| {
            when.method(GET).path("/accounts");
            then.status(401)
                .json_body(json!({ "error": { "code": "enrollment.disconnected" } }));
        })
        .await;

    let err = connector(&server).get_accounts(&request()).await.unwrap_err();

    accounts.assert_hits_async(1).await;
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn health_hits_the_health_endpoint() {
    let server = MockServer::start_async().await;
    let health = server
        .mock_async(|when, then| {
            when.method(GET).path("/health");
            then.status(200).body("ok");
        })
        .await;

    assert!(connector(&server).get_health_check().await);
    health.assert_async().await;
}
