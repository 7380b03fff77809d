//! Integration tests for the Daraja client against a mocked remote

use base64::{engine::general_purpose, Engine as _};
use daraja::client::{GENERATE_TOKEN_PATH, STK_PUSH_PATH, STK_QUERY_PATH};
use daraja::{
    DarajaClient, DarajaConfig, DarajaError, Environment, StkPushRequest, StkQueryRequest,
};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::time::Duration;

const CONSUMER_KEY: &str = "nF4OwB2XiuYZwmdMz3bovnzw2qMls1b7";
const CONSUMER_SECRET: &str = "biIImmaAX9dYD4Pw";

fn test_client(server: &ServerGuard) -> DarajaClient {
    let config = DarajaConfig::new(Environment::Sandbox, CONSUMER_KEY, CONSUMER_SECRET)
        .with_base_url(server.url());
    DarajaClient::with_config(config).unwrap()
}

fn basic_auth_header() -> String {
    let credentials = format!("{}:{}", CONSUMER_KEY, CONSUMER_SECRET);
    format!("Basic {}", general_purpose::STANDARD.encode(credentials))
}

fn mock_token_endpoint(server: &mut ServerGuard) -> mockito::Mock {
    server
        .mock("GET", GENERATE_TOKEN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "access_token": "test-access-token",
                "expires_in": "3599"
            })
            .to_string(),
        )
        .create()
}

#[tokio::test]
async fn test_generate_token_success() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", GENERATE_TOKEN_PATH)
        .match_header("authorization", basic_auth_header().as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "access_token": "test-access-token",
                "expires_in": "3599"
            })
            .to_string(),
        )
        .create();

    let client = test_client(&server);
    let token = client.generate_token().await.unwrap();

    assert_eq!(token.access_token, "test-access-token");
    assert_eq!(token.expiry_seconds(), Some(3599));
}

#[tokio::test]
async fn test_generate_token_rejects_bad_credentials() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", GENERATE_TOKEN_PATH)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "requestId": "2880-15776-1",
                "errorCode": "400.008.01",
                "errorMessage": "Invalid Authentication passed"
            })
            .to_string(),
        )
        .create();

    let client = test_client(&server);
    let result = client.generate_token().await;

    assert!(matches!(result, Err(DarajaError::Authentication { .. })));
}

#[tokio::test]
async fn test_generate_token_rejects_empty_token() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", GENERATE_TOKEN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"access_token": "", "expires_in": "3599"}).to_string())
        .create();

    let client = test_client(&server);
    let result = client.generate_token().await;

    assert!(matches!(result, Err(DarajaError::Authentication { .. })));
}

#[tokio::test]
async fn test_stk_push_echoes_merchant_identifiers() {
    let mut server = Server::new_async().await;
    let _token = mock_token_endpoint(&mut server);
    let _m = server
        .mock("POST", STK_PUSH_PATH)
        .match_header("authorization", "Bearer test-access-token")
        .match_body(Matcher::PartialJson(json!({
            "BusinessShortCode": "174379",
            "PhoneNumber": "254721123123"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "MerchantRequestID": "29115-34620561-1",
                "CheckoutRequestID": "ws_CO_191220191020363925",
                "ResponseCode": "0",
                "ResponseDescription": "Success. Request accepted for processing",
                "CustomerMessage": "Success. Request accepted for processing"
            })
            .to_string(),
        )
        .create();

    let client = test_client(&server);
    let request = StkPushRequest::new(
        "174379",
        "test-passkey",
        100,
        "0721123123",
        "https://example.com/callback",
        "order-1",
        "Test payment",
    )
    .unwrap();

    let response = client.stk_push(&request).await.unwrap();
    assert_eq!(response["MerchantRequestID"], "29115-34620561-1");
    assert_eq!(response["CheckoutRequestID"], "ws_CO_191220191020363925");
    assert_eq!(response["ResponseCode"], "0");
}

#[tokio::test]
async fn test_payment_surfaces_authentication_failure() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", GENERATE_TOKEN_PATH)
        .with_status(401)
        .with_body("")
        .create();

    let client = test_client(&server);
    let request = StkQueryRequest::new("174379", "test-passkey", "ws_CO_191220191020363925");
    let result = client.stk_query(&request).await;

    assert!(matches!(result, Err(DarajaError::Authentication { .. })));
}

#[tokio::test]
async fn test_non_success_status_surfaces_response_error() {
    let mut server = Server::new_async().await;
    let _token = mock_token_endpoint(&mut server);
    let _m = server
        .mock("POST", STK_QUERY_PATH)
        .with_status(503)
        .with_body("Service Unavailable")
        .create();

    let client = test_client(&server);
    let request = StkQueryRequest::new("174379", "test-passkey", "ws_CO_191220191020363925");
    let result = client.stk_query(&request).await;

    match result {
        Err(DarajaError::Response { status, body }) => {
            assert_eq!(status.as_u16(), 503);
            assert!(body.contains("Service Unavailable"));
        }
        other => panic!("expected response error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_surfaces_json_error() {
    let mut server = Server::new_async().await;
    let _token = mock_token_endpoint(&mut server);
    let _m = server
        .mock("POST", STK_QUERY_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{\"MerchantRequestID\": ")
        .create();

    let client = test_client(&server);
    let request = StkQueryRequest::new("174379", "test-passkey", "ws_CO_191220191020363925");
    let result = client.stk_query(&request).await;

    assert!(matches!(result, Err(DarajaError::Json(_))));
}

#[tokio::test]
async fn test_timeout_surfaces_network_error() {
    // Non-routable IP, so the connection attempt runs into the timeout.
    let config = DarajaConfig::new(Environment::Sandbox, CONSUMER_KEY, CONSUMER_SECRET)
        .with_base_url("http://10.255.255.1:9999")
        .with_timeout(Duration::from_millis(10));
    let client = DarajaClient::with_config(config).unwrap();

    let result = client.generate_token().await;
    assert!(matches!(result, Err(DarajaError::Network(_))));

    let request = StkQueryRequest::new("174379", "test-passkey", "ws_CO_191220191020363925");
    let result = client.stk_query(&request).await;
    assert!(matches!(result, Err(DarajaError::Network(_))));
}

#[tokio::test]
async fn test_concurrent_status_queries_are_independent() {
    let mut server = Server::new_async().await;
    let _token = mock_token_endpoint(&mut server);
    let _m = server
        .mock("POST", STK_QUERY_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "ResponseCode": "0",
                "ResultCode": "0",
                "ResultDesc": "The service request is processed successfully."
            })
            .to_string(),
        )
        .expect(2)
        .create();

    let client = test_client(&server);
    let first = StkQueryRequest::new("174379", "test-passkey", "ws_CO_191220191020363925");
    let second = StkQueryRequest::new("174379", "test-passkey", "ws_CO_191220191020363926");

    let (a, b) = tokio::join!(client.stk_query(&first), client.stk_query(&second));
    let a = a.unwrap();
    let b = b.unwrap();

    assert_eq!(a["ResultCode"], "0");
    assert_eq!(a, b);
}
