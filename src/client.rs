//! Authenticated client for the Daraja REST endpoints

use crate::types::*;
use crate::{DarajaError, Result};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// OAuth token path
pub const GENERATE_TOKEN_PATH: &str = "/oauth/v1/generate?grant_type=client_credentials";
/// C2B callback URL registration path
pub const REGISTER_URL_PATH: &str = "/mpesa/c2b/v1/registerurl";
/// C2B payment simulation path
pub const C2B_SIMULATE_PATH: &str = "/mpesa/c2b/v1/simulate";
/// B2C payment path
pub const B2C_PAYMENT_PATH: &str = "/mpesa/b2c/v1/paymentrequest";
/// B2B payment path
pub const B2B_PAYMENT_PATH: &str = "/mpesa/b2b/v1/paymentrequest";
/// Checkout initiation path
pub const STK_PUSH_PATH: &str = "/mpesa/stkpush/v1/processrequest";
/// Checkout status query path
pub const STK_QUERY_PATH: &str = "/mpesa/stkpushquery/v1/query";
/// Transaction status query path
pub const TRANSACTION_STATUS_PATH: &str = "/mpesa/transactionstatus/v1/query";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the M-Pesa Daraja API.
///
/// Holds the environment selection, the consumer credentials and a shared
/// HTTP connection pool. All state is immutable after construction; each
/// operation is an independent request/response exchange and concurrent
/// calls only share the pool.
#[derive(Debug, Clone)]
pub struct DarajaClient {
    /// Resolved base URL
    base_url: String,
    /// Consumer key issued by the Daraja portal
    consumer_key: String,
    /// Consumer secret issued by the Daraja portal
    consumer_secret: String,
    /// Underlying HTTP client
    client: Client,
}

impl DarajaClient {
    /// Create a new client for the given environment. Performs no I/O.
    pub fn new(
        environment: Environment,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Result<Self> {
        Self::with_config(DarajaConfig::new(environment, consumer_key, consumer_secret))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: DarajaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .map_err(|e| DarajaError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: config.resolved_base_url(),
            consumer_key: config.consumer_key,
            consumer_secret: config.consumer_secret,
            client,
        })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::with_config(DarajaConfig::from_env()?)
    }

    /// Get the base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a fresh access token.
    ///
    /// Issues a GET with HTTP Basic authentication built from the consumer
    /// credentials. Tokens are never cached; every call hits the token
    /// endpoint.
    pub async fn generate_token(&self) -> Result<AccessToken> {
        let url = format!("{}{}", self.base_url, GENERATE_TOKEN_PATH);
        debug!("Requesting access token");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.consumer_key, Some(&self.consumer_secret))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // The token endpoint answers 400 as well as 401 for bad credentials.
        if status == StatusCode::BAD_REQUEST
            || status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
        {
            warn!("Token request rejected with status {}", status);
            return Err(DarajaError::authentication(format!(
                "Token request rejected with status {}",
                status
            )));
        }
        if !status.is_success() {
            return Err(DarajaError::response(status, body));
        }

        let token: AccessToken = serde_json::from_str(&body)?;
        if token.access_token.is_empty() {
            return Err(DarajaError::authentication(
                "Token endpoint returned an empty access token",
            ));
        }
        Ok(token)
    }

    /// Register the C2B confirmation and validation URLs for a short code
    pub async fn register_url(&self, request: &RegisterUrlRequest) -> Result<Value> {
        self.post(REGISTER_URL_PATH, request).await
    }

    /// Simulate a customer-to-business payment against the sandbox
    pub async fn c2b(&self, request: &C2bRequest) -> Result<Value> {
        self.post(C2B_SIMULATE_PATH, request).await
    }

    /// Initiate a business-to-customer payment
    pub async fn b2c(&self, request: &B2cRequest) -> Result<Value> {
        self.post(B2C_PAYMENT_PATH, request).await
    }

    /// Initiate a business-to-business payment
    pub async fn b2b(&self, request: &B2bRequest) -> Result<Value> {
        self.post(B2B_PAYMENT_PATH, request).await
    }

    /// Initiate a Lipa na M-Pesa online checkout on the payer's phone
    pub async fn stk_push(&self, request: &StkPushRequest) -> Result<Value> {
        self.post(STK_PUSH_PATH, request).await
    }

    /// Query the status of a previously initiated checkout
    pub async fn stk_query(&self, request: &StkQueryRequest) -> Result<Value> {
        self.post(STK_QUERY_PATH, request).await
    }

    /// Query the status of a completed transaction
    pub async fn transaction_status(&self, request: &TransactionStatusRequest) -> Result<Value> {
        self.post(TRANSACTION_STATUS_PATH, request).await
    }

    // Shared path for the authenticated operations: fetch a fresh bearer
    // token, POST the JSON body, and forward the response envelope to the
    // caller unmodified.
    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value> {
        let token = self.generate_token().await?;
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&token.access_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("Request to {} failed with status {}", path, status);
            return Err(DarajaError::response(status, body));
        }

        let envelope: Value = serde_json::from_str(&body)?;
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = DarajaClient::new(Environment::Sandbox, "key", "secret").unwrap();
        assert_eq!(client.base_url(), SANDBOX_BASE_URL);

        let client = DarajaClient::new(Environment::Production, "key", "secret").unwrap();
        assert_eq!(client.base_url(), PRODUCTION_BASE_URL);
    }

    #[test]
    fn test_client_with_config() {
        let config = DarajaConfig::new(Environment::Sandbox, "key", "secret")
            .with_base_url("http://127.0.0.1:8080")
            .with_timeout(Duration::from_secs(5));
        let client = DarajaClient::with_config(config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
    }
}
