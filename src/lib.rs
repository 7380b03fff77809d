//! # daraja - async M-Pesa Daraja API client
//!
//! A thin asynchronous client for the [Safaricom M-Pesa Daraja
//! API](https://developer.safaricom.co.ke). The client builds each request
//! with the right authentication, calls the fixed REST endpoints, and hands
//! the decoded JSON back to the caller. Nothing is cached and nothing is
//! retried; every operation is one outbound request and one inbound
//! response.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use daraja::{DarajaClient, Environment, StkPushRequest};
//!
//! #[tokio::main]
//! async fn main() -> daraja::Result<()> {
//!     let client = DarajaClient::new(
//!         Environment::Sandbox,
//!         "your-consumer-key",
//!         "your-consumer-secret",
//!     )?;
//!
//!     let token = client.generate_token().await?;
//!     println!("token expires in {:?} secs", token.expiry_seconds());
//!
//!     let request = StkPushRequest::new(
//!         "174379",
//!         "your-lipa-na-mpesa-passkey",
//!         100,
//!         "0721123123",
//!         "https://example.com/callback",
//!         "order-1",
//!         "Test payment",
//!     )?;
//!     let response = client.stk_push(&request).await?;
//!     println!("checkout id: {}", response["CheckoutRequestID"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error handling
//!
//! All methods return [`Result`] with a [`DarajaError`] distinguishing
//! authentication failures, network failures, non-success HTTP statuses and
//! malformed response bodies. Retry and backoff policy is left to the
//! caller.

pub mod auth;
pub mod client;
pub mod error;
pub mod types;
pub mod validate;

// Re-exports for convenience
pub use client::DarajaClient;
pub use error::{DarajaError, Result};
pub use types::*;

/// Current version of the daraja library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
