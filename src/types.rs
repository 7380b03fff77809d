//! Core types for the Daraja API

use crate::auth;
use crate::validate;
use crate::{DarajaError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Sandbox base URL
pub const SANDBOX_BASE_URL: &str = "https://sandbox.safaricom.co.ke";
/// Production base URL
pub const PRODUCTION_BASE_URL: &str = "https://api.safaricom.co.ke";

/// Deployment environment of the remote API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    /// Get the base URL for this environment
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_BASE_URL,
            Environment::Production => PRODUCTION_BASE_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = DarajaError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            other => Err(DarajaError::config(format!(
                "Unknown environment: {}",
                other
            ))),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct DarajaConfig {
    /// Deployment environment selecting the base URL
    pub environment: Environment,
    /// Consumer key issued by the Daraja portal
    pub consumer_key: String,
    /// Consumer secret issued by the Daraja portal
    pub consumer_secret: String,
    /// Base URL override, takes precedence over the environment
    pub base_url: Option<String>,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl DarajaConfig {
    /// Create a new configuration
    pub fn new(
        environment: Environment,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        Self {
            environment,
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            base_url: None,
            timeout: None,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Create a configuration from `DARAJA_ENVIRONMENT`, `DARAJA_CONSUMER_KEY`
    /// and `DARAJA_CONSUMER_SECRET`
    pub fn from_env() -> Result<Self> {
        let environment = env::var("DARAJA_ENVIRONMENT")
            .unwrap_or_else(|_| "sandbox".to_string())
            .parse()?;
        let consumer_key = env::var("DARAJA_CONSUMER_KEY").unwrap_or_default();
        let consumer_secret = env::var("DARAJA_CONSUMER_SECRET").unwrap_or_default();

        if consumer_key.is_empty() || consumer_secret.is_empty() {
            return Err(DarajaError::config(
                "Missing credentials: DARAJA_CONSUMER_KEY and DARAJA_CONSUMER_SECRET must be set",
            ));
        }

        Ok(Self::new(environment, consumer_key, consumer_secret))
    }

    /// Resolve the effective base URL
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.environment.base_url().to_string())
    }
}

/// OAuth access token returned by the token endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// Bearer token value
    pub access_token: String,
    /// Validity duration in seconds, as the decimal string the API returns
    pub expires_in: String,
}

impl AccessToken {
    /// Validity duration in seconds, if the wire value parses
    pub fn expiry_seconds(&self) -> Option<u64> {
        self.expires_in.parse().ok()
    }
}

/// Response type for C2B URL registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseType {
    /// Cancel the transaction when the validation URL is unreachable
    Cancelled,
    /// Complete the transaction when the validation URL is unreachable
    Completed,
}

impl ResponseType {
    /// Get the wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Cancelled => "Cancelled",
            ResponseType::Completed => "Completed",
        }
    }
}

/// Transaction type for C2B and STK push payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Pay bill payment
    CustomerPayBillOnline,
    /// Buy goods payment
    CustomerBuyGoodsOnline,
}

impl TransactionType {
    /// Get the wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::CustomerPayBillOnline => "CustomerPayBillOnline",
            TransactionType::CustomerBuyGoodsOnline => "CustomerBuyGoodsOnline",
        }
    }
}

/// Command identifier for B2C payment requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum B2cCommand {
    /// Salary disbursement
    SalaryPayment,
    /// Business payment to a customer
    BusinessPayment,
    /// Promotional payment
    PromotionPayment,
}

impl B2cCommand {
    /// Get the wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            B2cCommand::SalaryPayment => "SalaryPayment",
            B2cCommand::BusinessPayment => "BusinessPayment",
            B2cCommand::PromotionPayment => "PromotionPayment",
        }
    }
}

/// Command identifier for B2B payment requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum B2bCommand {
    /// Pay bill to another organization
    BusinessPayBill,
    /// Buy goods from another organization
    BusinessBuyGoods,
    /// Move funds to a disbursement account
    DisburseFundsToBusiness,
    /// Transfer between organization accounts
    BusinessToBusinessTransfer,
}

impl B2bCommand {
    /// Get the wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            B2bCommand::BusinessPayBill => "BusinessPayBill",
            B2bCommand::BusinessBuyGoods => "BusinessBuyGoods",
            B2bCommand::DisburseFundsToBusiness => "DisburseFundsToBusiness",
            B2bCommand::BusinessToBusinessTransfer => "BusinessToBusinessTransfer",
        }
    }
}

/// Identifier type for a transaction party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentifierType {
    /// MSISDN (phone number)
    #[serde(rename = "1")]
    Msisdn,
    /// Till number
    #[serde(rename = "2")]
    TillNumber,
    /// Organization short code
    #[serde(rename = "4")]
    OrganizationShortCode,
}

/// C2B callback URL registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterUrlRequest {
    /// Organization short code
    #[serde(rename = "ShortCode")]
    pub short_code: String,
    /// Behavior when the validation URL is unreachable
    #[serde(rename = "ResponseType")]
    pub response_type: ResponseType,
    /// URL receiving confirmed transactions
    #[serde(rename = "ConfirmationURL")]
    pub confirmation_url: String,
    /// URL receiving transactions pending validation
    #[serde(rename = "ValidationURL")]
    pub validation_url: String,
}

impl RegisterUrlRequest {
    /// Create a new URL registration request
    pub fn new(
        short_code: impl Into<String>,
        response_type: ResponseType,
        confirmation_url: impl Into<String>,
        validation_url: impl Into<String>,
    ) -> Result<Self> {
        let confirmation_url = validate::checked_url(confirmation_url.into())?;
        let validation_url = validate::checked_url(validation_url.into())?;

        Ok(Self {
            short_code: short_code.into(),
            response_type,
            confirmation_url,
            validation_url,
        })
    }
}

/// C2B payment simulation request
#[derive(Debug, Clone, Serialize)]
pub struct C2bRequest {
    /// Organization short code receiving the payment
    #[serde(rename = "ShortCode")]
    pub short_code: String,
    /// Transaction type
    #[serde(rename = "CommandID")]
    pub command_id: TransactionType,
    /// Amount in whole shillings
    #[serde(rename = "Amount")]
    pub amount: u64,
    /// Paying phone number, normalized to `254…`
    #[serde(rename = "Msisdn")]
    pub msisdn: String,
    /// Account reference for pay bill payments
    #[serde(rename = "BillRefNumber")]
    pub bill_ref_number: String,
}

impl C2bRequest {
    /// Create a new C2B simulation request
    pub fn new(
        short_code: impl Into<String>,
        command_id: TransactionType,
        amount: u64,
        msisdn: &str,
        bill_ref_number: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            short_code: short_code.into(),
            command_id,
            amount,
            msisdn: validate::format_saf_number(msisdn)?,
            bill_ref_number: bill_ref_number.into(),
        })
    }
}

/// B2C payment request
#[derive(Debug, Clone, Serialize)]
pub struct B2cRequest {
    /// API operator username
    #[serde(rename = "InitiatorName")]
    pub initiator_name: String,
    /// Encrypted operator credential from the Daraja portal
    #[serde(rename = "SecurityCredential")]
    pub security_credential: String,
    /// Payment kind
    #[serde(rename = "CommandID")]
    pub command_id: B2cCommand,
    /// Amount in whole shillings
    #[serde(rename = "Amount")]
    pub amount: u64,
    /// Paying organization short code
    #[serde(rename = "PartyA")]
    pub party_a: String,
    /// Receiving phone number, normalized to `254…`
    #[serde(rename = "PartyB")]
    pub party_b: String,
    /// Free-form remarks
    #[serde(rename = "Remarks")]
    pub remarks: String,
    /// URL notified when the request expires in the queue
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
    /// URL receiving the transaction result
    #[serde(rename = "ResultURL")]
    pub result_url: String,
    /// Optional occasion label
    #[serde(rename = "Occasion", skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
}

impl B2cRequest {
    /// Create a new B2C payment request
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        initiator_name: impl Into<String>,
        security_credential: impl Into<String>,
        command_id: B2cCommand,
        amount: u64,
        party_a: impl Into<String>,
        party_b: &str,
        remarks: impl Into<String>,
        queue_timeout_url: impl Into<String>,
        result_url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            initiator_name: initiator_name.into(),
            security_credential: security_credential.into(),
            command_id,
            amount,
            party_a: party_a.into(),
            party_b: validate::format_saf_number(party_b)?,
            remarks: remarks.into(),
            queue_timeout_url: validate::checked_url(queue_timeout_url.into())?,
            result_url: validate::checked_url(result_url.into())?,
            occasion: None,
        })
    }

    /// Set the occasion label
    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = Some(occasion.into());
        self
    }
}

/// B2B payment request
#[derive(Debug, Clone, Serialize)]
pub struct B2bRequest {
    /// API operator username
    #[serde(rename = "Initiator")]
    pub initiator: String,
    /// Encrypted operator credential from the Daraja portal
    #[serde(rename = "SecurityCredential")]
    pub security_credential: String,
    /// Payment kind
    #[serde(rename = "CommandID")]
    pub command_id: B2bCommand,
    /// Identifier type of the sending organization
    #[serde(rename = "SenderIdentifierType")]
    pub sender_identifier_type: IdentifierType,
    // The wire name really is misspelled.
    /// Identifier type of the receiving organization
    #[serde(rename = "RecieverIdentifierType")]
    pub receiver_identifier_type: IdentifierType,
    /// Amount in whole shillings
    #[serde(rename = "Amount")]
    pub amount: u64,
    /// Sending organization short code
    #[serde(rename = "PartyA")]
    pub party_a: String,
    /// Receiving organization short code
    #[serde(rename = "PartyB")]
    pub party_b: String,
    /// Account reference at the receiving organization
    #[serde(rename = "AccountReference")]
    pub account_reference: String,
    /// Free-form remarks
    #[serde(rename = "Remarks")]
    pub remarks: String,
    /// URL notified when the request expires in the queue
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
    /// URL receiving the transaction result
    #[serde(rename = "ResultURL")]
    pub result_url: String,
}

impl B2bRequest {
    /// Create a new B2B payment request with both parties identified by
    /// organization short code
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        initiator: impl Into<String>,
        security_credential: impl Into<String>,
        command_id: B2bCommand,
        amount: u64,
        party_a: impl Into<String>,
        party_b: impl Into<String>,
        account_reference: impl Into<String>,
        remarks: impl Into<String>,
        queue_timeout_url: impl Into<String>,
        result_url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            initiator: initiator.into(),
            security_credential: security_credential.into(),
            command_id,
            sender_identifier_type: IdentifierType::OrganizationShortCode,
            receiver_identifier_type: IdentifierType::OrganizationShortCode,
            amount,
            party_a: party_a.into(),
            party_b: party_b.into(),
            account_reference: account_reference.into(),
            remarks: remarks.into(),
            queue_timeout_url: validate::checked_url(queue_timeout_url.into())?,
            result_url: validate::checked_url(result_url.into())?,
        })
    }

    /// Set the sender identifier type
    pub fn with_sender_identifier_type(mut self, identifier_type: IdentifierType) -> Self {
        self.sender_identifier_type = identifier_type;
        self
    }

    /// Set the receiver identifier type
    pub fn with_receiver_identifier_type(mut self, identifier_type: IdentifierType) -> Self {
        self.receiver_identifier_type = identifier_type;
        self
    }
}

/// Lipa na M-Pesa online checkout request
#[derive(Debug, Clone, Serialize)]
pub struct StkPushRequest {
    /// Lipa na M-Pesa short code
    #[serde(rename = "BusinessShortCode")]
    pub business_short_code: String,
    /// base64(short code + passkey + timestamp)
    #[serde(rename = "Password")]
    pub password: String,
    /// Timestamp the password was generated at, `YYYYMMDDHHmmss`
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    /// Transaction type
    #[serde(rename = "TransactionType")]
    pub transaction_type: TransactionType,
    /// Amount in whole shillings
    #[serde(rename = "Amount")]
    pub amount: u64,
    /// Paying phone number, normalized to `254…`
    #[serde(rename = "PartyA")]
    pub party_a: String,
    /// Short code receiving the payment
    #[serde(rename = "PartyB")]
    pub party_b: String,
    /// Phone number prompted for the payment
    #[serde(rename = "PhoneNumber")]
    pub phone_number: String,
    /// URL receiving the payment result
    #[serde(rename = "CallBackURL")]
    pub callback_url: String,
    /// Account reference shown to the payer
    #[serde(rename = "AccountReference")]
    pub account_reference: String,
    /// Description shown to the payer
    #[serde(rename = "TransactionDesc")]
    pub transaction_desc: String,
}

impl StkPushRequest {
    /// Create a new checkout request. The password and timestamp are derived
    /// from the short code and passkey at call time.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        business_short_code: impl Into<String>,
        passkey: &str,
        amount: u64,
        phone_number: &str,
        callback_url: impl Into<String>,
        account_reference: impl Into<String>,
        transaction_desc: impl Into<String>,
    ) -> Result<Self> {
        let business_short_code = business_short_code.into();
        let phone_number = validate::format_saf_number(phone_number)?;
        let (password, timestamp) = auth::stk_password(&business_short_code, passkey);

        Ok(Self {
            party_a: phone_number.clone(),
            party_b: business_short_code.clone(),
            business_short_code,
            password,
            timestamp,
            transaction_type: TransactionType::CustomerPayBillOnline,
            amount,
            phone_number,
            callback_url: validate::checked_url(callback_url.into())?,
            account_reference: account_reference.into(),
            transaction_desc: transaction_desc.into(),
        })
    }

    /// Set the transaction type
    pub fn with_transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = transaction_type;
        self
    }
}

/// Checkout status query request
#[derive(Debug, Clone, Serialize)]
pub struct StkQueryRequest {
    /// Lipa na M-Pesa short code
    #[serde(rename = "BusinessShortCode")]
    pub business_short_code: String,
    /// base64(short code + passkey + timestamp)
    #[serde(rename = "Password")]
    pub password: String,
    /// Timestamp the password was generated at, `YYYYMMDDHHmmss`
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    /// Checkout request being queried
    #[serde(rename = "CheckoutRequestID")]
    pub checkout_request_id: String,
}

impl StkQueryRequest {
    /// Create a new checkout status query
    pub fn new(
        business_short_code: impl Into<String>,
        passkey: &str,
        checkout_request_id: impl Into<String>,
    ) -> Self {
        let business_short_code = business_short_code.into();
        let (password, timestamp) = auth::stk_password(&business_short_code, passkey);

        Self {
            business_short_code,
            password,
            timestamp,
            checkout_request_id: checkout_request_id.into(),
        }
    }
}

/// Transaction status query request
#[derive(Debug, Clone, Serialize)]
pub struct TransactionStatusRequest {
    /// API operator username
    #[serde(rename = "Initiator")]
    pub initiator: String,
    /// Encrypted operator credential from the Daraja portal
    #[serde(rename = "SecurityCredential")]
    pub security_credential: String,
    /// Always `TransactionStatusQuery`
    #[serde(rename = "CommandID")]
    pub command_id: String,
    /// M-Pesa receipt of the transaction being queried
    #[serde(rename = "TransactionID")]
    pub transaction_id: String,
    /// Organization short code the transaction belongs to
    #[serde(rename = "PartyA")]
    pub party_a: String,
    /// Identifier type of the organization
    #[serde(rename = "IdentifierType")]
    pub identifier_type: IdentifierType,
    /// URL receiving the query result
    #[serde(rename = "ResultURL")]
    pub result_url: String,
    /// URL notified when the request expires in the queue
    #[serde(rename = "QueueTimeOutURL")]
    pub queue_timeout_url: String,
    /// Free-form remarks
    #[serde(rename = "Remarks")]
    pub remarks: String,
    /// Optional occasion label
    #[serde(rename = "Occasion", skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
}

impl TransactionStatusRequest {
    /// Create a new transaction status query
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        initiator: impl Into<String>,
        security_credential: impl Into<String>,
        transaction_id: impl Into<String>,
        party_a: impl Into<String>,
        result_url: impl Into<String>,
        queue_timeout_url: impl Into<String>,
        remarks: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            initiator: initiator.into(),
            security_credential: security_credential.into(),
            command_id: "TransactionStatusQuery".to_string(),
            transaction_id: transaction_id.into(),
            party_a: party_a.into(),
            identifier_type: IdentifierType::OrganizationShortCode,
            result_url: validate::checked_url(result_url.into())?,
            queue_timeout_url: validate::checked_url(queue_timeout_url.into())?,
            remarks: remarks.into(),
            occasion: None,
        })
    }

    /// Set the identifier type
    pub fn with_identifier_type(mut self, identifier_type: IdentifierType) -> Self {
        self.identifier_type = identifier_type;
        self
    }

    /// Set the occasion label
    pub fn with_occasion(mut self, occasion: impl Into<String>) -> Self {
        self.occasion = Some(occasion.into());
        self
    }
}
