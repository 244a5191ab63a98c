//! Payment results delivered by the native modules.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::error::PaymentError;

/// Unique identifier for a payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new random RequestId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome reported back to the Apple Pay sheet when completing a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Success,
    Failure,
    Unknown,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Success => write!(f, "success"),
            PaymentStatus::Failure => write!(f, "failure"),
            PaymentStatus::Unknown => write!(f, "unknown"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Apple Pay
// ─────────────────────────────────────────────────────────────────────────────

/// Payload of the native "user accepted" event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserAcceptDetails {
    pub transaction_identifier: Option<String>,
    /// Serialized Apple Pay token (`{version, data, signature, header}`)
    pub payment_data: String,
    pub shipping_address: Option<Value>,
    pub payer_email: Option<String>,
    pub payment_token: Option<String>,
    pub payment_method: Option<Value>,
}

/// Details carried by an Apple Pay response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePayDetails {
    pub payment_data: String,
    pub payment_token: Option<String>,
    pub transaction_identifier: Option<String>,
    pub payment_method: Option<Value>,
    pub shipping_address: Option<Value>,
    pub payer_email: Option<String>,
}

impl From<UserAcceptDetails> for ApplePayDetails {
    fn from(event: UserAcceptDetails) -> Self {
        Self {
            payment_data: event.payment_data,
            payment_token: event.payment_token,
            transaction_identifier: event.transaction_identifier,
            payment_method: event.payment_method,
            shipping_address: event.shipping_address,
            payer_email: event.payer_email,
        }
    }
}

impl ApplePayDetails {
    /// Parses the payment data into the token the processor expects.
    pub fn token_data(&self) -> Result<ApplePayTokenData, PaymentError> {
        Ok(serde_json::from_str(&self.payment_data)?)
    }
}

/// Encrypted Apple Pay token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplePayTokenData {
    pub version: String,
    pub data: String,
    pub signature: String,
    pub header: Value,
}

// ─────────────────────────────────────────────────────────────────────────────
// Google Pay
// ─────────────────────────────────────────────────────────────────────────────

/// Token returned by the Google Pay module. Terminal on arrival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GooglePayToken(String);

impl GooglePayToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw token text as delivered by the native module.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the token into the signed message the processor expects.
    pub fn token_data(&self) -> Result<GooglePayTokenData, PaymentError> {
        Ok(serde_json::from_str(&self.0)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayTokenData {
    pub protocol_version: String,
    pub signature: String,
    pub signed_message: String,
}
