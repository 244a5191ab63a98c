//! Data Transfer Objects exchanged with the payment processor.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{ApplePayTokenData, GooglePayTokenData};

/// Wallet that produced the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    ApplePay,
    GooglePay,
}

/// Token material forwarded to the processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenData {
    Apple(ApplePayTokenData),
    Google(GooglePayTokenData),
}

/// Request to charge a wallet token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobilePaymentRequest {
    #[serde(rename = "type")]
    pub wallet: WalletType,
    pub token_data: TokenData,
    /// Sent as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency_id: u64,
    /// Settlement currency, only sent when auto-capture is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_currency_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

/// Processor response to a mobile payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayReceipt {
    pub reference: String,
    /// 3-D Secure authentication page the user must visit, if any
    #[serde(rename = "3DSAuthUrl", skip_serializing_if = "Option::is_none", default)]
    pub redirect_url: Option<String>,
}
