//! Merchant and transaction descriptors handed to the native modules.
//!
//! Field names follow the payloads the native bridges expect.

use serde::{Deserialize, Serialize};

use super::context::MerchantContext;
use super::platform::Environment;
use crate::config::VendorConfig;

// ─────────────────────────────────────────────────────────────────────────────
// Apple Pay
// ─────────────────────────────────────────────────────────────────────────────

/// Merchant descriptor for the Apple Pay payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePayMethodData {
    pub merchant_identifier: String,
    pub supported_networks: Vec<String>,
    pub country_code: String,
    pub currency_code: String,
}

impl ApplePayMethodData {
    pub fn new(config: &VendorConfig, environment: Environment, ctx: &MerchantContext) -> Self {
        Self {
            merchant_identifier: config.apple_merchant_id(environment).to_string(),
            supported_networks: config
                .apple_networks
                .iter()
                .map(|n| n.apple_method_name().to_string())
                .collect(),
            country_code: ctx.country_code().to_string(),
            currency_code: ctx.currency_code().to_string(),
        }
    }
}

/// Transaction descriptor for the Apple Pay payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub total: PaymentItem,
}

/// Summary line shown on the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentItem {
    pub label: String,
    pub amount: PaymentAmount,
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAmount {
    pub currency: String,
    pub value: String,
}

impl PaymentDetails {
    pub fn new(config: &VendorConfig, ctx: &MerchantContext) -> Self {
        Self {
            total: PaymentItem {
                label: config.display_name.clone(),
                amount: PaymentAmount {
                    currency: ctx.currency_code().to_string(),
                    value: ctx.amount_value(),
                },
                idempotency_key: ctx.idempotency_key().map(str::to_string),
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Google Pay
// ─────────────────────────────────────────────────────────────────────────────

/// Full request passed to the Google Pay `requestPayment` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GooglePayRequest {
    pub card_payment_method_map: CardPaymentMethodMap,
    pub transaction: GoogleTransaction,
    pub merchant_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPaymentMethodMap {
    pub gateway: GatewayDescriptor,
    pub card_networks: Vec<String>,
}

/// Tokenization gateway; the merchant public key is the gateway merchant id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayDescriptor {
    pub name: String,
    pub merchant_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleTransaction {
    pub total_price: String,
    pub total_price_status: TotalPriceStatus,
    pub currency_code: String,
    #[serde(rename = "idempotency_key")]
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TotalPriceStatus {
    Final,
}

impl GooglePayRequest {
    pub fn new(config: &VendorConfig, ctx: &MerchantContext) -> Self {
        Self {
            card_payment_method_map: CardPaymentMethodMap {
                gateway: GatewayDescriptor {
                    name: config.gateway_name.clone(),
                    merchant_id: ctx.public_key().to_string(),
                },
                card_networks: config
                    .google_networks
                    .iter()
                    .map(|n| n.google_name().to_string())
                    .collect(),
            },
            transaction: GoogleTransaction {
                total_price: ctx.amount_value(),
                total_price_status: TotalPriceStatus::Final,
                currency_code: ctx.currency_code().to_string(),
                idempotency_key: ctx.idempotency_key().map(str::to_string),
            },
            merchant_name: config.display_name.clone(),
        }
    }
}
