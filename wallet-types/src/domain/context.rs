//! Merchant context captured when a payment request is constructed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PaymentError;

/// Who is being paid, in which currency, and how much.
///
/// Immutable once built. Validation happens here so an incomplete context
/// never reaches a native module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerchantContext {
    public_key: String,
    country_code: String,
    currency_code: String,
    amount: Decimal,
    idempotency_key: Option<String>,
}

impl MerchantContext {
    /// Creates a validated merchant context.
    pub fn new(
        public_key: impl Into<String>,
        country_code: impl Into<String>,
        currency_code: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, PaymentError> {
        let public_key = required("public key", public_key.into())?;
        let country_code = required("country code", country_code.into())?;
        let currency_code = required("currency code", currency_code.into())?;

        if amount < Decimal::ZERO {
            return Err(PaymentError::InvalidArgument(format!(
                "amount cannot be negative: {amount}"
            )));
        }

        Ok(Self {
            public_key,
            country_code,
            currency_code,
            amount,
            idempotency_key: None,
        })
    }

    /// Attaches an idempotency key forwarded unchanged to the payment network.
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn currency_code(&self) -> &str {
        &self.currency_code
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn idempotency_key(&self) -> Option<&str> {
        self.idempotency_key.as_deref()
    }

    /// Amount rendered as the plain decimal text both wallets expect (`10`, `10.5`).
    pub fn amount_value(&self) -> String {
        self.amount.normalize().to_string()
    }
}

fn required(field: &str, value: String) -> Result<String, PaymentError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PaymentError::InvalidArgument(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}
