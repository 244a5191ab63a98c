//! Vendor configuration shared by both wallet platforms.

use serde::{Deserialize, Serialize};

use crate::domain::{CardNetwork, Environment};

/// Merchant identity and presentation constants for the payment sheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorConfig {
    /// Apple Pay merchant identifier used in production
    pub merchant_id: String,
    /// Apple Pay merchant identifier used in the test environment
    pub merchant_id_sandbox: String,
    /// Payment gateway name announced to Google Pay
    pub gateway_name: String,
    /// Label shown on the sheet total and Google Pay merchant name
    pub display_name: String,
    /// Name of the native event fired when the user authorizes a payment
    pub user_accept_event: String,
    pub apple_networks: Vec<CardNetwork>,
    pub google_networks: Vec<CardNetwork>,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            merchant_id: "merchant.com.test.wallet".to_string(),
            merchant_id_sandbox: "merchant.com.test.wallet.sandbox".to_string(),
            gateway_name: "checkoutltd".to_string(),
            display_name: "test".to_string(),
            user_accept_event: "NativePayments:onuseraccept".to_string(),
            apple_networks: vec![CardNetwork::Visa, CardNetwork::Mastercard],
            google_networks: vec![CardNetwork::Mastercard, CardNetwork::Visa],
        }
    }
}

impl VendorConfig {
    /// Apple Pay merchant identifier for the given environment.
    pub fn apple_merchant_id(&self, environment: Environment) -> &str {
        if environment.is_test() {
            &self.merchant_id_sandbox
        } else {
            &self.merchant_id
        }
    }
}
