//! Google Pay payment request.
//!
//! One native call per attempt: it opens the sheet and settles directly with
//! the token. There is no event subscription, no abort and no completion step.

use std::sync::Arc;

use tracing::{debug, instrument, warn};
use wallet_types::{
    Environment, GooglePayModule, GooglePayRequest, GooglePayToken, MerchantContext,
    PaymentError, VendorConfig,
};

/// Google Pay request for a single payment attempt.
pub struct GooglePlatformRequest {
    module: Arc<dyn GooglePayModule>,
    environment: Environment,
    request: GooglePayRequest,
}

impl GooglePlatformRequest {
    /// Captures the merchant context. No native call is made.
    pub fn new(
        module: Arc<dyn GooglePayModule>,
        config: &VendorConfig,
        environment: Environment,
        ctx: &MerchantContext,
    ) -> Self {
        Self {
            module,
            environment,
            request: GooglePayRequest::new(config, ctx),
        }
    }

    pub fn request(&self) -> &GooglePayRequest {
        &self.request
    }

    /// Opens the sheet and resolves with the payment token.
    ///
    /// With `require_network_check` off the user can add a card without
    /// paying. A dismissed sheet rejects with [`PaymentError::Canceled`].
    #[instrument(skip(self), fields(environment = %self.environment))]
    pub async fn show(&self, require_network_check: bool) -> Result<GooglePayToken, PaymentError> {
        match self
            .module
            .request_payment(self.environment, &self.request, require_network_check)
            .await
        {
            Ok(token) => {
                debug!("google pay token received");
                Ok(GooglePayToken::new(token))
            }
            Err(err) => {
                let err = PaymentError::from_google_rejection(err);
                if err.is_cancellation() {
                    debug!("google pay sheet dismissed by user");
                } else {
                    warn!(error = %err, "google pay request failed");
                }
                Err(err)
            }
        }
    }

    /// Whether the device supports Google Pay.
    pub async fn can_make_payments(
        module: &dyn GooglePayModule,
        config: &VendorConfig,
        environment: Environment,
    ) -> Result<bool, PaymentError> {
        let networks = google_networks(config);
        Ok(module
            .possibly_show_google_pay_button(environment, &networks, false)
            .await?)
    }

    /// Whether the wallet holds a usable card on one of the supported networks.
    ///
    /// The native probe reports false negatives on emulators and test wallets,
    /// so the test environment always answers `true`.
    pub async fn can_make_payments_using_networks(
        module: &dyn GooglePayModule,
        config: &VendorConfig,
        environment: Environment,
    ) -> Result<bool, PaymentError> {
        if environment.is_test() {
            debug!("skipping google pay network probe in test environment");
            return Ok(true);
        }

        let networks = google_networks(config);
        Ok(module
            .possibly_show_google_pay_button(environment, &networks, true)
            .await?)
    }
}

fn google_networks(config: &VendorConfig) -> Vec<&'static str> {
    config
        .google_networks
        .iter()
        .map(|n| n.google_name())
        .collect()
}
