//! Payment Request Service
//!
//! Platform-selecting facade over the Apple Pay and Google Pay requests.
//! Picks the implementation from the device identity once, at construction,
//! and forwards every call to it.

use tracing::{debug, info, instrument};
use wallet_types::{MerchantContext, PaymentError, Platform};

use crate::host::NativeHost;
use crate::platform::{
    ApplePlatformRequest, GooglePlatformRequest, PlatformRequest, ShowOptions, ShowOutcome,
};

/// Uniform payment request for the running device.
///
/// Callers must not call `show` again before the previous call settled;
/// each call opens a native sheet.
pub struct PaymentRequestService {
    request: PlatformRequest,
}

impl PaymentRequestService {
    /// Creates the request for the device's wallet.
    ///
    /// Fails only if the host did not register the native module the device needs.
    #[instrument(skip_all, fields(platform = %host.platform()))]
    pub async fn new(host: &NativeHost, context: MerchantContext) -> Result<Self, PaymentError> {
        let request = match host.platform() {
            Platform::Ios => PlatformRequest::Apple(
                ApplePlatformRequest::new(
                    host.apple_module()?.clone(),
                    host.config(),
                    host.environment(),
                    &context,
                )
                .await,
            ),
            Platform::Android => PlatformRequest::Google(GooglePlatformRequest::new(
                host.google_module()?.clone(),
                host.config(),
                host.environment(),
                &context,
            )),
        };

        debug!(wallet = request.platform().wallet_name(), "payment request created");
        Ok(Self { request })
    }

    pub fn platform(&self) -> Platform {
        self.request.platform()
    }

    /// The underlying platform request.
    pub fn request(&self) -> &PlatformRequest {
        &self.request
    }

    /// Shows the payment sheet.
    pub async fn show(&self, options: ShowOptions) -> Result<ShowOutcome, PaymentError> {
        match &self.request {
            PlatformRequest::Apple(request) => request.show().await.map(ShowOutcome::Presented),
            PlatformRequest::Google(request) => request
                .show(options.require_network_check)
                .await
                .map(ShowOutcome::Authorized),
        }
    }

    /// Aborts the request. Google Pay has no native abort and fails with
    /// [`PaymentError::Unsupported`].
    pub async fn abort(&self) -> Result<(), PaymentError> {
        match &self.request {
            PlatformRequest::Apple(request) => request.abort().await,
            PlatformRequest::Google(_) => Err(PaymentError::Unsupported {
                platform: Platform::Android,
                operation: "abort",
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Capability queries (no request instance needed)
    // ─────────────────────────────────────────────────────────────────────────────

    /// Opens the wallet's add-card flow.
    ///
    /// Google Pay has no dedicated flow; use [`crate::Checkout::add_card`].
    #[instrument(skip_all, fields(platform = %host.platform()))]
    pub async fn setup(host: &NativeHost) -> Result<(), PaymentError> {
        match host.platform() {
            Platform::Ios => ApplePlatformRequest::setup(host.apple_module()?.as_ref()).await,
            Platform::Android => Err(PaymentError::Unsupported {
                platform: Platform::Android,
                operation: "setup",
            }),
        }
    }

    /// Whether the device supports its wallet.
    pub async fn can_make_payments(host: &NativeHost) -> Result<bool, PaymentError> {
        let available = match host.platform() {
            Platform::Ios => ApplePlatformRequest::can_make_payments(host.apple_module()?.as_ref()),
            Platform::Android => {
                GooglePlatformRequest::can_make_payments(
                    host.google_module()?.as_ref(),
                    host.config(),
                    host.environment(),
                )
                .await?
            }
        };
        info!(platform = %host.platform(), available, "wallet availability probed");
        Ok(available)
    }

    /// Whether the wallet holds a usable card on a supported network.
    pub async fn can_make_payments_using_networks(host: &NativeHost) -> Result<bool, PaymentError> {
        let available = match host.platform() {
            Platform::Ios => {
                ApplePlatformRequest::can_make_payments_using_networks(
                    host.apple_module()?.as_ref(),
                    host.config(),
                )
                .await?
            }
            Platform::Android => {
                GooglePlatformRequest::can_make_payments_using_networks(
                    host.google_module()?.as_ref(),
                    host.config(),
                    host.environment(),
                )
                .await?
            }
        };
        info!(platform = %host.platform(), available, "wallet cards probed");
        Ok(available)
    }
}
