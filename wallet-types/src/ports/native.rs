//! Native bridge ports.
//!
//! The two wallets expose structurally different native contracts:
//! Apple Pay is callback/event driven with an explicit complete step,
//! Google Pay is a single call that settles with the token.

use std::sync::Arc;

use crate::domain::{
    ApplePayMethodData, Environment, GooglePayRequest, PaymentDetails, PaymentStatus, Platform,
    UserAcceptDetails,
};
use crate::error::NativeError;

/// Callback invoked by the native module when the user authorizes a payment.
pub type UserAcceptListener = Arc<dyn Fn(UserAcceptDetails) + Send + Sync>;

/// Handle identifying a registered event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Reports the platform identity of the running device.
pub trait DeviceInfo: Send + Sync {
    fn platform(&self) -> Platform;
}

/// Apple Pay native module.
///
/// `show` only confirms the sheet was presented; the authorized payment is
/// delivered through the listener registered for the user-accept event.
#[async_trait::async_trait]
pub trait ApplePayModule: Send + Sync {
    /// Registers a listener for the named native event.
    fn add_listener(&self, event: &str, listener: UserAcceptListener) -> ListenerId;

    /// Unregisters a listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);

    /// Prepares the native payment request backing the sheet.
    async fn create_payment_request(
        &self,
        method_data: &ApplePayMethodData,
        details: &PaymentDetails,
    ) -> Result<(), NativeError>;

    /// Presents the payment sheet.
    async fn show(&self) -> Result<(), NativeError>;

    /// Dismisses the payment sheet.
    async fn abort(&self) -> Result<(), NativeError>;

    /// Reports the processing outcome back to the sheet.
    async fn complete(&self, status: PaymentStatus) -> Result<(), NativeError>;

    /// Opens the add-card flow.
    async fn setup(&self) -> Result<(), NativeError>;

    /// Whether the device supports Apple Pay at all.
    fn can_make_payments(&self) -> bool;

    /// Whether the wallet holds a card on one of the given networks.
    async fn can_make_payments_using_networks(
        &self,
        networks: &[&str],
    ) -> Result<bool, NativeError>;
}

/// Google Pay native module.
#[async_trait::async_trait]
pub trait GooglePayModule: Send + Sync {
    /// Opens the sheet and settles with the raw token JSON.
    async fn request_payment(
        &self,
        environment: Environment,
        request: &GooglePayRequest,
        require_network_check: bool,
    ) -> Result<String, NativeError>;

    /// Availability probe; with `existing_payment_method_required` it also
    /// requires a usable card in the wallet.
    async fn possibly_show_google_pay_button(
        &self,
        environment: Environment,
        networks: &[&str],
        existing_payment_method_required: bool,
    ) -> Result<bool, NativeError>;
}
