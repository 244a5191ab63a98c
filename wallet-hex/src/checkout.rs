//! Checkout flow.
//!
//! Drives one wallet payment from the confirmation screen to the payment
//! processor: validates the order, shows the sheet, extracts the token,
//! submits it through the [`PaymentGateway`] port and closes the sheet.

use std::sync::atomic::{AtomicBool, Ordering};

use rust_decimal::Decimal;
use tracing::{error, info, instrument, warn};
use wallet_types::{
    GatewayReceipt, MerchantContext, MobilePaymentRequest, PaymentError, PaymentGateway,
    PaymentStatus, Platform, TokenData, WalletType,
};

use crate::host::NativeHost;
use crate::platform::{ShowOptions, ShowOutcome};
use crate::service::PaymentRequestService;

/// Order confirmed by the user.
#[derive(Debug, Clone, Default)]
pub struct CheckoutOrder {
    pub public_key: String,
    pub country_code: String,
    pub currency_code: String,
    pub amount: Decimal,
    /// Processor id of the input currency
    pub currency_id: u64,
    /// Settlement currency, only when the merchant auto-captures
    pub output_currency_id: Option<u64>,
    pub idempotency_key: Option<String>,
}

/// How a checkout attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Token accepted by the processor. Follow `redirect_url` if present.
    Submitted(GatewayReceipt),
    /// The user dismissed the sheet. Nothing to report.
    Canceled,
    /// A payment was already submitted from this checkout.
    AlreadySubmitted,
    /// The order was incomplete; no sheet was shown.
    Rejected(String),
    /// The payment failed and should be reported.
    Failed(String),
}

/// Headless checkout for one confirmation screen.
///
/// Generic over `G: PaymentGateway` - the processor adapter is injected.
pub struct Checkout<G: PaymentGateway> {
    host: NativeHost,
    gateway: G,
    submitted: AtomicBool,
}

impl<G: PaymentGateway> Checkout<G> {
    pub fn new(host: NativeHost, gateway: G) -> Self {
        Self {
            host,
            gateway,
            submitted: AtomicBool::new(false),
        }
    }

    /// Returns a reference to the gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Pays for the order with the device's wallet.
    ///
    /// Only the first call on a checkout reaches the wallet.
    #[instrument(skip_all, fields(platform = %self.host.platform()))]
    pub async fn pay(&self, order: &CheckoutOrder) -> CheckoutOutcome {
        if self.submitted.swap(true, Ordering::SeqCst) {
            return CheckoutOutcome::AlreadySubmitted;
        }

        let context = match order_context(order) {
            Ok(context) => context,
            Err(err) => {
                error!(error = %err, "checkout called without a complete order");
                return CheckoutOutcome::Rejected(err.to_string());
            }
        };

        let service = match PaymentRequestService::new(&self.host, context).await {
            Ok(service) => service,
            Err(err) => return CheckoutOutcome::Failed(err.to_string()),
        };

        match service.platform() {
            Platform::Ios => self.pay_with_apple(&service, order).await,
            Platform::Android => self.pay_with_google(&service, order).await,
        }
    }

    async fn pay_with_apple(
        &self,
        service: &PaymentRequestService,
        order: &CheckoutOrder,
    ) -> CheckoutOutcome {
        let accepted = match service.show(ShowOptions::default()).await {
            Ok(ShowOutcome::Presented(acceptance)) => acceptance.await,
            Ok(ShowOutcome::Authorized(_)) => Err(PaymentError::InvalidState(
                "apple pay request settled with a google pay token",
            )),
            Err(err) => Err(err),
        };

        let response = match accepted {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "apple pay payment not accepted");
                if let Err(abort_err) = service.abort().await {
                    warn!(error = %abort_err, "failed to abort apple pay request");
                }
                return CheckoutOutcome::Failed(err.to_string());
            }
        };

        let outcome = match response.details().token_data() {
            Ok(token) => self.submit(WalletType::ApplePay, TokenData::Apple(token), order).await,
            Err(err) => CheckoutOutcome::Failed(err.to_string()),
        };

        let status = match outcome {
            CheckoutOutcome::Submitted(_) => PaymentStatus::Success,
            _ => PaymentStatus::Failure,
        };
        if let Err(err) = response.complete(status).await {
            warn!(error = %err, "failed to complete apple pay sheet");
        }

        outcome
    }

    async fn pay_with_google(
        &self,
        service: &PaymentRequestService,
        order: &CheckoutOrder,
    ) -> CheckoutOutcome {
        let token = match service.show(ShowOptions::default()).await {
            Ok(ShowOutcome::Authorized(token)) => token,
            Ok(ShowOutcome::Presented(_)) => {
                return CheckoutOutcome::Failed(
                    "google pay request settled with an apple pay acceptance".to_string(),
                );
            }
            Err(err) if err.is_cancellation() => return CheckoutOutcome::Canceled,
            Err(err) => return CheckoutOutcome::Failed(err.to_string()),
        };

        match token.token_data() {
            Ok(token) => {
                self.submit(WalletType::GooglePay, TokenData::Google(token), order)
                    .await
            }
            Err(err) => CheckoutOutcome::Failed(err.to_string()),
        }
    }

    async fn submit(
        &self,
        wallet: WalletType,
        token_data: TokenData,
        order: &CheckoutOrder,
    ) -> CheckoutOutcome {
        let request = MobilePaymentRequest {
            wallet,
            token_data,
            amount: order.amount,
            currency_id: order.currency_id,
            output_currency_id: order.output_currency_id,
            idempotency_key: order.idempotency_key.clone(),
        };

        match self.gateway.request_mobile_payment(request).await {
            Ok(receipt) => {
                info!(reference = %receipt.reference, "mobile payment submitted");
                CheckoutOutcome::Submitted(receipt)
            }
            Err(err) => {
                warn!(error = %err, "mobile payment rejected");
                CheckoutOutcome::Failed(err.to_string())
            }
        }
    }

    /// Lets the user add a card to the wallet without paying.
    ///
    /// Apple Pay has a dedicated flow. Google Pay has none, so a zero-amount
    /// request is shown without the network check; dismissing it is not an error.
    #[instrument(skip_all, fields(platform = %self.host.platform()))]
    pub async fn add_card(
        &self,
        public_key: &str,
        country_code: &str,
        currency_code: &str,
    ) -> Result<(), PaymentError> {
        if self.host.platform() == Platform::Ios {
            return PaymentRequestService::setup(&self.host).await;
        }

        let context = MerchantContext::new(public_key, country_code, currency_code, Decimal::ZERO)?;
        let service = PaymentRequestService::new(&self.host, context).await?;
        let options = ShowOptions {
            require_network_check: false,
        };

        match service.show(options).await {
            Ok(_) => {
                info!("google pay card setup finished");
                Ok(())
            }
            Err(err) if err.is_cancellation() => Ok(()),
            Err(err) => Err(err),
        }
    }
}

fn order_context(order: &CheckoutOrder) -> Result<MerchantContext, PaymentError> {
    if order.amount <= Decimal::ZERO {
        return Err(PaymentError::InvalidArgument(
            "amount must be positive".to_string(),
        ));
    }

    let context = MerchantContext::new(
        order.public_key.as_str(),
        order.country_code.as_str(),
        order.currency_code.as_str(),
        order.amount,
    )?;

    Ok(match &order.idempotency_key {
        Some(key) => context.with_idempotency_key(key.clone()),
        None => context,
    })
}
