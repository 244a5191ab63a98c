//! Apple Pay payment request.
//!
//! The native module splits a payment across two channels: `show` only
//! acknowledges that the sheet was presented, while the authorized payment
//! arrives later through the user-accept event. The request models this as
//! a state machine:
//!
//! ```text
//! Created -> AwaitingAcceptance -> Accepted
//!                  |
//!                  +-------------> Aborted
//! ```
//!
//! The acceptance future is installed before the native `show` call is
//! issued, so an event delivered ahead of the show acknowledgement is still
//! captured.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tracing::{debug, info, instrument, warn};
use wallet_types::{
    ApplePayDetails, ApplePayMethodData, ApplePayModule, Environment, ListenerId,
    MerchantContext, PaymentDetails, PaymentError, RequestId, UserAcceptDetails,
    UserAcceptListener, VendorConfig,
};

use crate::response::PaymentResponse;

type AcceptResult = Result<PaymentResponse, PaymentError>;

/// Lifecycle state of an Apple Pay request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    /// Native request created, sheet not shown yet
    Created,
    /// Sheet presented, waiting for the user-accept event
    AwaitingAcceptance,
    /// User authorized the payment
    Accepted,
    /// Aborted by the caller or by a presentation failure
    Aborted,
}

struct Slots {
    state: RequestState,
    pending: Option<oneshot::Sender<AcceptResult>>,
    subscription: Option<ListenerId>,
}

/// State shared with the native event listener.
///
/// The listener only holds a weak reference, so a registered listener never
/// keeps a dropped request alive.
struct Shared {
    id: RequestId,
    module: Arc<dyn ApplePayModule>,
    slots: Mutex<Slots>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Slots> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self, subscription: Option<ListenerId>) {
        if let Some(id) = subscription {
            self.module.remove_listener(id);
            debug!(request_id = %self.id, "user accept listener released");
        }
    }

    /// Rejects the pending acceptance and moves to `Aborted`, provided
    /// `applies` holds for the current state. Returns whether it did.
    fn reject_when(
        &self,
        error: PaymentError,
        applies: impl FnOnce(RequestState) -> bool,
    ) -> bool {
        let (pending, subscription) = {
            let mut slots = self.lock();
            if !applies(slots.state) {
                return false;
            }
            slots.state = RequestState::Aborted;
            (slots.pending.take(), slots.subscription.take())
        };
        self.release(subscription);
        if let Some(pending) = pending {
            let _ = pending.send(Err(error));
        }
        true
    }

    fn handle_user_accept(&self, event: UserAcceptDetails) {
        let (pending, subscription) = {
            let mut slots = self.lock();
            if slots.state != RequestState::AwaitingAcceptance {
                debug!(request_id = %self.id, state = ?slots.state, "ignoring user accept event");
                return;
            }
            let Some(pending) = slots.pending.take() else {
                return;
            };
            slots.state = RequestState::Accepted;
            (pending, slots.subscription.take())
        };
        self.release(subscription);

        let response =
            PaymentResponse::new(self.id, ApplePayDetails::from(event), self.module.clone());
        info!(request_id = %self.id, "payment accepted by user");
        if pending.send(Ok(response)).is_err() {
            warn!(request_id = %self.id, "acceptance handle dropped before payment arrived");
        }
    }
}

/// Apple Pay request for a single payment attempt.
pub struct ApplePlatformRequest {
    shared: Arc<Shared>,
    method_data: ApplePayMethodData,
    details: PaymentDetails,
}

impl ApplePlatformRequest {
    /// Builds the descriptors, subscribes to the user-accept event and
    /// creates the native request.
    ///
    /// A native create failure is logged and does not fail construction.
    pub async fn new(
        module: Arc<dyn ApplePayModule>,
        config: &VendorConfig,
        environment: Environment,
        ctx: &MerchantContext,
    ) -> Self {
        let shared = Arc::new(Shared {
            id: RequestId::new(),
            module,
            slots: Mutex::new(Slots {
                state: RequestState::Created,
                pending: None,
                subscription: None,
            }),
        });
        let method_data = ApplePayMethodData::new(config, environment, ctx);
        let details = PaymentDetails::new(config, ctx);

        let subscription = shared
            .module
            .add_listener(&config.user_accept_event, listener(Arc::downgrade(&shared)));
        shared.lock().subscription = Some(subscription);

        if let Err(err) = shared
            .module
            .create_payment_request(&method_data, &details)
            .await
        {
            warn!(request_id = %shared.id, error = %err, "failed to create native payment request");
        }

        Self {
            shared,
            method_data,
            details,
        }
    }

    pub fn id(&self) -> RequestId {
        self.shared.id
    }

    pub fn state(&self) -> RequestState {
        self.shared.lock().state
    }

    pub fn method_data(&self) -> &ApplePayMethodData {
        &self.method_data
    }

    pub fn details(&self) -> &PaymentDetails {
        &self.details
    }

    /// Presents the payment sheet.
    ///
    /// Resolves once the sheet is on screen. The payment itself is delivered
    /// through the returned [`Acceptance`].
    #[instrument(skip(self), fields(request_id = %self.shared.id))]
    pub async fn show(&self) -> Result<Acceptance, PaymentError> {
        let receiver = {
            let mut slots = self.shared.lock();
            if slots.state != RequestState::Created {
                return Err(PaymentError::InvalidState(
                    "payment sheet can only be shown once per request",
                ));
            }
            let (sender, receiver) = oneshot::channel();
            slots.pending = Some(sender);
            slots.state = RequestState::AwaitingAcceptance;
            receiver
        };

        if let Err(err) = self.shared.module.show().await {
            let rejected = self
                .shared
                .reject_when(PaymentError::Native(err.clone()), |state| {
                    state == RequestState::AwaitingAcceptance
                });
            // the payment arrived while the sheet was still reporting
            if !rejected && self.state() == RequestState::Accepted {
                warn!(error = %err, "payment sheet error after the payment was accepted");
                return Ok(Acceptance {
                    request_id: self.shared.id,
                    receiver,
                });
            }
            warn!(error = %err, "failed to present payment sheet");
            return Err(PaymentError::Native(err));
        }

        debug!("payment sheet presented");
        Ok(Acceptance {
            request_id: self.shared.id,
            receiver,
        })
    }

    /// Aborts the request and dismisses the sheet.
    ///
    /// The pending acceptance is rejected with `Aborted` and the event
    /// subscription released before the native call. Aborting twice is a no-op.
    /// An accepted request stays `Accepted`; only the sheet is dismissed.
    #[instrument(skip(self), fields(request_id = %self.shared.id))]
    pub async fn abort(&self) -> Result<(), PaymentError> {
        let aborted = self.shared.reject_when(PaymentError::Aborted, |state| {
            matches!(
                state,
                RequestState::Created | RequestState::AwaitingAcceptance
            )
        });
        if !aborted {
            if self.state() == RequestState::Accepted {
                self.shared.module.abort().await?;
                info!("payment sheet dismissed after acceptance");
            } else {
                debug!("payment request already aborted");
            }
            return Ok(());
        }

        self.shared.module.abort().await?;
        info!("payment request aborted");
        Ok(())
    }

    /// Opens the native add-card flow. No payment takes place.
    pub async fn setup(module: &dyn ApplePayModule) -> Result<(), PaymentError> {
        module.setup().await?;
        debug!("apple pay setup finished");
        Ok(())
    }

    /// Whether the device supports Apple Pay.
    pub fn can_make_payments(module: &dyn ApplePayModule) -> bool {
        module.can_make_payments()
    }

    /// Whether the wallet holds a card on one of the supported networks.
    ///
    /// A native probe error reads as "no usable card".
    pub async fn can_make_payments_using_networks(
        module: &dyn ApplePayModule,
        config: &VendorConfig,
    ) -> Result<bool, PaymentError> {
        let networks: Vec<&str> = config
            .apple_networks
            .iter()
            .map(|n| n.apple_probe_name())
            .collect();

        match module.can_make_payments_using_networks(&networks).await {
            Ok(available) => Ok(available),
            Err(err) => {
                warn!(error = %err, "apple pay network probe failed");
                Ok(false)
            }
        }
    }
}

impl Drop for ApplePlatformRequest {
    fn drop(&mut self) {
        let subscription = self.shared.lock().subscription.take();
        if subscription.is_some() {
            warn!(request_id = %self.shared.id, "payment request dropped before it settled");
            self.shared.release(subscription);
        }
    }
}

fn listener(shared: Weak<Shared>) -> UserAcceptListener {
    Arc::new(move |event: UserAcceptDetails| match shared.upgrade() {
        Some(shared) => shared.handle_user_accept(event),
        None => debug!("user accept event for a dropped payment request"),
    })
}

/// Resolves with the response envelope once the user authorizes the payment.
///
/// Rejects with `Aborted` if the request is aborted (or dropped) first, or
/// with the native error if the sheet could not be presented.
#[derive(Debug)]
pub struct Acceptance {
    request_id: RequestId,
    receiver: oneshot::Receiver<AcceptResult>,
}

impl Acceptance {
    pub fn request_id(&self) -> RequestId {
        self.request_id
    }
}

impl Future for Acceptance {
    type Output = AcceptResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|result| result.unwrap_or(Err(PaymentError::Aborted)))
    }
}
