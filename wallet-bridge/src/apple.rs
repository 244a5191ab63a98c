//! Simulated Apple Pay module.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};
use wallet_types::{
    ApplePayMethodData, ApplePayModule, ListenerId, NativeError, PaymentDetails, PaymentStatus,
    UserAcceptDetails, UserAcceptListener, VendorConfig,
};

/// What the simulated user does once the sheet is on screen.
#[derive(Debug, Clone)]
pub enum AppleScript {
    /// Authorize after `delay` with the given payload.
    Accept {
        delay: Duration,
        details: UserAcceptDetails,
    },
    /// The sheet cannot be presented.
    FailPresentation(NativeError),
    /// Nothing happens until the request is aborted.
    Idle,
}

impl AppleScript {
    /// Authorizes shortly after presentation with a sample token.
    pub fn accept() -> Self {
        AppleScript::Accept {
            delay: Duration::from_millis(10),
            details: sample_acceptance(),
        }
    }
}

/// Sample user-accept payload carrying a well-formed token.
pub fn sample_acceptance() -> UserAcceptDetails {
    UserAcceptDetails {
        transaction_identifier: Some(uuid::Uuid::new_v4().to_string()),
        payment_data: json!({
            "version": "EC_v1",
            "data": "c2ltdWxhdGVkLXBheW1lbnQtZGF0YQ==",
            "signature": "c2ltdWxhdGVkLXNpZ25hdHVyZQ==",
            "header": {
                "ephemeralPublicKey": "c2ltdWxhdGVkLWtleQ==",
                "publicKeyHash": "c2ltdWxhdGVkLWhhc2g=",
                "transactionId": "simulated"
            }
        })
        .to_string(),
        payment_token: Some("simulated-token".to_string()),
        payment_method: Some(json!({ "network": "Visa", "type": "debit" })),
        ..Default::default()
    }
}

type Listeners = Arc<Mutex<HashMap<u64, (String, UserAcceptListener)>>>;

/// In-process Apple Pay module.
///
/// Listeners are invoked outside the registry lock, so a listener may
/// remove itself while handling an event.
pub struct SimulatedApplePay {
    script: AppleScript,
    accept_event: String,
    available: bool,
    cards: Vec<String>,
    listeners: Listeners,
    next_listener: AtomicU64,
    calls: Mutex<Vec<String>>,
    sheet_open: AtomicBool,
}

impl SimulatedApplePay {
    pub fn new(script: AppleScript) -> Self {
        Self {
            script,
            accept_event: VendorConfig::default().user_accept_event,
            available: true,
            cards: vec!["Visa".to_string()],
            listeners: Arc::new(Mutex::new(HashMap::new())),
            next_listener: AtomicU64::new(1),
            calls: Mutex::new(Vec::new()),
            sheet_open: AtomicBool::new(false),
        }
    }

    /// Sets the event name the scripted authorization is fired under.
    pub fn with_accept_event(mut self, event: impl Into<String>) -> Self {
        self.accept_event = event.into();
        self
    }

    /// Sets whether the device supports Apple Pay.
    pub fn with_availability(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Sets the networks of the cards held in the wallet.
    pub fn with_cards(mut self, networks: &[&str]) -> Self {
        self.cards = networks.iter().map(|n| n.to_string()).collect();
        self
    }

    /// Native calls received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).len()
    }

    pub fn is_sheet_open(&self) -> bool {
        self.sheet_open.load(Ordering::SeqCst)
    }

    /// Fires the user-accept event to every listener of `event`.
    pub fn emit(&self, event: &str, details: UserAcceptDetails) {
        emit(&self.listeners, event, details);
    }

    fn record(&self, call: impl Into<String>) {
        lock(&self.calls).push(call.into());
    }
}

#[async_trait]
impl ApplePayModule for SimulatedApplePay {
    fn add_listener(&self, event: &str, listener: UserAcceptListener) -> ListenerId {
        let id = self.next_listener.fetch_add(1, Ordering::SeqCst);
        lock(&self.listeners).insert(id, (event.to_string(), listener));
        ListenerId(id)
    }

    fn remove_listener(&self, id: ListenerId) {
        lock(&self.listeners).remove(&id.0);
    }

    async fn create_payment_request(
        &self,
        method_data: &ApplePayMethodData,
        details: &PaymentDetails,
    ) -> Result<(), NativeError> {
        debug!(
            merchant = %method_data.merchant_identifier,
            total = %details.total.amount.value,
            "simulated apple pay request created"
        );
        self.record("createPaymentRequest");
        Ok(())
    }

    async fn show(&self) -> Result<(), NativeError> {
        self.record("show");
        match &self.script {
            AppleScript::FailPresentation(err) => Err(err.clone()),
            AppleScript::Idle => {
                self.sheet_open.store(true, Ordering::SeqCst);
                Ok(())
            }
            AppleScript::Accept { delay, details } => {
                self.sheet_open.store(true, Ordering::SeqCst);
                let listeners = self.listeners.clone();
                let event = self.accept_event.clone();
                let details = details.clone();
                let delay = *delay;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    info!("simulated user authorized apple pay payment");
                    emit(&listeners, &event, details);
                });
                Ok(())
            }
        }
    }

    async fn abort(&self) -> Result<(), NativeError> {
        self.record("abort");
        self.sheet_open.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn complete(&self, status: PaymentStatus) -> Result<(), NativeError> {
        self.record(format!("complete:{status}"));
        self.sheet_open.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn setup(&self) -> Result<(), NativeError> {
        self.record("setup");
        Ok(())
    }

    fn can_make_payments(&self) -> bool {
        self.available
    }

    async fn can_make_payments_using_networks(
        &self,
        networks: &[&str],
    ) -> Result<bool, NativeError> {
        Ok(self.available && self.cards.iter().any(|card| networks.contains(&card.as_str())))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn emit(listeners: &Listeners, event: &str, details: UserAcceptDetails) {
    let targets: Vec<UserAcceptListener> = lock(listeners)
        .values()
        .filter(|(name, _)| name == event)
        .map(|(_, listener)| listener.clone())
        .collect();
    for listener in targets {
        listener(details.clone());
    }
}
