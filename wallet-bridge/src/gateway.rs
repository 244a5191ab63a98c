//! In-memory payment processor.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;
use wallet_types::{GatewayError, GatewayReceipt, MobilePaymentRequest, PaymentGateway};

#[derive(Default)]
struct Ledger {
    requests: Vec<MobilePaymentRequest>,
    by_idempotency_key: HashMap<String, GatewayReceipt>,
}

/// Thread-safe processor that accepts every token unless told otherwise.
///
/// Requests carrying an idempotency key that was already charged get the
/// original receipt back.
#[derive(Default, Clone)]
pub struct SimulatedGateway {
    ledger: Arc<RwLock<Ledger>>,
    rejection: Option<String>,
    challenge_url: Option<String>,
}

impl SimulatedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects every payment with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            rejection: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Answers every payment with a 3-D Secure challenge at `url`.
    pub fn with_challenge(mut self, url: impl Into<String>) -> Self {
        self.challenge_url = Some(url.into());
        self
    }

    /// Requests received so far, including rejected ones.
    pub async fn requests(&self) -> Vec<MobilePaymentRequest> {
        self.ledger.read().await.requests.clone()
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn request_mobile_payment(
        &self,
        req: MobilePaymentRequest,
    ) -> Result<GatewayReceipt, GatewayError> {
        let mut ledger = self.ledger.write().await;
        ledger.requests.push(req.clone());

        if let Some(reason) = &self.rejection {
            warn!(amount = %req.amount, reason = %reason, "simulated gateway rejected payment");
            return Err(GatewayError::Rejected(reason.clone()));
        }

        if let Some(key) = &req.idempotency_key {
            if let Some(receipt) = ledger.by_idempotency_key.get(key) {
                info!(idempotency_key = %key, "replaying receipt for idempotent request");
                return Ok(receipt.clone());
            }
        }

        let receipt = GatewayReceipt {
            reference: Uuid::new_v4().to_string(),
            redirect_url: self.challenge_url.clone(),
        };
        if let Some(key) = req.idempotency_key {
            ledger.by_idempotency_key.insert(key, receipt.clone());
        }

        info!(
            reference = %receipt.reference,
            amount = %req.amount,
            wallet = ?req.wallet,
            "simulated gateway accepted payment"
        );
        Ok(receipt)
    }
}
