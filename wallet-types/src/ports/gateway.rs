//! Payment processor port.
//!
//! Receives wallet tokens once the sheet has produced one. Implementations
//! can be HTTP clients, simulated processors, etc.

use crate::dto::{GatewayReceipt, MobilePaymentRequest};
use crate::error::GatewayError;

/// Port trait for the processor that charges wallet tokens.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Submits a wallet token for payment.
    async fn request_mobile_payment(
        &self,
        req: MobilePaymentRequest,
    ) -> Result<GatewayReceipt, GatewayError>;
}
