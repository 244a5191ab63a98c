//! Apple Pay response envelope.
//!
//! Produced once per authorized payment. The sheet stays up until the
//! caller reports the processing outcome through [`PaymentResponse::complete`],
//! which may happen exactly once.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, instrument};
use wallet_types::{
    ApplePayDetails, ApplePayModule, PaymentError, PaymentStatus, Platform, RequestId,
};

/// Terminal result of an accepted Apple Pay request.
pub struct PaymentResponse {
    request_id: RequestId,
    method_name: &'static str,
    details: ApplePayDetails,
    completed: AtomicBool,
    module: Arc<dyn ApplePayModule>,
}

impl PaymentResponse {
    pub(crate) fn new(
        request_id: RequestId,
        details: ApplePayDetails,
        module: Arc<dyn ApplePayModule>,
    ) -> Self {
        Self {
            request_id,
            method_name: Platform::Ios.method_name(),
            details,
            completed: AtomicBool::new(false),
            module,
        }
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn method_name(&self) -> &str {
        self.method_name
    }

    pub fn details(&self) -> &ApplePayDetails {
        &self.details
    }

    /// Returns true once `complete` has been called, whatever its outcome.
    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    /// Reports the processing outcome to the sheet.
    ///
    /// A second call fails with `InvalidState` without reaching the native
    /// module. A failed native acknowledgement still consumes the call.
    #[instrument(skip(self), fields(request_id = %self.request_id))]
    pub async fn complete(&self, status: PaymentStatus) -> Result<(), PaymentError> {
        if self.completed.swap(true, Ordering::SeqCst) {
            return Err(PaymentError::InvalidState("complete() has already been called"));
        }

        self.module.complete(status).await?;
        debug!("payment sheet completed");
        Ok(())
    }
}

impl fmt::Debug for PaymentResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaymentResponse")
            .field("request_id", &self.request_id)
            .field("method_name", &self.method_name)
            .field("details", &self.details)
            .field("completed", &self.is_completed())
            .finish()
    }
}
