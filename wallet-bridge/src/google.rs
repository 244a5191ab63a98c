//! Simulated Google Pay module.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;
use wallet_types::{
    Environment, GooglePayModule, GooglePayRequest, NativeError, CANCELLATION_MARKER,
};

/// How the simulated user answers the Google Pay sheet.
#[derive(Debug, Clone)]
pub enum GoogleScript {
    /// Resolve with the given serialized token.
    Token(String),
    /// The user dismisses the sheet.
    Cancel,
    Fail(NativeError),
}

impl GoogleScript {
    /// Resolves with a well-formed sample token.
    pub fn token() -> Self {
        GoogleScript::Token(sample_token())
    }
}

/// Serialized Google Pay token in the shape the module returns.
pub fn sample_token() -> String {
    json!({
        "protocolVersion": "ECv2",
        "signature": "c2ltdWxhdGVkLXNpZ25hdHVyZQ==",
        "signedMessage": "{\"encryptedMessage\":\"c2ltdWxhdGVk\",\"tag\":\"dGFn\"}"
    })
    .to_string()
}

/// In-process Google Pay module.
pub struct SimulatedGooglePay {
    script: GoogleScript,
    ready: bool,
    calls: Mutex<Vec<String>>,
    requests: Mutex<Vec<GooglePayRequest>>,
}

impl SimulatedGooglePay {
    pub fn new(script: GoogleScript) -> Self {
        Self {
            script,
            ready: true,
            calls: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sets the readiness probe answer.
    pub fn with_readiness(mut self, ready: bool) -> Self {
        self.ready = ready;
        self
    }

    /// Native calls received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    /// Requests passed to `request_payment`.
    pub fn requests(&self) -> Vec<GooglePayRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl GooglePayModule for SimulatedGooglePay {
    async fn request_payment(
        &self,
        environment: Environment,
        request: &GooglePayRequest,
        require_network_check: bool,
    ) -> Result<String, NativeError> {
        lock(&self.calls).push(format!("request:{environment}:{require_network_check}"));
        lock(&self.requests).push(request.clone());
        debug!(
            gateway = %request.card_payment_method_map.gateway.name,
            total = %request.transaction.total_price,
            "simulated google pay sheet shown"
        );

        match &self.script {
            GoogleScript::Token(token) => Ok(token.clone()),
            GoogleScript::Cancel => Err(NativeError::with_code(
                "CANCELED",
                format!("Error: {CANCELLATION_MARKER}"),
            )),
            GoogleScript::Fail(err) => Err(err.clone()),
        }
    }

    async fn possibly_show_google_pay_button(
        &self,
        environment: Environment,
        networks: &[&str],
        existing_payment_method_required: bool,
    ) -> Result<bool, NativeError> {
        lock(&self.calls).push(format!(
            "probe:{environment}:{}:{existing_payment_method_required}",
            networks.join(",")
        ));
        Ok(self.ready)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wallet_types::{PaymentError, VendorConfig};

    fn request() -> GooglePayRequest {
        let ctx = wallet_types::MerchantContext::new(
            "pk_test",
            "US",
            "USD",
            rust_decimal::Decimal::new(1000, 2),
        )
        .unwrap();
        GooglePayRequest::new(&VendorConfig::default(), &ctx)
    }

    #[tokio::test]
    async fn test_cancel_is_recognized_as_cancellation() {
        let module = SimulatedGooglePay::new(GoogleScript::Cancel);

        let err = module
            .request_payment(Environment::Test, &request(), true)
            .await
            .unwrap_err();

        assert!(PaymentError::from_google_rejection(err).is_cancellation());
    }

    #[tokio::test]
    async fn test_sample_token_parses() {
        let module = SimulatedGooglePay::new(GoogleScript::token());

        let raw = module
            .request_payment(Environment::Production, &request(), false)
            .await
            .unwrap();
        let token = wallet_types::GooglePayToken::new(raw).token_data().unwrap();

        assert_eq!(token.protocol_version, "ECv2");
        assert_eq!(module.calls(), vec!["request:production:false"]);
        assert_eq!(module.requests().len(), 1);
    }
}
