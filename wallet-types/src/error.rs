//! Error types for wallet payment requests.

use crate::domain::Platform;

/// Substring the Google Pay module puts in the rejection message when the
/// user dismisses the sheet.
pub const CANCELLATION_MARKER: &str = "payment has been canceled";

/// Error surfaced by a native payment module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct NativeError {
    /// Native error code, when the bridge provides one
    pub code: Option<String>,
    pub message: String,
}

impl NativeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Coarse classification of a [`PaymentError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    Native,
    Canceled,
    Aborted,
    InvalidState,
    Unsupported,
    ModuleUnavailable,
    InvalidPayload,
}

/// Errors returned by payment request operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PaymentError {
    /// Merchant context is incomplete; no native call was issued.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Native error: {0}")]
    Native(#[from] NativeError),

    /// The user dismissed the payment sheet.
    #[error("Payment canceled by user: {0}")]
    Canceled(String),

    /// The request was aborted by the caller.
    #[error("AbortError")]
    Aborted,

    #[error("InvalidStateError: {0}")]
    InvalidState(&'static str),

    #[error("Unsupported operation on {platform}: {operation}")]
    Unsupported {
        platform: Platform,
        operation: &'static str,
    },

    #[error("Native payment module unavailable for {0}")]
    ModuleUnavailable(Platform),

    #[error("Invalid payment payload: {0}")]
    InvalidPayload(String),
}

impl PaymentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PaymentError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            PaymentError::Native(_) => ErrorKind::Native,
            PaymentError::Canceled(_) => ErrorKind::Canceled,
            PaymentError::Aborted => ErrorKind::Aborted,
            PaymentError::InvalidState(_) => ErrorKind::InvalidState,
            PaymentError::Unsupported { .. } => ErrorKind::Unsupported,
            PaymentError::ModuleUnavailable(_) => ErrorKind::ModuleUnavailable,
            PaymentError::InvalidPayload(_) => ErrorKind::InvalidPayload,
        }
    }

    /// Returns true if the user dismissed the sheet.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, PaymentError::Canceled(_))
    }

    /// Returns true if the failure should be reported to the user.
    ///
    /// User cancellation and caller-initiated aborts are silent outcomes.
    pub fn is_reportable(&self) -> bool {
        !matches!(self, PaymentError::Canceled(_) | PaymentError::Aborted)
    }

    /// Classifies a rejection from the Google Pay module.
    pub fn from_google_rejection(err: NativeError) -> Self {
        if err.message.contains(CANCELLATION_MARKER) {
            PaymentError::Canceled(err.message)
        } else {
            PaymentError::Native(err)
        }
    }
}

impl From<serde_json::Error> for PaymentError {
    fn from(err: serde_json::Error) -> Self {
        PaymentError::InvalidPayload(err.to_string())
    }
}

/// Errors returned by the payment gateway port.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GatewayError {
    #[error("Payment rejected: {0}")]
    Rejected(String),

    #[error("Gateway unavailable: {0}")]
    Unavailable(String),
}
