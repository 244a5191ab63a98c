//! # Wallet Types
//!
//! Domain types, vendor configuration and port traits for wallet payment
//! requests (Apple Pay / Google Pay).
//! This crate performs no IO - only data structures, payload shapes, and
//! trait definitions for the native bridge.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Merchant context, platform identity, native payload shapes
//! - `ports/` - Native module and gateway traits that adapters must implement
//! - `dto/` - Payloads handed to the payment processor
//! - `config/` - Vendor constants (merchant identifiers, networks, labels)
//! - `error/` - Payment error taxonomy

pub mod config;
pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use config::VendorConfig;
pub use domain::{
    ApplePayDetails, ApplePayMethodData, ApplePayTokenData, CardNetwork, Environment,
    GooglePayRequest, GooglePayToken, GooglePayTokenData, MerchantContext, PaymentDetails,
    PaymentStatus, Platform, RequestId, UserAcceptDetails,
};
pub use dto::*;
pub use error::{CANCELLATION_MARKER, ErrorKind, GatewayError, NativeError, PaymentError};
pub use ports::{
    ApplePayModule, DeviceInfo, GooglePayModule, ListenerId, PaymentGateway, UserAcceptListener,
};
