//! # Wallet Hex
//!
//! Payment request service for in-app wallet payments.
//!
//! ## Architecture
//!
//! - `host/` - Injected native capabilities (device identity, native modules, vendor config)
//! - `platform/` - Apple Pay (event driven) and Google Pay (promise based) requests
//! - `response/` - One-shot Apple Pay response envelope
//! - `service/` - Platform-selecting facade
//! - `checkout/` - Headless checkout flow driving the facade and the gateway port
//!
//! Native modules are injected through [`NativeHost`], so every component
//! runs against mock or simulated bridges in tests.

pub mod checkout;
pub mod host;
pub mod platform;
pub mod response;
pub mod service;


pub use checkout::{Checkout, CheckoutOrder, CheckoutOutcome};
pub use host::{NativeHost, NativeHostBuilder};
pub use platform::{
    Acceptance, ApplePlatformRequest, GooglePlatformRequest, PlatformRequest, RequestState,
    ShowOptions, ShowOutcome,
};
pub use response::PaymentResponse;
pub use service::PaymentRequestService;
