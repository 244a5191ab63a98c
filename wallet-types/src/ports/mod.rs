//! Port traits (interfaces for adapters).
//!
//! These are the contracts the host's native bridge and the payment
//! processor must implement. The request layer depends on these traits,
//! never on a concrete bridge.

mod gateway;
mod native;

pub use gateway::PaymentGateway;
pub use native::{ApplePayModule, DeviceInfo, GooglePayModule, ListenerId, UserAcceptListener};
