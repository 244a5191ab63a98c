//! # Wallet Bridge
//!
//! In-process adapters for the native ports of `wallet-types`.
//! The simulated modules follow the native contracts closely (listener
//! registry, sheet acknowledgement before the accept event, cancellation
//! messages) so the payment layer can be exercised without a device.

pub mod apple;
pub mod device;
pub mod gateway;
pub mod google;

pub use apple::{AppleScript, SimulatedApplePay};
pub use device::StaticDevice;
pub use gateway::SimulatedGateway;
pub use google::{GoogleScript, SimulatedGooglePay};
