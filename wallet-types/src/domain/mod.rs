//! Domain models for wallet payment requests.

pub mod context;
pub mod descriptor;
pub mod payment;
pub mod platform;

pub use context::MerchantContext;
pub use descriptor::{
    ApplePayMethodData, CardPaymentMethodMap, GatewayDescriptor, GooglePayRequest,
    GoogleTransaction, PaymentAmount, PaymentDetails, PaymentItem, TotalPriceStatus,
};
pub use payment::{
    ApplePayDetails, ApplePayTokenData, GooglePayToken, GooglePayTokenData, PaymentStatus,
    RequestId, UserAcceptDetails,
};
pub use platform::{CardNetwork, Environment, Platform};
