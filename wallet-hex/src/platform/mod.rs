//! Platform-specific payment requests.
//!
//! The variant set is closed: one request type per wallet, selected once
//! when the facade is constructed.

mod apple;
mod google;

pub use apple::{Acceptance, ApplePlatformRequest, RequestState};
pub use google::GooglePlatformRequest;

use wallet_types::{GooglePayToken, Platform};

/// The request owned by a facade.
pub enum PlatformRequest {
    Apple(ApplePlatformRequest),
    Google(GooglePlatformRequest),
}

impl PlatformRequest {
    pub fn platform(&self) -> Platform {
        match self {
            PlatformRequest::Apple(_) => Platform::Ios,
            PlatformRequest::Google(_) => Platform::Android,
        }
    }
}

/// Options for showing the payment sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShowOptions {
    /// Google Pay only: require a usable card on a supported network.
    /// Turning it off lets the user add a card without paying.
    pub require_network_check: bool,
}

impl Default for ShowOptions {
    fn default() -> Self {
        Self {
            require_network_check: true,
        }
    }
}

/// What `show` settled with.
#[derive(Debug)]
pub enum ShowOutcome {
    /// Apple Pay sheet is on screen; the payment arrives on the acceptance.
    Presented(Acceptance),
    /// Google Pay token, terminal on arrival.
    Authorized(GooglePayToken),
}

impl ShowOutcome {
    pub fn into_acceptance(self) -> Option<Acceptance> {
        match self {
            ShowOutcome::Presented(acceptance) => Some(acceptance),
            ShowOutcome::Authorized(_) => None,
        }
    }

    pub fn into_token(self) -> Option<GooglePayToken> {
        match self {
            ShowOutcome::Authorized(token) => Some(token),
            ShowOutcome::Presented(_) => None,
        }
    }
}
