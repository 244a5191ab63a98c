//! Platform identity, execution environment and card networks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mobile platform the application is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple Pay, event driven native module
    Ios,
    /// Google Pay, promise based native module
    Android,
}

impl Platform {
    /// Human readable wallet name.
    pub fn wallet_name(&self) -> &'static str {
        match self {
            Platform::Ios => "Apple Pay",
            Platform::Android => "Google Pay",
        }
    }

    /// Payment method identifier carried by responses.
    pub fn method_name(&self) -> &'static str {
        match self {
            Platform::Ios => "apple-pay",
            Platform::Android => "google-pay",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Ios => write!(f, "ios"),
            Platform::Android => write!(f, "android"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(format!("unknown platform: {other}")),
        }
    }
}

/// Execution environment of the host application.
///
/// The test environment selects sandbox merchants and test wallets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Test,
}

impl Environment {
    pub fn is_test(&self) -> bool {
        matches!(self, Environment::Test)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => write!(f, "production"),
            Environment::Test => write!(f, "test"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "test" | "dev" | "development" => Ok(Environment::Test),
            other => Err(format!("unknown environment: {other}")),
        }
    }
}

/// Card networks accepted on the payment sheets.
///
/// Each native module spells the networks differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardNetwork {
    Visa,
    Mastercard,
}

impl CardNetwork {
    /// Spelling used in the Apple Pay merchant descriptor.
    pub fn apple_method_name(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "visa",
            CardNetwork::Mastercard => "mastercard",
        }
    }

    /// Spelling used by the Apple Pay availability probe.
    pub fn apple_probe_name(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "Visa",
            CardNetwork::Mastercard => "MasterCard",
        }
    }

    /// Spelling used by the Google Pay module.
    pub fn google_name(&self) -> &'static str {
        match self {
            CardNetwork::Visa => "VISA",
            CardNetwork::Mastercard => "MASTERCARD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parse() {
        assert_eq!("iOS".parse::<Platform>().unwrap(), Platform::Ios);
        assert_eq!(" android ".parse::<Platform>().unwrap(), Platform::Android);
        assert!("windows".parse::<Platform>().is_err());
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Test);
        assert_eq!(
            "PRODUCTION".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!(Environment::default(), Environment::Production);
    }

    #[test]
    fn test_network_spellings() {
        assert_eq!(CardNetwork::Mastercard.apple_method_name(), "mastercard");
        assert_eq!(CardNetwork::Mastercard.apple_probe_name(), "MasterCard");
        assert_eq!(CardNetwork::Mastercard.google_name(), "MASTERCARD");
    }
}
