//! Configuration loading from environment.

use std::env;

use wallet_types::{Environment, Platform, VendorConfig};

/// CLI configuration.
pub struct Config {
    pub platform: Platform,
    pub environment: Environment,
    pub vendor: VendorConfig,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let platform: Platform = env::var("WALLET_PLATFORM")
            .unwrap_or_else(|_| "ios".to_string())
            .parse()
            .map_err(anyhow::Error::msg)?;

        let environment: Environment = env::var("WALLET_ENVIRONMENT")
            .unwrap_or_else(|_| "test".to_string())
            .parse()
            .map_err(anyhow::Error::msg)?;

        let mut vendor = VendorConfig::default();
        if let Ok(merchant_id) = env::var("WALLET_MERCHANT_ID") {
            match environment {
                Environment::Production => vendor.merchant_id = merchant_id,
                Environment::Test => vendor.merchant_id_sandbox = merchant_id,
            }
        }
        if let Ok(gateway_name) = env::var("WALLET_GATEWAY_NAME") {
            vendor.gateway_name = gateway_name;
        }
        if let Ok(display_name) = env::var("WALLET_DISPLAY_NAME") {
            vendor.display_name = display_name;
        }

        Ok(Self {
            platform,
            environment,
            vendor,
        })
    }
}
