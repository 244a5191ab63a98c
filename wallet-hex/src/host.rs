//! Native capabilities injected into the payment request layer.

use std::sync::Arc;

use wallet_types::{
    ApplePayModule, DeviceInfo, Environment, GooglePayModule, PaymentError, Platform,
    VendorConfig,
};

/// Everything the host application provides to the payment layer.
///
/// Cheap to clone; native modules are shared handles.
#[derive(Clone)]
pub struct NativeHost {
    device: Arc<dyn DeviceInfo>,
    apple: Option<Arc<dyn ApplePayModule>>,
    google: Option<Arc<dyn GooglePayModule>>,
    config: Arc<VendorConfig>,
    environment: Environment,
}

impl NativeHost {
    pub fn builder(device: Arc<dyn DeviceInfo>) -> NativeHostBuilder {
        NativeHostBuilder {
            device,
            apple: None,
            google: None,
            config: VendorConfig::default(),
            environment: Environment::default(),
        }
    }

    /// Platform identity reported by the device.
    pub fn platform(&self) -> Platform {
        self.device.platform()
    }

    pub fn config(&self) -> &VendorConfig {
        &self.config
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Apple Pay module, if the host registered one.
    pub fn apple_module(&self) -> Result<&Arc<dyn ApplePayModule>, PaymentError> {
        self.apple
            .as_ref()
            .ok_or(PaymentError::ModuleUnavailable(Platform::Ios))
    }

    /// Google Pay module, if the host registered one.
    pub fn google_module(&self) -> Result<&Arc<dyn GooglePayModule>, PaymentError> {
        self.google
            .as_ref()
            .ok_or(PaymentError::ModuleUnavailable(Platform::Android))
    }
}

impl std::fmt::Debug for NativeHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeHost")
            .field("platform", &self.platform())
            .field("apple", &self.apple.is_some())
            .field("google", &self.google.is_some())
            .field("environment", &self.environment)
            .finish()
    }
}

/// Builder for [`NativeHost`].
pub struct NativeHostBuilder {
    device: Arc<dyn DeviceInfo>,
    apple: Option<Arc<dyn ApplePayModule>>,
    google: Option<Arc<dyn GooglePayModule>>,
    config: VendorConfig,
    environment: Environment,
}

impl NativeHostBuilder {
    pub fn apple(mut self, module: Arc<dyn ApplePayModule>) -> Self {
        self.apple = Some(module);
        self
    }

    pub fn google(mut self, module: Arc<dyn GooglePayModule>) -> Self {
        self.google = Some(module);
        self
    }

    pub fn config(mut self, config: VendorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn build(self) -> NativeHost {
        NativeHost {
            device: self.device,
            apple: self.apple,
            google: self.google,
            config: Arc::new(self.config),
            environment: self.environment,
        }
    }
}
