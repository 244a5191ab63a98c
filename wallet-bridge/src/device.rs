use wallet_types::{DeviceInfo, Platform};

/// Device with a fixed platform identity.
#[derive(Debug, Clone, Copy)]
pub struct StaticDevice(pub Platform);

impl DeviceInfo for StaticDevice {
    fn platform(&self) -> Platform {
        self.0
    }
}
