use unitctl_client::{ClientConfig, Service};
use unitctl_core::Result;
use unitctl_logging::{LoggerBuilder, UserConfig};

/// Contents of `unitctl.toml`.
#[derive(Debug, Clone, Default, confique::Config)]
pub struct Settings {
    #[config(nested)]
    pub client: ClientConfig,
    #[config(nested)]
    pub logging: UserConfig,
}

impl Settings {
    pub fn service(&self) -> Result<Service> {
        Service::from_config(&self.client)
    }

    pub fn logger_builder(&self, name: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(name).with_config(self.logging.clone())
    }
}

#[cfg(test)]
#[path = "./settings_test.rs"]
mod settings_test;
