use unitctl_core::{Action, Result};

use crate::bus::ManagerSession;
use crate::{ClientConfig, Registry, ServiceHandler, UnitFileStatus, UnitStatus};

/// A service controlled through the handler chosen at construction.
#[derive(Debug)]
pub struct Service {
    handler: Box<dyn ServiceHandler>,
}

impl Service {
    /// Binds the built-in handler registered as `handler_type` with the default configuration.
    pub fn new(handler_type: &str) -> Result<Self> {
        Self::from_registry(Registry::global(), handler_type, &ClientConfig::default())
    }

    /// Binds the built-in handler named by `config.handler_type`.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::from_registry(Registry::global(), &config.handler_type, config)
    }

    pub fn from_registry(
        registry: &Registry,
        handler_type: &str,
        config: &ClientConfig,
    ) -> Result<Self> {
        Ok(Self {
            handler: registry.resolve(handler_type, config)?,
        })
    }

    pub fn handler_type(&self) -> &'static str {
        self.handler.name()
    }

    pub fn process(&self, action: &str, service_name: &str) -> Result<()> {
        self.handler.process(action, service_name)
    }

    pub fn apply(&self, action: Action, service_name: &str) -> Result<()> {
        self.handler.apply(action, service_name)
    }

    pub fn management_interface(&self) -> Result<Box<dyn ManagerSession>> {
        self.handler.management_interface()
    }

    pub fn service_information(&self, service_name: &str) -> Result<UnitStatus> {
        self.handler.service_information(service_name)
    }

    pub fn check_service_is_enabled(&self, service_name: &str) -> Result<UnitFileStatus> {
        self.handler.check_service_is_enabled(service_name)
    }
}

#[cfg(test)]
#[path = "./service_test.rs"]
mod service_test;
