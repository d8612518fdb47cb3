use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;
use unitctl_core::{INVALID_ARGUMENT, Result, service_error};

use crate::{ClientConfig, HandlerVariant, ServiceHandler};

type HandlerFactory = Arc<dyn Fn(&ClientConfig) -> Box<dyn ServiceHandler> + Send + Sync>;

static BUILTIN: Lazy<Registry> = Lazy::new(Registry::builtin);

/// Maps handler-type names to the factories that build them.
///
/// Names are unique. [`RegistryBuilder::build`] rejects two variants declaring the
/// same name, so a lookup can never be ambiguous.
#[derive(Clone)]
pub struct Registry {
    factories: BTreeMap<&'static str, HandlerFactory>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Process-wide registry holding the handlers compiled into this build.
    pub fn global() -> &'static Registry {
        &BUILTIN
    }

    fn builtin() -> Registry {
        #[cfg_attr(not(target_os = "linux"), allow(unused_mut))]
        let mut factories = BTreeMap::new();
        #[cfg(target_os = "linux")]
        factories.insert(
            crate::DbusServiceHandler::NAME,
            boxed(|config: &ClientConfig| {
                crate::DbusServiceHandler::new(crate::bus::SystemdConnector::new(config.level))
            }),
        );
        Registry { factories }
    }

    /// Builds the handler registered as `handler_type`.
    pub fn resolve(
        &self,
        handler_type: &str,
        config: &ClientConfig,
    ) -> Result<Box<dyn ServiceHandler>> {
        let factory = self.factories.get(handler_type).ok_or_else(|| {
            service_error!(INVALID_ARGUMENT, "Invalid handler type {handler_type}")
        })?;
        debug!("Resolved handler type {handler_type}");
        Ok(factory(config))
    }

    pub fn contains(&self, handler_type: &str) -> bool {
        self.factories.contains_key(handler_type)
    }

    pub fn handler_types(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().copied()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.factories.keys()).finish()
    }
}

#[derive(Default)]
pub struct RegistryBuilder {
    factories: Vec<(&'static str, HandlerFactory)>,
}

impl RegistryBuilder {
    /// Registers `H` under its declared [`HandlerVariant::NAME`].
    pub fn with_handler<H, F>(mut self, factory: F) -> Self
    where
        H: HandlerVariant,
        F: Fn(&ClientConfig) -> H + Send + Sync + 'static,
    {
        self.factories.push((H::NAME, boxed(factory)));
        self
    }

    pub fn build(self) -> Result<Registry> {
        let mut factories = BTreeMap::new();
        for (handler_type, factory) in self.factories {
            if factories.contains_key(handler_type) {
                return Err(service_error!(
                    INVALID_ARGUMENT,
                    "Duplicate handler type {handler_type}"
                ));
            }
            factories.insert(handler_type, factory);
        }
        Ok(Registry { factories })
    }
}

fn boxed<H, F>(factory: F) -> HandlerFactory
where
    H: ServiceHandler + 'static,
    F: Fn(&ClientConfig) -> H + Send + Sync + 'static,
{
    Arc::new(move |config: &ClientConfig| -> Box<dyn ServiceHandler> { Box::new(factory(config)) })
}

#[cfg(test)]
#[path = "./registry_test.rs"]
mod registry_test;
