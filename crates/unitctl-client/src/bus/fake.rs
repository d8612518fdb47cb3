use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use unitctl_core::{Action, Result};

use super::{BusError, Connector, JobMode, ManagerSession, PropertyValue, UnitPath, UnitProperty};
use crate::{DbusServiceHandler, HandlerVariant, ServiceHandler, UnitFileStatus, UnitStatus};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    Connect,
    DisableUnitFiles(Vec<String>, bool),
    EnableUnitFiles(Vec<String>, bool, bool),
    Reload,
    StartUnit(String, JobMode),
    StopUnit(String, JobMode),
    RestartUnit(String, JobMode),
    LoadUnit(String),
    GetUnitFileState(String),
    GetProperty(String, &'static str, &'static str),
}

/// In-memory service manager that records every call it receives.
#[derive(Clone, Debug, Default)]
pub(crate) struct FakeConnector {
    calls: Arc<Mutex<Vec<Call>>>,
    properties: HashMap<UnitProperty, PropertyValue>,
    unit_file_state: String,
    failing_call: Option<String>,
    failing_property: Option<UnitProperty>,
}

impl FakeConnector {
    pub(crate) fn new() -> Self {
        Self {
            unit_file_state: "enabled".to_owned(),
            ..Default::default()
        }
    }

    pub(crate) fn with_property(mut self, property: UnitProperty, value: PropertyValue) -> Self {
        self.properties.insert(property, value);
        self
    }

    pub(crate) fn with_unit_file_state(mut self, state: impl Into<String>) -> Self {
        self.unit_file_state = state.into();
        self
    }

    /// Makes the named call (`connect`, `reload`, `start_unit`, ...) fail.
    pub(crate) fn failing_on(mut self, call: impl Into<String>) -> Self {
        self.failing_call = Some(call.into());
        self
    }

    pub(crate) fn failing_on_property(mut self, property: UnitProperty) -> Self {
        self.failing_property = Some(property);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, name: &str, call: Call) -> Result<(), BusError> {
        self.calls.lock().unwrap().push(call);
        if self.failing_call.as_deref() == Some(name) {
            return Err(BusError::Other(format!("{name} rejected by fake manager")));
        }
        Ok(())
    }
}

impl Connector for FakeConnector {
    fn connect(&self) -> Result<Box<dyn ManagerSession>, BusError> {
        self.record("connect", Call::Connect)?;
        Ok(Box::new(self.clone()))
    }
}

fn owned(units: &[&str]) -> Vec<String> {
    units.iter().map(|unit| unit.to_string()).collect()
}

impl ManagerSession for FakeConnector {
    fn disable_unit_files(&self, units: &[&str], runtime: bool) -> Result<(), BusError> {
        self.record(
            "disable_unit_files",
            Call::DisableUnitFiles(owned(units), runtime),
        )
    }

    fn enable_unit_files(
        &self,
        units: &[&str],
        runtime: bool,
        force: bool,
    ) -> Result<(), BusError> {
        self.record(
            "enable_unit_files",
            Call::EnableUnitFiles(owned(units), runtime, force),
        )
    }

    fn reload(&self) -> Result<(), BusError> {
        self.record("reload", Call::Reload)
    }

    fn start_unit(&self, name: &str, mode: JobMode) -> Result<(), BusError> {
        self.record("start_unit", Call::StartUnit(name.to_owned(), mode))
    }

    fn stop_unit(&self, name: &str, mode: JobMode) -> Result<(), BusError> {
        self.record("stop_unit", Call::StopUnit(name.to_owned(), mode))
    }

    fn restart_unit(&self, name: &str, mode: JobMode) -> Result<(), BusError> {
        self.record("restart_unit", Call::RestartUnit(name.to_owned(), mode))
    }

    fn load_unit(&self, name: &str) -> Result<UnitPath, BusError> {
        self.record("load_unit", Call::LoadUnit(name.to_owned()))?;
        Ok(UnitPath(format!(
            "/org/freedesktop/systemd1/unit/{}",
            name.replace('.', "_2e")
        )))
    }

    fn get_unit_file_state(&self, name: &str) -> Result<String, BusError> {
        self.record("get_unit_file_state", Call::GetUnitFileState(name.to_owned()))?;
        Ok(self.unit_file_state.clone())
    }

    fn get_property(
        &self,
        unit: &UnitPath,
        property: UnitProperty,
    ) -> Result<PropertyValue, BusError> {
        self.record(
            "get_property",
            Call::GetProperty(unit.0.clone(), property.interface(), property.name()),
        )?;
        if self.failing_property == Some(property) {
            return Err(BusError::Other(format!("Unable to read {property}")));
        }
        self.properties
            .get(&property)
            .cloned()
            .ok_or_else(|| BusError::Other(format!("Unknown property {property}")))
    }
}

/// D-Bus handler registered under a second name, for exercising the registry.
#[derive(Debug)]
pub(crate) struct ManagementInterfaceHandler(pub(crate) DbusServiceHandler);

impl HandlerVariant for ManagementInterfaceHandler {
    const NAME: &'static str = "management-interface";
}

impl ServiceHandler for ManagementInterfaceHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, action: Action, service_name: &str) -> Result<()> {
        self.0.apply(action, service_name)
    }

    fn management_interface(&self) -> Result<Box<dyn ManagerSession>> {
        self.0.management_interface()
    }

    fn service_information(&self, service_name: &str) -> Result<UnitStatus> {
        self.0.service_information(service_name)
    }

    fn check_service_is_enabled(&self, service_name: &str) -> Result<UnitFileStatus> {
        self.0.check_service_is_enabled(service_name)
    }
}
