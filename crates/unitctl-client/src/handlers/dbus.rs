use tracing::{info, warn};
use unitctl_core::{Action, INVALID_ARGUMENT, Result, ServiceError};

use crate::bus::{BusError, Connector, JobMode, ManagerSession, UnitProperty};
use crate::{HandlerVariant, ServiceHandler, UnitFileStatus, UnitStatus};

/// Controls services through the systemd manager's D-Bus API.
#[derive(Debug)]
pub struct DbusServiceHandler {
    connector: Box<dyn Connector>,
}

impl DbusServiceHandler {
    pub fn new(connector: impl Connector + 'static) -> Self {
        Self {
            connector: Box::new(connector),
        }
    }

    fn connect(&self) -> Result<Box<dyn ManagerSession>, BusError> {
        self.connector.connect()
    }

    fn run(&self, action: Action, service_name: &str) -> Result<(), BusError> {
        let manager = self.connect()?;
        let units = [service_name];
        match action {
            Action::Disable => manager.disable_unit_files(&units, false)?,
            Action::Enable => manager.enable_unit_files(&units, false, true)?,
            Action::Start => manager.start_unit(service_name, JobMode::Fail)?,
            Action::Stop => manager.stop_unit(service_name, JobMode::Fail)?,
            Action::Restart => manager.restart_unit(service_name, JobMode::Fail)?,
        }
        // The manager only sees unit-file changes after a reload
        if action.changes_unit_files() {
            manager.reload()?;
        }
        Ok(())
    }

    fn read_status(&self, service_name: &str) -> Result<UnitStatus, BusError> {
        let manager = self.connect()?;
        let unit = manager.load_unit(service_name)?;
        let read = |property| manager.get_property(&unit, property);

        Ok(UnitStatus {
            active_state: read(UnitProperty::ActiveState)?.into_text(UnitProperty::ActiveState)?,
            sub_state: read(UnitProperty::SubState)?.into_text(UnitProperty::SubState)?,
            pid: read(UnitProperty::ExecMainPid)?.into_text(UnitProperty::ExecMainPid)?,
            command_line: read(UnitProperty::ExecStart)?
                .into_command_line(UnitProperty::ExecStart)?,
        })
    }
}

fn translate(message: String) -> ServiceError {
    warn!("{message}");
    ServiceError::new(INVALID_ARGUMENT, message)
}

impl HandlerVariant for DbusServiceHandler {
    const NAME: &'static str = "dbus";
}

impl ServiceHandler for DbusServiceHandler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, action: Action, service_name: &str) -> Result<()> {
        info!("Requesting {action} of {service_name}");
        self.run(action, service_name).map_err(|e| {
            translate(format!(
                "Failed to '{action}' on '{service_name}' due to error. {e}"
            ))
        })
    }

    fn management_interface(&self) -> Result<Box<dyn ManagerSession>> {
        self.connect().map_err(|e| {
            translate(format!(
                "Can not connect to the service manager, due to error: {e}."
            ))
        })
    }

    fn service_information(&self, service_name: &str) -> Result<UnitStatus> {
        self.read_status(service_name).map_err(|e| {
            translate(format!(
                "Can not fetch service information for {service_name} service, due to error: {e}."
            ))
        })
    }

    fn check_service_is_enabled(&self, service_name: &str) -> Result<UnitFileStatus> {
        self.connect()
            .and_then(|manager| manager.get_unit_file_state(service_name))
            .map(UnitFileStatus)
            .map_err(|e| {
                translate(format!(
                    "Can not check service status: enable/disable for {service_name} service, due to error: {e}."
                ))
            })
    }
}

#[cfg(test)]
#[path = "./dbus_test.rs"]
mod dbus_test;
