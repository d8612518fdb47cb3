//! Contract for talking to the external service manager.
//!
//! Handlers never speak a wire protocol themselves. They open a
//! [`ManagerSession`] through a [`Connector`] for the duration of a single
//! operation and drop it before returning.

#[cfg(test)]
pub(crate) mod fake;
#[cfg(target_os = "linux")]
mod systemd;

use std::fmt::Debug;

use strum::{Display, EnumString, IntoStaticStr};
#[cfg(target_os = "linux")]
pub use systemd::*;

pub const UNIT_INTERFACE: &str = "org.freedesktop.systemd1.Unit";
pub const SERVICE_INTERFACE: &str = "org.freedesktop.systemd1.Service";

/// Fault raised by the service manager or the transport underneath it.
#[derive(thiserror::Error, Debug)]
pub enum BusError {
    #[cfg(target_os = "linux")]
    #[error(transparent)]
    Dbus(#[from] zbus::Error),
    #[error("Property {0} returned an unexpected value")]
    UnexpectedValue(UnitProperty),
    #[error("{0}")]
    Other(String),
}

/// How the manager should treat a new job that conflicts with queued ones.
#[derive(Display, EnumString, IntoStaticStr, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[strum(serialize_all = "kebab-case")]
pub enum JobMode {
    /// Reject the job if it conflicts with a pending one.
    #[default]
    Fail,
    Replace,
    ReplaceIrreversibly,
    Isolate,
    Flush,
    IgnoreDependencies,
    IgnoreRequirements,
}

/// Unit properties read when building a status snapshot.
#[derive(Display, IntoStaticStr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitProperty {
    ActiveState,
    SubState,
    #[strum(serialize = "ExecMainPID")]
    ExecMainPid,
    ExecStart,
}

impl UnitProperty {
    pub fn interface(&self) -> &'static str {
        match self {
            UnitProperty::ActiveState | UnitProperty::SubState => UNIT_INTERFACE,
            UnitProperty::ExecMainPid | UnitProperty::ExecStart => SERVICE_INTERFACE,
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyValue {
    Text(String),
    Pid(u32),
    CommandLine(Vec<String>),
}

impl PropertyValue {
    pub(crate) fn into_text(self, property: UnitProperty) -> Result<String, BusError> {
        match self {
            PropertyValue::Text(text) => Ok(text),
            PropertyValue::Pid(pid) => Ok(pid.to_string()),
            PropertyValue::CommandLine(_) => Err(BusError::UnexpectedValue(property)),
        }
    }

    pub(crate) fn into_command_line(
        self,
        property: UnitProperty,
    ) -> Result<Vec<String>, BusError> {
        match self {
            PropertyValue::CommandLine(args) => Ok(args),
            _ => Err(BusError::UnexpectedValue(property)),
        }
    }
}

/// Object path of a loaded unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitPath(pub String);

impl UnitPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Opens sessions to the service manager.
pub trait Connector: Debug + Send + Sync {
    fn connect(&self) -> Result<Box<dyn ManagerSession>, BusError>;
}

/// Handle to the service manager, valid for the operation that opened it.
pub trait ManagerSession {
    fn disable_unit_files(&self, units: &[&str], runtime: bool) -> Result<(), BusError>;

    fn enable_unit_files(&self, units: &[&str], runtime: bool, force: bool)
    -> Result<(), BusError>;

    /// Reloads the manager's unit-file cache.
    fn reload(&self) -> Result<(), BusError>;

    fn start_unit(&self, name: &str, mode: JobMode) -> Result<(), BusError>;

    fn stop_unit(&self, name: &str, mode: JobMode) -> Result<(), BusError>;

    fn restart_unit(&self, name: &str, mode: JobMode) -> Result<(), BusError>;

    fn load_unit(&self, name: &str) -> Result<UnitPath, BusError>;

    fn get_unit_file_state(&self, name: &str) -> Result<String, BusError>;

    fn get_property(
        &self,
        unit: &UnitPath,
        property: UnitProperty,
    ) -> Result<PropertyValue, BusError>;
}
