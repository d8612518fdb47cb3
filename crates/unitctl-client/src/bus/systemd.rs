use tracing::debug;
use zbus::blocking::Connection;
use zbus::proxy;
use zbus::proxy::CacheProperties;
use zbus::zvariant::OwnedObjectPath;

use super::{BusError, Connector, JobMode, ManagerSession, PropertyValue, UnitPath, UnitProperty};
use crate::config::Level;

const SYSTEMD_DESTINATION: &str = "org.freedesktop.systemd1";

/// `(path, argv, ignore_failure, start_realtime, start_monotonic, exit_realtime,
/// exit_monotonic, pid, code, status)`
type ExecCommand = (String, Vec<String>, bool, u64, u64, u64, u64, u32, i32, i32);

/// argv of the first `ExecStart=` entry, or its path when systemd reports no argv.
///
/// Oneshot units may list several commands. Only the first one is reported.
fn main_command_line(exec_start: Vec<ExecCommand>) -> Vec<String> {
    exec_start
        .into_iter()
        .next()
        .map(|(path, argv, ..)| if argv.is_empty() { vec![path] } else { argv })
        .unwrap_or_default()
}

#[proxy(
    interface = "org.freedesktop.systemd1.Manager",
    default_service = "org.freedesktop.systemd1",
    default_path = "/org/freedesktop/systemd1"
)]
trait SystemdManager {
    #[allow(clippy::type_complexity)]
    fn enable_unit_files(
        &self,
        files: &[&str],
        runtime: bool,
        force: bool,
    ) -> zbus::Result<(bool, Vec<(String, String, String)>)>;

    fn disable_unit_files(
        &self,
        files: &[&str],
        runtime: bool,
    ) -> zbus::Result<Vec<(String, String, String)>>;

    fn reload(&self) -> zbus::Result<()>;

    fn start_unit(&self, name: &str, mode: &str) -> zbus::Result<OwnedObjectPath>;

    fn stop_unit(&self, name: &str, mode: &str) -> zbus::Result<OwnedObjectPath>;

    fn restart_unit(&self, name: &str, mode: &str) -> zbus::Result<OwnedObjectPath>;

    fn load_unit(&self, name: &str) -> zbus::Result<OwnedObjectPath>;

    fn get_unit_file_state(&self, file: &str) -> zbus::Result<String>;
}

#[proxy(
    interface = "org.freedesktop.systemd1.Unit",
    default_service = "org.freedesktop.systemd1"
)]
trait SystemdUnit {
    #[zbus(property)]
    fn active_state(&self) -> zbus::Result<String>;

    #[zbus(property)]
    fn sub_state(&self) -> zbus::Result<String>;
}

#[proxy(
    interface = "org.freedesktop.systemd1.Service",
    default_service = "org.freedesktop.systemd1"
)]
trait SystemdService {
    #[zbus(property, name = "ExecMainPID")]
    fn exec_main_pid(&self) -> zbus::Result<u32>;

    #[zbus(property)]
    fn exec_start(&self) -> zbus::Result<Vec<ExecCommand>>;
}

/// Connects to systemd over the system bus, or the session bus for user units.
#[derive(Clone, Debug, Default)]
pub struct SystemdConnector {
    level: Level,
}

impl SystemdConnector {
    pub fn new(level: Level) -> Self {
        Self { level }
    }
}

impl Connector for SystemdConnector {
    fn connect(&self) -> Result<Box<dyn ManagerSession>, BusError> {
        debug!("Connecting to the {} systemd manager", self.level);
        let connection = match self.level {
            Level::System => Connection::system(),
            Level::User => Connection::session(),
        }?;
        let manager = SystemdManagerProxyBlocking::new(&connection)?;
        Ok(Box::new(SystemdSession {
            connection,
            manager,
        }))
    }
}

struct SystemdSession {
    connection: Connection,
    manager: SystemdManagerProxyBlocking<'static>,
}

impl SystemdSession {
    fn unit_proxy<'a>(&self, unit: &'a UnitPath) -> zbus::Result<SystemdUnitProxyBlocking<'a>> {
        SystemdUnitProxyBlocking::builder(&self.connection)
            .destination(SYSTEMD_DESTINATION)?
            .path(unit.as_str())?
            .cache_properties(CacheProperties::No)
            .build()
    }

    fn service_proxy<'a>(
        &self,
        unit: &'a UnitPath,
    ) -> zbus::Result<SystemdServiceProxyBlocking<'a>> {
        SystemdServiceProxyBlocking::builder(&self.connection)
            .destination(SYSTEMD_DESTINATION)?
            .path(unit.as_str())?
            .cache_properties(CacheProperties::No)
            .build()
    }
}

impl ManagerSession for SystemdSession {
    fn disable_unit_files(&self, units: &[&str], runtime: bool) -> Result<(), BusError> {
        self.manager.disable_unit_files(units, runtime)?;
        Ok(())
    }

    fn enable_unit_files(
        &self,
        units: &[&str],
        runtime: bool,
        force: bool,
    ) -> Result<(), BusError> {
        self.manager.enable_unit_files(units, runtime, force)?;
        Ok(())
    }

    fn reload(&self) -> Result<(), BusError> {
        Ok(self.manager.reload()?)
    }

    fn start_unit(&self, name: &str, mode: JobMode) -> Result<(), BusError> {
        let job = self.manager.start_unit(name, mode.into())?;
        debug!("Queued start job {} for {name}", job.as_str());
        Ok(())
    }

    fn stop_unit(&self, name: &str, mode: JobMode) -> Result<(), BusError> {
        let job = self.manager.stop_unit(name, mode.into())?;
        debug!("Queued stop job {} for {name}", job.as_str());
        Ok(())
    }

    fn restart_unit(&self, name: &str, mode: JobMode) -> Result<(), BusError> {
        let job = self.manager.restart_unit(name, mode.into())?;
        debug!("Queued restart job {} for {name}", job.as_str());
        Ok(())
    }

    fn load_unit(&self, name: &str) -> Result<UnitPath, BusError> {
        let path = self.manager.load_unit(name)?;
        Ok(UnitPath(path.as_str().to_owned()))
    }

    fn get_unit_file_state(&self, name: &str) -> Result<String, BusError> {
        Ok(self.manager.get_unit_file_state(name)?)
    }

    fn get_property(
        &self,
        unit: &UnitPath,
        property: UnitProperty,
    ) -> Result<PropertyValue, BusError> {
        let value = match property {
            UnitProperty::ActiveState => {
                PropertyValue::Text(self.unit_proxy(unit)?.active_state()?)
            }
            UnitProperty::SubState => PropertyValue::Text(self.unit_proxy(unit)?.sub_state()?),
            UnitProperty::ExecMainPid => {
                PropertyValue::Pid(self.service_proxy(unit)?.exec_main_pid()?)
            }
            UnitProperty::ExecStart => PropertyValue::CommandLine(main_command_line(
                self.service_proxy(unit)?.exec_start()?,
            )),
        };
        Ok(value)
    }
}

#[cfg(test)]
#[path = "./systemd_test.rs"]
mod systemd_test;
