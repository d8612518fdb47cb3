use std::fmt::Debug;
use std::str::FromStr;

use unitctl_core::{Action, INVALID_ARGUMENT, Result, service_error};

use crate::bus::ManagerSession;
use crate::{UnitFileStatus, UnitStatus};

/// A backend that controls services through some external service manager.
pub trait ServiceHandler: Debug + Send + Sync {
    /// The handler-type name this variant is registered under.
    fn name(&self) -> &'static str;

    /// Parses `action` and runs it against `service_name`.
    ///
    /// Unknown actions fail with `EINVAL` before the service manager is contacted.
    fn process(&self, action: &str, service_name: &str) -> Result<()> {
        let action = Action::from_str(action).map_err(|_| {
            service_error!(
                INVALID_ARGUMENT,
                "Invalid action '{action}' for the service {service_name}"
            )
        })?;
        self.apply(action, service_name)
    }

    fn apply(&self, action: Action, service_name: &str) -> Result<()>;

    /// Opens a session to the service manager. The session is not cached.
    fn management_interface(&self) -> Result<Box<dyn ManagerSession>>;

    fn service_information(&self, service_name: &str) -> Result<UnitStatus>;

    fn check_service_is_enabled(&self, service_name: &str) -> Result<UnitFileStatus>;
}

/// A concrete handler with a fixed handler-type name.
pub trait HandlerVariant: ServiceHandler + 'static {
    const NAME: &'static str;
}
