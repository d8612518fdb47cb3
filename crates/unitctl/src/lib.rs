#[cfg(feature = "client")]
pub mod client {
    pub use unitctl_client::*;
}
#[cfg(feature = "logging")]
pub mod logging {
    pub use unitctl_logging::*;
}
#[cfg(feature = "config")]
mod settings;
#[cfg(feature = "config")]
mod settings_file;

#[cfg(feature = "config")]
pub use settings::*;
#[cfg(feature = "config")]
pub use settings_file::*;
pub use unitctl_core::{Action, INVALID_ARGUMENT, Result, ServiceError, service_error};
