use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{DbusServiceHandler, HandlerVariant};

/// Which service manager instance units are addressed on.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// The system-wide manager on the system bus.
    #[default]
    System,
    /// The per-user manager on the session bus.
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(confique::Config))]
pub struct ClientConfig {
    /// Name of the handler used to control services.
    #[cfg_attr(
        feature = "config",
        config(default = "dbus", env = "UNITCTL_HANDLER_TYPE")
    )]
    pub handler_type: String,
    /// `system` or `user`.
    #[cfg_attr(
        feature = "config",
        config(default = "system", env = "UNITCTL_LEVEL", parse_env = parse_level)
    )]
    pub level: Level,
}

#[cfg(feature = "config")]
fn parse_level(value: &str) -> Result<Level, strum::ParseError> {
    value.parse()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            handler_type: DbusServiceHandler::NAME.to_owned(),
            level: Level::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_handler_type(mut self, handler_type: impl Into<String>) -> Self {
        self.handler_type = handler_type.into();
        self
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

#[cfg(test)]
#[path = "./config_test.rs"]
mod config_test;
