use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// High-level lifecycle position reported in a unit's `ActiveState`.
#[derive(Display, EnumString, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActiveState {
    Active,
    Reloading,
    Inactive,
    Failed,
    Activating,
    Deactivating,
}

/// Snapshot of a unit as reported by the service manager. Recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStatus {
    pub active_state: String,
    pub sub_state: String,
    pub pid: String,
    /// argv of the unit's first start command.
    pub command_line: Vec<String>,
}

impl UnitStatus {
    /// `None` when the manager reports a state outside the known vocabulary.
    pub fn active(&self) -> Option<ActiveState> {
        ActiveState::from_str(&self.active_state).ok()
    }

    pub fn is_running(&self) -> bool {
        self.active() == Some(ActiveState::Active) && self.sub_state == "running"
    }
}

/// Unit-file state token reported by the manager (`enabled`, `disabled`, `static`, `masked`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitFileStatus(pub String);

impl UnitFileStatus {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the unit will be started automatically.
    pub fn is_enabled(&self) -> bool {
        matches!(self.as_str(), "enabled" | "enabled-runtime" | "static")
    }
}

impl std::fmt::Display for UnitFileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for UnitFileStatus {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[path = "./status_test.rs"]
mod status_test;
