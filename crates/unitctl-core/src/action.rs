use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Lifecycle action that can be forwarded to a service handler.
#[derive(
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    Enable,
    Disable,
    Start,
    Stop,
    Restart,
}

impl Action {
    /// Whether the action changes unit-file enablement rather than the unit's runtime state.
    pub fn changes_unit_files(&self) -> bool {
        matches!(self, Action::Enable | Action::Disable)
    }
}

#[cfg(test)]
#[path = "./action_test.rs"]
mod action_test;
