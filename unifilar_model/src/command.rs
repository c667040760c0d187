// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control requests and the endpoints they travel to.

use alloc::format;
use alloc::string::String;

use serde::Serialize;

/// Remote authority endpoints, relative to the configured base URL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `GET` the network topology.
    Topology,
    /// `GET` the current operational state.
    State,
    /// `POST` a switch toggle.
    Switch,
    /// `POST` a fault injection or clearance.
    Fault,
    /// `POST` a global reset.
    Reset,
    /// `GET` the liveness probe.
    Health,
}

impl Endpoint {
    /// Path component appended to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Topology => "/api/topology",
            Self::State => "/api/state",
            Self::Switch => "/api/switch",
            Self::Fault => "/api/fault",
            Self::Reset => "/api/reset",
            Self::Health => "/health",
        }
    }

    /// Returns `true` for endpoints that are read with `GET`.
    #[must_use]
    pub const fn is_read(self) -> bool {
        matches!(self, Self::Topology | Self::State | Self::Health)
    }
}

/// Direction of a switch toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwitchAction {
    /// Open the line's switch.
    Open,
    /// Close the line's switch.
    Close,
}

impl SwitchAction {
    /// Wire value of the `action` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
        }
    }
}

/// Fault injection or clearance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FaultAction {
    /// Inject a fault condition.
    Apply,
    /// Clear the fault condition.
    Clear,
}

impl FaultAction {
    /// Wire value of the `action` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apply => "apply",
            Self::Clear => "clear",
        }
    }
}

/// A control request against the remote authority.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Open or close a line.
    Switch {
        /// Target line.
        line: String,
        /// Requested position.
        action: SwitchAction,
    },
    /// Apply or clear a fault on a line.
    Fault {
        /// Target line.
        line: String,
        /// Requested change.
        action: FaultAction,
    },
    /// Reset every line to the authority's defaults.
    Reset,
}

/// JSON body of a switch or fault request: `{name, action}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommandPayload {
    /// Target line name.
    pub name: String,
    /// Wire action value.
    pub action: &'static str,
}

impl Command {
    /// Shorthand for [`Command::Switch`].
    #[must_use]
    pub fn switch(line: &str, action: SwitchAction) -> Self {
        Self::Switch {
            line: line.into(),
            action,
        }
    }

    /// Shorthand for [`Command::Fault`].
    #[must_use]
    pub fn fault(line: &str, action: FaultAction) -> Self {
        Self::Fault {
            line: line.into(),
            action,
        }
    }

    /// The endpoint this command is posted to.
    #[must_use]
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Switch { .. } => Endpoint::Switch,
            Self::Fault { .. } => Endpoint::Fault,
            Self::Reset => Endpoint::Reset,
        }
    }

    /// The request body; `None` for [`Command::Reset`], which posts no body.
    #[must_use]
    pub fn payload(&self) -> Option<CommandPayload> {
        match self {
            Self::Switch { line, action } => Some(CommandPayload {
                name: line.clone(),
                action: action.as_str(),
            }),
            Self::Fault { line, action } => Some(CommandPayload {
                name: line.clone(),
                action: action.as_str(),
            }),
            Self::Reset => None,
        }
    }

    /// Target line, if the command has one.
    #[must_use]
    pub fn line(&self) -> Option<&str> {
        match self {
            Self::Switch { line, .. } | Self::Fault { line, .. } => Some(line),
            Self::Reset => None,
        }
    }

    /// Operator-facing verb used in the activity log.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Switch {
                action: SwitchAction::Open,
                ..
            } => "OPEN",
            Self::Switch {
                action: SwitchAction::Close,
                ..
            } => "CLOSE",
            Self::Fault {
                action: FaultAction::Apply,
                ..
            } => "FAULT",
            Self::Fault {
                action: FaultAction::Clear,
                ..
            } => "CLEAR FAULT",
            Self::Reset => "RESET",
        }
    }

    /// Verb plus target, e.g. `OPEN RCL-04` or `RESET`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.line() {
            Some(line) => format!("{} {line}", self.verb()),
            None => String::from(self.verb()),
        }
    }
}
