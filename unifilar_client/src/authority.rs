// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use unifilar_model::Command;
use unifilar_model::wire::{HealthWire, StateWire, TopologyWire};

use crate::error::{ClientError, CommandError};

/// The remote service that owns topology and operational state.
///
/// Calls block until the authority answers. A successful [`issue`] says
/// nothing about the resulting state; read it back with [`state`].
///
/// [`issue`]: StateAuthority::issue
/// [`state`]: StateAuthority::state
pub trait StateAuthority {
    /// `GET` the network topology.
    fn topology(&mut self) -> Result<TopologyWire, ClientError>;

    /// `GET` the current state.
    fn state(&mut self) -> Result<StateWire, ClientError>;

    /// `POST` a control command.
    fn issue(&mut self, command: &Command) -> Result<(), CommandError>;

    /// `GET` the liveness probe.
    fn health(&mut self) -> Result<HealthWire, ClientError>;
}

impl<A: StateAuthority + ?Sized> StateAuthority for &mut A {
    fn topology(&mut self) -> Result<TopologyWire, ClientError> {
        (**self).topology()
    }

    fn state(&mut self) -> Result<StateWire, ClientError> {
        (**self).state()
    }

    fn issue(&mut self, command: &Command) -> Result<(), CommandError> {
        (**self).issue(command)
    }

    fn health(&mut self) -> Result<HealthWire, ClientError> {
        (**self).health()
    }
}
