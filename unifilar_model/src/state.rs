// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Operational state as last confirmed by the remote authority.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::wire::StateWire;

/// Operational state of a single line.
///
/// The [`Default`] value (closed, de-energized, no fault, no labels) is what a
/// known line reads as when the authority sends no entry for it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineState {
    /// The switch is open.
    pub open: bool,
    /// Both ends are fed.
    pub energized: bool,
    /// A fault is present on the line.
    pub fault: bool,
    /// Display label of the first endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    /// Display label of the second endpoint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

static DEFAULT_LINE_STATE: LineState = LineState {
    open: false,
    energized: false,
    fault: false,
    from: None,
    to: None,
};

/// Energization of a single bus, when the authority reports it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusState {
    /// The bus is fed.
    pub energized: bool,
}

/// One complete read of the authority's state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateSnapshot {
    /// Per-line state keyed by line name.
    pub lines: BTreeMap<String, LineState>,
    /// Per-bus energization keyed by bus name (may be empty).
    pub buses: BTreeMap<String, BusState>,
    /// Names of lines the authority holds open, sorted.
    pub open: Vec<String>,
    /// Names of lines the authority holds faulted, sorted.
    pub fault: Vec<String>,
}

impl StateSnapshot {
    /// Converts a wire read into a snapshot.
    ///
    /// A read that carries an `error` field is a failed read; nothing from it
    /// should replace the current state.
    pub fn from_wire(wire: StateWire) -> Result<Self, SnapshotError> {
        if let Some(message) = wire.error {
            return Err(SnapshotError::Remote(message));
        }
        Ok(Self {
            lines: wire.lines,
            buses: wire.buses,
            open: wire.open,
            fault: wire.fault,
        })
    }
}

/// Holder of the current [`StateSnapshot`].
///
/// The store is only ever replaced in full. A revision counter bumps on each
/// replacement so observers can tell how many refreshes happened.
#[derive(Clone, Debug, Default)]
pub struct StateStore {
    snapshot: StateSnapshot,
    revision: u64,
}

impl StateStore {
    /// Creates an empty store; every line reads as the default state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole snapshot. Entries are never merged.
    pub fn replace(&mut self, snapshot: StateSnapshot) {
        self.snapshot = snapshot;
        self.revision = self.revision.wrapping_add(1);
    }

    /// State of `line`, or the default state when the snapshot has no entry.
    #[must_use]
    pub fn line(&self, line: &str) -> &LineState {
        self.snapshot.lines.get(line).unwrap_or(&DEFAULT_LINE_STATE)
    }

    /// Energization of `bus`, if the authority reported it.
    #[must_use]
    pub fn bus(&self, bus: &str) -> Option<BusState> {
        self.snapshot.buses.get(bus).copied()
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> &StateSnapshot {
        &self.snapshot
    }

    /// Number of times the snapshot has been replaced.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
