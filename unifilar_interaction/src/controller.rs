// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The targeting state machine.
//!
//! ```text
//! Idle | Targeted(_) --select L-->              Targeted(L)   open panel
//! Targeted(L)        --cancel|escape|dismiss--> Idle          close panel
//! Targeted(L)        --action A (enabled)-->    Targeted(L)   dispatch A(L)
//! anything else                                 unchanged     ignored
//! ```
//!
//! [`transition`] is the whole table as a pure function; [`Controller`] just
//! holds the current [`Mode`] and applies it.

use alloc::string::String;

use unifilar_model::{Command, LookupError, StateStore, Topology};

use crate::affordance::Affordances;
use crate::event::UiEvent;
use crate::panel::ActionPanel;

/// Controller state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// No target, panel closed.
    #[default]
    Idle,
    /// A line is targeted and its panel is open.
    Targeted(String),
}

/// What the caller must do after an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Show the panel for this line.
    PanelOpened(String),
    /// Hide the panel.
    PanelClosed,
    /// Send this command, then refresh, redraw and rebuild the panel.
    Dispatch(Command),
    /// Nothing changed.
    Ignored,
}

/// Computes the next mode and the outcome of `event` in `mode`.
///
/// Selecting a line that the topology does not contain fails with
/// [`LookupError::UnknownLine`]; the caller keeps its current mode.
pub fn transition(
    mode: &Mode,
    event: &UiEvent,
    topology: &Topology,
    state: &StateStore,
) -> Result<(Mode, Outcome), LookupError> {
    Ok(match (mode, event) {
        (_, UiEvent::Select { line, .. }) => {
            topology.line(line)?;
            (
                Mode::Targeted(line.clone()),
                Outcome::PanelOpened(line.clone()),
            )
        }
        (Mode::Targeted(_), e) if e.is_dismissal() => (Mode::Idle, Outcome::PanelClosed),
        (Mode::Targeted(line), UiEvent::Action(action)) => {
            let gates = Affordances::for_state(state.line(line));
            let outcome = if gates.contains(action.affordance()) {
                Outcome::Dispatch(action.command(line))
            } else {
                Outcome::Ignored
            };
            (mode.clone(), outcome)
        }
        (Mode::Idle, _) | (Mode::Targeted(_), _) => (mode.clone(), Outcome::Ignored),
    })
}

/// Holds the current [`Mode`].
#[derive(Clone, Debug, Default)]
pub struct Controller {
    mode: Mode,
}

impl Controller {
    /// Starts idle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `event`. On error the mode is unchanged.
    pub fn handle(
        &mut self,
        event: &UiEvent,
        topology: &Topology,
        state: &StateStore,
    ) -> Result<Outcome, LookupError> {
        let (next, outcome) = transition(&self.mode, event, topology, state)?;
        self.mode = next;
        Ok(outcome)
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// The targeted line, if any.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match &self.mode {
            Mode::Idle => None,
            Mode::Targeted(line) => Some(line),
        }
    }

    /// Returns `true` while the panel is shown.
    #[must_use]
    pub fn is_panel_open(&self) -> bool {
        matches!(self.mode, Mode::Targeted(_))
    }

    /// The panel for the current target, built from `state`.
    #[must_use]
    pub fn panel(&self, state: &StateStore) -> Option<ActionPanel> {
        self.target()
            .map(|line| ActionPanel::for_line(line, state.line(line)))
    }
}
