// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inputs to the [`Controller`](crate::Controller).

use alloc::string::String;

use unifilar_model::{Command, FaultAction, SwitchAction};

use crate::affordance::Affordances;

/// How a line was selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Primary click on the segment or switch glyph.
    Click,
    /// Secondary click (context menu) on the segment.
    ContextMenu,
}

/// One of the four line-scoped actions offered by the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PanelAction {
    /// Open the switch.
    Open,
    /// Close the switch.
    Close,
    /// Inject a fault.
    ApplyFault,
    /// Clear the fault.
    ClearFault,
}

impl PanelAction {
    /// All actions, in panel order.
    pub const ALL: [Self; 4] = [Self::Open, Self::Close, Self::ApplyFault, Self::ClearFault];

    /// The affordance that gates this action.
    #[must_use]
    pub const fn affordance(self) -> Affordances {
        match self {
            Self::Open => Affordances::OPEN,
            Self::Close => Affordances::CLOSE,
            Self::ApplyFault => Affordances::APPLY_FAULT,
            Self::ClearFault => Affordances::CLEAR_FAULT,
        }
    }

    /// The command this action issues against `line`.
    #[must_use]
    pub fn command(self, line: &str) -> Command {
        match self {
            Self::Open => Command::switch(line, SwitchAction::Open),
            Self::Close => Command::switch(line, SwitchAction::Close),
            Self::ApplyFault => Command::fault(line, FaultAction::Apply),
            Self::ClearFault => Command::fault(line, FaultAction::Clear),
        }
    }

    /// Button caption.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Close => "Close",
            Self::ApplyFault => "Apply fault",
            Self::ClearFault => "Clear fault",
        }
    }
}

/// A user interface event.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UiEvent {
    /// A line was picked on the diagram.
    Select {
        /// Picked line.
        line: String,
        /// How it was picked.
        gesture: Gesture,
    },
    /// The panel's cancel button.
    Cancel,
    /// The escape key.
    Escape,
    /// A click on the overlay behind the panel.
    DismissOverlay,
    /// One of the panel's action buttons.
    Action(PanelAction),
}

impl UiEvent {
    /// Shorthand for a click selection.
    #[must_use]
    pub fn click(line: &str) -> Self {
        Self::Select {
            line: line.into(),
            gesture: Gesture::Click,
        }
    }

    /// Returns `true` for the three ways of closing the panel.
    #[must_use]
    pub const fn is_dismissal(&self) -> bool {
        matches!(self, Self::Cancel | Self::Escape | Self::DismissOverlay)
    }
}
