// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;

use unifilar_model::LineState;

use crate::affordance::Affordances;
use crate::event::PanelAction;

/// The rendered body of the action panel for one line.
///
/// Always derived from the latest state; rebuilding it after a refresh is how
/// the panel updates in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionPanel {
    /// The targeted line.
    pub line: String,
    /// `Actions – <line>`.
    pub title: String,
    /// One-line summary of the line's state.
    pub status: String,
    /// Enabled actions.
    pub affordances: Affordances,
}

impl ActionPanel {
    /// Builds the panel for `line` in `state`.
    #[must_use]
    pub fn for_line(line: &str, state: &LineState) -> Self {
        Self {
            line: line.into(),
            title: format!("Actions \u{2013} {line}"),
            status: status_text(state),
            affordances: Affordances::for_state(state),
        }
    }

    /// Returns `true` if `action` is enabled.
    #[must_use]
    pub fn is_enabled(&self, action: PanelAction) -> bool {
        self.affordances.contains(action.affordance())
    }
}

/// `State: OPEN|CLOSED • energized|de-energized • fault: YES|no  |  (from → to)`
///
/// Missing endpoint labels print as `?`.
#[must_use]
pub fn status_text(state: &LineState) -> String {
    format!(
        "State: {} \u{2022} {} \u{2022} fault: {}  |  ({} \u{2192} {})",
        if state.open { "OPEN" } else { "CLOSED" },
        if state.energized {
            "energized"
        } else {
            "de-energized"
        },
        if state.fault { "YES" } else { "no" },
        state.from.as_deref().unwrap_or("?"),
        state.to.as_deref().unwrap_or("?"),
    )
}
