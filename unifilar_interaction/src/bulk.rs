// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The secondary command surface: two line pickers and five buttons that
//! act without touching the target or the panel.

use alloc::string::String;
use alloc::vec::Vec;

use unifilar_model::{Command, FaultAction, LookupError, SwitchAction, Topology};

/// A drop-down of line names.
///
/// Options come from the topology in line order; the first option is
/// selected initially, like an HTML `<select>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineSelector {
    options: Vec<String>,
    selected: Option<usize>,
}

impl LineSelector {
    /// Populates the selector from `topology`.
    #[must_use]
    pub fn from_topology(topology: &Topology) -> Self {
        let options: Vec<String> = topology.line_names().map(String::from).collect();
        let selected = if options.is_empty() { None } else { Some(0) };
        Self { options, selected }
    }

    /// Option values in display order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Currently selected value.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.map(|idx| self.options[idx].as_str())
    }

    /// Selects `line`. Fails with [`LookupError::UnknownLine`] if it is not an
    /// option, leaving the selection unchanged.
    pub fn select(&mut self, line: &str) -> Result<(), LookupError> {
        let idx = self
            .options
            .iter()
            .position(|opt| opt == line)
            .ok_or_else(|| LookupError::UnknownLine(line.into()))?;
        self.selected = Some(idx);
        Ok(())
    }
}

/// A button on the bulk surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulkAction {
    /// Open the line chosen in the switching selector.
    Open,
    /// Close the line chosen in the switching selector.
    Close,
    /// Fault the line chosen in the fault selector.
    ApplyFault,
    /// Clear the fault on the line chosen in the fault selector.
    ClearFault,
    /// Reset the whole network.
    Reset,
}

/// Switching and fault selectors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BulkPanel {
    /// Target of [`BulkAction::Open`] and [`BulkAction::Close`].
    pub switching: LineSelector,
    /// Target of [`BulkAction::ApplyFault`] and [`BulkAction::ClearFault`].
    pub fault: LineSelector,
}

impl BulkPanel {
    /// Populates both selectors from `topology`.
    #[must_use]
    pub fn from_topology(topology: &Topology) -> Self {
        let selector = LineSelector::from_topology(topology);
        Self {
            switching: selector.clone(),
            fault: selector,
        }
    }

    /// The command a button issues, or `None` if its selector is empty.
    ///
    /// No gating applies here: opening an already open line is sent as is.
    #[must_use]
    pub fn command(&self, action: BulkAction) -> Option<Command> {
        match action {
            BulkAction::Open => self
                .switching
                .selected()
                .map(|line| Command::switch(line, SwitchAction::Open)),
            BulkAction::Close => self
                .switching
                .selected()
                .map(|line| Command::switch(line, SwitchAction::Close)),
            BulkAction::ApplyFault => self
                .fault
                .selected()
                .map(|line| Command::fault(line, FaultAction::Apply)),
            BulkAction::ClearFault => self
                .fault
                .selected()
                .map(|line| Command::fault(line, FaultAction::Clear)),
            BulkAction::Reset => Some(Command::Reset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topo() -> Topology {
        Topology::builder()
            .bus("A", 0.0, 0.0)
            .bus("B", 1.0, 0.0)
            .line("RCL-02", "A", "B")
            .line("RCL-01", "B", "A")
            .build()
            .unwrap()
    }

    #[test]
    fn selectors_follow_topology_order() {
        let panel = BulkPanel::from_topology(&topo());
        assert_eq!(panel.switching.options(), ["RCL-02", "RCL-01"]);
        assert_eq!(panel.switching.selected(), Some("RCL-02"));
        assert_eq!(panel.fault.selected(), Some("RCL-02"));
    }

    #[test]
    fn selectors_are_independent() {
        let mut panel = BulkPanel::from_topology(&topo());
        panel.fault.select("RCL-01").unwrap();
        assert_eq!(
            panel.command(BulkAction::Close),
            Some(Command::switch("RCL-02", SwitchAction::Close))
        );
        assert_eq!(
            panel.command(BulkAction::ClearFault),
            Some(Command::fault("RCL-01", FaultAction::Clear))
        );
        assert_eq!(panel.command(BulkAction::Reset), Some(Command::Reset));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut sel = LineSelector::from_topology(&topo());
        assert_eq!(
            sel.select("X"),
            Err(LookupError::UnknownLine("X".into()))
        );
        assert_eq!(sel.selected(), Some("RCL-02"));
    }

    #[test]
    fn empty_topology_issues_only_reset() {
        let panel = BulkPanel::from_topology(&Topology::default());
        assert_eq!(panel.command(BulkAction::Open), None);
        assert_eq!(panel.command(BulkAction::ApplyFault), None);
        assert_eq!(panel.command(BulkAction::Reset), Some(Command::Reset));
    }
}
