// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=unifilar_interaction --heading-base-level=0

//! Unifilar Interaction: who is targeted, and what may be done to them.
//!
//! This crate is headless. It turns [`UiEvent`]s into [`Outcome`]s and leaves
//! sending commands, refreshing state, and redrawing to the caller.
//!
//! - [`Controller`]: the two-state machine (`Idle`, `Targeted(line)`) that
//!   decides which line the action panel is scoped to. The transition table
//!   is exposed on its own as [`transition`].
//! - [`Affordances`]: which of the four panel actions are enabled, a pure
//!   function of the line's [`LineState`](unifilar_model::LineState).
//! - [`ActionPanel`]: the panel's title, status line, and affordances.
//! - [`BulkPanel`]: the secondary surface with its own line selectors, which
//!   never touches the target.
//!
//! ## Minimal example
//!
//! ```rust
//! use unifilar_interaction::{Controller, Outcome, PanelAction, UiEvent};
//! use unifilar_model::{Command, StateStore, SwitchAction, Topology};
//!
//! let topo = Topology::builder()
//!     .bus("A", 0.0, 0.0)
//!     .bus("B", 10.0, 0.0)
//!     .line("L1", "A", "B")
//!     .build()
//!     .unwrap();
//! let state = StateStore::new();
//! let mut ctl = Controller::new();
//!
//! ctl.handle(&UiEvent::click("L1"), &topo, &state).unwrap();
//! let panel = ctl.panel(&state).unwrap();
//! assert!(panel.is_enabled(PanelAction::Open));
//! assert!(!panel.is_enabled(PanelAction::Close));
//!
//! let out = ctl.handle(&UiEvent::Action(PanelAction::Open), &topo, &state).unwrap();
//! assert_eq!(out, Outcome::Dispatch(Command::switch("L1", SwitchAction::Open)));
//!
//! // Close is disabled for a closed line, so nothing is dispatched.
//! let out = ctl.handle(&UiEvent::Action(PanelAction::Close), &topo, &state).unwrap();
//! assert_eq!(out, Outcome::Ignored);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod affordance;
mod bulk;
mod controller;
mod event;
mod panel;

pub use affordance::Affordances;
pub use bulk::{BulkAction, BulkPanel, LineSelector};
pub use controller::{Controller, Mode, Outcome, transition};
pub use event::{Gesture, PanelAction, UiEvent};
pub use panel::{ActionPanel, status_text};
