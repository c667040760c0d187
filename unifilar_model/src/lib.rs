// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=unifilar_model --heading-base-level=0

//! Unifilar Model: the shared vocabulary of a distribution network view.
//!
//! This crate holds the plain data that every other Unifilar crate reads:
//! - [`Topology`]: the immutable set of buses, lines, and transformers loaded
//!   once at startup.
//! - [`StateStore`]: the per-line operational state, replaced wholesale every
//!   time the remote authority is re-read.
//! - [`Command`]: the control requests an operator can issue, together with
//!   the endpoint and payload each one maps to.
//! - [`wire`]: the JSON shapes exchanged with the remote authority.
//!
//! It does **not** talk to the network, project coordinates, or render
//! anything; those concerns live in `unifilar_client`, `unifilar_projection`
//! and `unifilar_scene`.
//!
//! ## Minimal example
//!
//! ```rust
//! use unifilar_model::{LineState, StateSnapshot, StateStore, Topology};
//!
//! let topology = Topology::builder()
//!     .bus("A", 0.0, 0.0)
//!     .bus("B", 10.0, 0.0)
//!     .line("L1", "A", "B")
//!     .build()
//!     .unwrap();
//! assert_eq!(topology.line_names().collect::<Vec<_>>(), ["L1"]);
//!
//! // A line with no state entry reads as closed, de-energized, and healthy.
//! let mut store = StateStore::new();
//! assert_eq!(store.line("L1"), &LineState::default());
//!
//! let mut snapshot = StateSnapshot::default();
//! snapshot.lines.insert("L1".into(), LineState { open: true, ..LineState::default() });
//! store.replace(snapshot);
//! assert!(store.line("L1").open);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod command;
mod error;
mod state;
mod topology;
pub mod wire;

pub use command::{Command, CommandPayload, Endpoint, FaultAction, SwitchAction};
pub use error::{LookupError, SnapshotError};
pub use state::{BusState, LineState, StateSnapshot, StateStore};
pub use topology::{Bus, GeoPoint, Line, Topology, TopologyBuilder, Transformer};
