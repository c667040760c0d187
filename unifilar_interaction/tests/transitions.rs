// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `unifilar_interaction` transition table.
//!
//! Every (mode, event) pair is checked against the expected next mode, so a
//! change to the table shows up here as a single failing row.

use unifilar_interaction::{Mode, Outcome, PanelAction, UiEvent, transition};
use unifilar_model::{LineState, StateSnapshot, StateStore, Topology};

fn topo() -> Topology {
    Topology::builder()
        .bus("A", 0.0, 0.0)
        .bus("B", 10.0, 0.0)
        .line("L1", "A", "B")
        .line("L2", "A", "B")
        .build()
        .unwrap()
}

fn faulted(line: &str) -> StateStore {
    let mut snap = StateSnapshot::default();
    snap.lines.insert(
        line.into(),
        LineState {
            fault: true,
            open: true,
            ..LineState::default()
        },
    );
    let mut store = StateStore::new();
    store.replace(snap);
    store
}

#[test]
fn table() {
    let topo = topo();
    let state = StateStore::new();
    let idle = Mode::Idle;
    let l1 = Mode::Targeted("L1".into());
    let l2 = Mode::Targeted("L2".into());

    let rows: Vec<(&Mode, UiEvent, Mode)> = vec![
        (&idle, UiEvent::click("L1"), l1.clone()),
        (&l2, UiEvent::click("L1"), l1.clone()),
        (&l1, UiEvent::click("L1"), l1.clone()),
        (&idle, UiEvent::Cancel, idle.clone()),
        (&idle, UiEvent::Escape, idle.clone()),
        (&idle, UiEvent::DismissOverlay, idle.clone()),
        (&l1, UiEvent::Cancel, idle.clone()),
        (&l1, UiEvent::Escape, idle.clone()),
        (&l1, UiEvent::DismissOverlay, idle.clone()),
        (&idle, UiEvent::Action(PanelAction::Open), idle.clone()),
        (&l1, UiEvent::Action(PanelAction::Open), l1.clone()),
        (&l1, UiEvent::Action(PanelAction::Close), l1.clone()),
        (&l1, UiEvent::Action(PanelAction::ApplyFault), l1.clone()),
        (&l1, UiEvent::Action(PanelAction::ClearFault), l1.clone()),
    ];
    for (from, event, expected) in rows {
        let (next, _) = transition(from, &event, &topo, &state).unwrap();
        assert_eq!(next, expected, "{from:?} --{event:?}-->");
    }
}

#[test]
fn faulted_open_line_offers_close_and_clear_only() {
    let topo = topo();
    let state = faulted("L2");
    let target = Mode::Targeted("L2".into());

    let dispatched: Vec<PanelAction> = PanelAction::ALL
        .into_iter()
        .filter(|action| {
            let (_, out) =
                transition(&target, &UiEvent::Action(*action), &topo, &state).unwrap();
            matches!(out, Outcome::Dispatch(_))
        })
        .collect();
    assert_eq!(dispatched, [PanelAction::Close, PanelAction::ClearFault]);
}
