// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for [`Session`] against an in-memory authority.
//!
//! `Grid` behaves like the remote service: a set of normally open ties, faults
//! that force their line open, energization traced from a source bus, and a
//! reset that restores the defaults. Knobs let a test make reads blank, make
//! commands or reads fail, or make the solver report an error.

use std::collections::{BTreeMap, BTreeSet};

use kurbo::{Point, Vec2};
use unifilar_client::{ClientError, CommandError, StateAuthority};
use unifilar_interaction::{BulkAction, Gesture, Outcome, PanelAction, UiEvent};
use unifilar_model::wire::{HealthWire, StateWire, TopologyWire};
use unifilar_model::{
    BusState, Command, FaultAction, LineState, LookupError, SwitchAction,
};
use unifilar_projection::CanvasError;
use unifilar_scene::{ElementKey, Palette};
use unifilar_session::{LoadError, RefreshError, Session, SessionConfig, SessionError};

#[derive(Debug, Default)]
struct Grid {
    topology: TopologyWire,
    source: String,
    default_open: BTreeSet<String>,
    open: BTreeSet<String>,
    fault: BTreeSet<String>,
    /// Answer state reads with no entries at all.
    blank: bool,
    fail_topology: Option<ClientError>,
    fail_commands: Option<CommandError>,
    fail_state: Option<ClientError>,
    solver_error: Option<String>,
    issued: Vec<Command>,
    state_reads: usize,
}

fn triple(name: &str, a: &str, b: &str) -> (String, String, String) {
    (name.into(), a.into(), b.into())
}

impl Grid {
    /// Two buses and one line, reporting no state until told otherwise.
    fn two_bus() -> Self {
        let mut buses = BTreeMap::new();
        buses.insert("A".to_owned(), [0.0, 0.0]);
        buses.insert("B".to_owned(), [10.0, 0.0]);
        Self {
            topology: TopologyWire {
                buses,
                lines: vec![triple("L1", "A", "B")],
                trafos: vec![],
            },
            source: "A".into(),
            blank: true,
            ..Self::default()
        }
    }

    /// A substation feeding two branches tied together by RCL-04 and RCL-05,
    /// both normally open.
    fn feeder() -> Self {
        let mut buses = BTreeMap::new();
        for (name, lng, lat) in [
            ("SE", 0.0, 0.0),
            ("B1", 1.0, 0.0),
            ("B2", 2.0, 0.0),
            ("B3", 2.0, 1.0),
            ("B4", 1.0, 1.0),
            ("B2-LV", 2.2, -0.3),
        ] {
            buses.insert(name.to_owned(), [lng, lat]);
        }
        let default_open: BTreeSet<String> = ["RCL-04", "RCL-05"].map(String::from).into();
        Self {
            topology: TopologyWire {
                buses,
                lines: vec![
                    triple("L1", "SE", "B1"),
                    triple("L2", "B1", "B2"),
                    triple("RCL-04", "B2", "B3"),
                    triple("L3", "SE", "B4"),
                    triple("RCL-05", "B4", "B3"),
                ],
                trafos: vec![triple("T1", "B2", "B2-LV")],
            },
            source: "SE".into(),
            open: default_open.clone(),
            default_open,
            ..Self::default()
        }
    }

    fn solve(&self) -> StateWire {
        if let Some(message) = &self.solver_error {
            return StateWire {
                error: Some(message.clone()),
                ..StateWire::default()
            };
        }
        if self.blank {
            return StateWire::default();
        }
        let out: BTreeSet<&String> = self.open.union(&self.fault).collect();

        let mut energized: BTreeSet<&str> = BTreeSet::from([self.source.as_str()]);
        loop {
            let before = energized.len();
            let live_lines = self
                .topology
                .lines
                .iter()
                .filter(|(name, ..)| !out.contains(name));
            for (_, a, b) in live_lines.chain(self.topology.trafos.iter()) {
                if energized.contains(a.as_str()) || energized.contains(b.as_str()) {
                    energized.insert(a);
                    energized.insert(b);
                }
            }
            if energized.len() == before {
                break;
            }
        }

        let lines = self
            .topology
            .lines
            .iter()
            .map(|(name, a, b)| {
                let open = out.contains(name);
                let state = LineState {
                    open,
                    energized: !open
                        && energized.contains(a.as_str())
                        && energized.contains(b.as_str()),
                    fault: self.fault.contains(name),
                    from: Some(a.clone()),
                    to: Some(b.clone()),
                };
                (name.clone(), state)
            })
            .collect();
        let buses = self
            .topology
            .buses
            .keys()
            .map(|name| {
                let state = BusState {
                    energized: energized.contains(name.as_str()),
                };
                (name.clone(), state)
            })
            .collect();
        StateWire {
            lines,
            buses,
            open: self.open.iter().cloned().collect(),
            fault: self.fault.iter().cloned().collect(),
            error: None,
        }
    }
}

impl StateAuthority for Grid {
    fn topology(&mut self) -> Result<TopologyWire, ClientError> {
        match &self.fail_topology {
            Some(err) => Err(err.clone()),
            None => Ok(self.topology.clone()),
        }
    }

    fn state(&mut self) -> Result<StateWire, ClientError> {
        self.state_reads += 1;
        match &self.fail_state {
            Some(err) => Err(err.clone()),
            None => Ok(self.solve()),
        }
    }

    fn issue(&mut self, command: &Command) -> Result<(), CommandError> {
        if let Some(err) = &self.fail_commands {
            return Err(err.clone());
        }
        if let Some(line) = command.line() {
            if !self.topology.lines.iter().any(|(name, ..)| name == line) {
                return Err(CommandError::http(404, format!("unknown line {line}")));
            }
        }
        self.issued.push(command.clone());
        match command {
            Command::Switch { line, action } => match action {
                SwitchAction::Open => {
                    self.open.insert(line.clone());
                }
                SwitchAction::Close => {
                    self.open.remove(line);
                }
            },
            Command::Fault { line, action } => match action {
                FaultAction::Apply => {
                    self.fault.insert(line.clone());
                }
                FaultAction::Clear => {
                    self.fault.remove(line);
                }
            },
            Command::Reset => {
                self.open = self.default_open.clone();
                self.fault.clear();
            }
        }
        Ok(())
    }

    fn health(&mut self) -> Result<HealthWire, ClientError> {
        Ok(HealthWire {
            ok: true,
            service: "grid".into(),
        })
    }
}

fn booted(grid: Grid) -> Session<Grid> {
    let mut session = Session::new(grid, SessionConfig::default());
    session.boot().unwrap();
    session
}

fn segment_color(session: &Session<Grid>, line: &str) -> peniko::Color {
    let key = ElementKey::Segment(line.into());
    session.group().get(&key).unwrap().style.stroke.unwrap().color
}

fn glyph_class(session: &Session<Grid>, line: &str) -> &'static str {
    let key = ElementKey::Switch(line.into());
    session.group().get(&key).unwrap().style.class.unwrap()
}

#[test]
fn boot_renders_fits_and_populates_selectors() {
    let session = booted(Grid::feeder());

    assert!(session.is_loaded());
    // Background, three elements per line, three per transformer.
    assert_eq!(session.group().elements().len(), 1 + 3 * 5 + 3);
    assert_eq!(session.refresh_count(), 1);
    assert_eq!(session.redraw_count(), 1);
    assert!(session.log().is_empty());
    assert_eq!(session.target(), None);

    let vp = session.viewport().unwrap();
    assert!(vp.is_active());

    let bulk = session.bulk().unwrap();
    assert_eq!(
        bulk.switching.options(),
        ["L1", "L2", "RCL-04", "L3", "RCL-05"]
    );
    assert_eq!(bulk.fault.selected(), Some("L1"));

    let palette = Palette::default();
    assert_eq!(segment_color(&session, "L1"), palette.active);
    assert_eq!(segment_color(&session, "RCL-04"), palette.alert);
    assert_eq!(glyph_class(&session, "RCL-05"), "sw open");
}

#[test]
fn selecting_and_opening_a_line_end_to_end() {
    let mut session = booted(Grid::two_bus());
    let palette = Palette::default();

    // No state entry: neutral and closed.
    assert_eq!(segment_color(&session, "L1"), palette.neutral);
    assert_eq!(glyph_class(&session, "L1"), "sw closed");

    // Click the middle of the segment.
    let mid = Point::new(800.0, 860.0);
    let view_pt = session.viewport().unwrap().canvas_to_view(mid);
    let out = session.click(view_pt, Gesture::Click).unwrap();
    assert_eq!(out, Outcome::PanelOpened("L1".into()));

    let panel = session.panel().unwrap();
    assert_eq!(panel.title, "Actions – L1");
    assert!(panel.is_enabled(PanelAction::Open));
    assert!(!panel.is_enabled(PanelAction::Close));

    session.authority_mut().blank = false;
    let out = session.panel_action(PanelAction::Open).unwrap();
    assert_eq!(
        out,
        Outcome::Dispatch(Command::switch("L1", SwitchAction::Open))
    );
    assert_eq!(
        session.authority().issued,
        [Command::switch("L1", SwitchAction::Open)]
    );

    // Exactly one refresh and one redraw.
    assert_eq!(session.refresh_count(), 2);
    assert_eq!(session.redraw_count(), 2);
    assert_eq!(session.group().generation(), 2);

    assert_eq!(segment_color(&session, "L1"), palette.alert);
    assert_eq!(glyph_class(&session, "L1"), "sw open");

    // The panel stays on L1 and its gating flips.
    assert_eq!(session.target(), Some("L1"));
    let panel = session.panel().unwrap();
    assert!(!panel.is_enabled(PanelAction::Open));
    assert!(panel.is_enabled(PanelAction::Close));
    assert!(panel.status.starts_with("State: OPEN"));

    assert_eq!(session.log().latest().unwrap().message, "OPEN L1");
}

#[test]
fn disabled_action_sends_nothing() {
    let mut session = booted(Grid::feeder());
    session.handle_event(&UiEvent::click("L1")).unwrap();

    // L1 is closed, so Close is disabled.
    let out = session.panel_action(PanelAction::Close).unwrap();
    assert_eq!(out, Outcome::Ignored);
    assert!(session.authority().issued.is_empty());
    assert_eq!(session.refresh_count(), 1);
    assert_eq!(session.redraw_count(), 1);
}

#[test]
fn actions_while_idle_are_ignored() {
    let mut session = booted(Grid::feeder());
    let out = session.panel_action(PanelAction::Open).unwrap();
    assert_eq!(out, Outcome::Ignored);
    assert!(session.authority().issued.is_empty());
}

#[test]
fn dismissal_closes_the_panel() {
    let mut session = booted(Grid::feeder());
    session.handle_event(&UiEvent::click("L2")).unwrap();
    let out = session.handle_event(&UiEvent::Escape).unwrap();
    assert_eq!(out, Outcome::PanelClosed);
    assert!(session.panel().is_none());
}

#[test]
fn clicking_empty_canvas_dismisses() {
    let mut session = booted(Grid::feeder());
    let empty = Point::new(3.0, 3.0);
    assert_eq!(session.click(empty, Gesture::Click).unwrap(), Outcome::Ignored);

    session.handle_event(&UiEvent::click("L1")).unwrap();
    let out = session.click(empty, Gesture::Click).unwrap();
    assert_eq!(out, Outcome::PanelClosed);
    assert_eq!(session.target(), None);
}

#[test]
fn closing_a_tie_energizes_the_far_branch() {
    let mut session = booted(Grid::feeder());
    let palette = Palette::default();
    assert_eq!(session.state().bus("B3").map(|b| b.energized), Some(false));

    session
        .handle_event(&UiEvent::Select {
            line: "RCL-04".into(),
            gesture: Gesture::ContextMenu,
        })
        .unwrap();
    session.panel_action(PanelAction::Close).unwrap();

    assert_eq!(session.state().bus("B3").map(|b| b.energized), Some(true));
    assert_eq!(segment_color(&session, "RCL-04"), palette.active);
    // RCL-05 is still open.
    assert_eq!(segment_color(&session, "RCL-05"), palette.alert);
}

#[test]
fn fault_forces_the_line_open_and_gates_clear() {
    let mut session = booted(Grid::feeder());
    session.handle_event(&UiEvent::click("L2")).unwrap();
    session.panel_action(PanelAction::ApplyFault).unwrap();

    let st = session.state().line("L2");
    assert!(st.open && st.fault && !st.energized);
    let panel = session.panel().unwrap();
    assert_eq!(
        [
            panel.is_enabled(PanelAction::Open),
            panel.is_enabled(PanelAction::Close),
            panel.is_enabled(PanelAction::ApplyFault),
            panel.is_enabled(PanelAction::ClearFault),
        ],
        [false, true, false, true]
    );
    assert_eq!(session.log().latest().unwrap().message, "FAULT L2");
}

#[test]
fn failed_command_changes_nothing_but_the_log() {
    let mut session = booted(Grid::feeder());
    session.handle_event(&UiEvent::click("L1")).unwrap();
    let generation = session.group().generation();
    session.authority_mut().fail_commands = Some(CommandError::http(500, "solver busy"));

    let err = session.panel_action(PanelAction::Open).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Command {
            source: CommandError {
                status: Some(500),
                ..
            },
            ..
        }
    ));

    assert_eq!(session.refresh_count(), 1);
    assert_eq!(session.redraw_count(), 1);
    assert_eq!(session.group().generation(), generation);
    assert_eq!(session.target(), Some("L1"));
    assert!(!session.state().line("L1").open);

    assert_eq!(session.log().len(), 1);
    assert_eq!(
        session.log().latest().unwrap().message,
        "OPEN L1 failed: 500 solver busy"
    );
}

#[test]
fn failed_refresh_keeps_previous_state() {
    let mut session = booted(Grid::feeder());
    session.handle_event(&UiEvent::click("L1")).unwrap();
    session.authority_mut().solver_error = Some("power flow did not converge".into());

    let err = session.panel_action(PanelAction::Open).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Refresh(RefreshError::Remote(_))
    ));

    // The command went through, but the old state is kept and not redrawn.
    assert_eq!(session.authority().issued.len(), 1);
    assert_eq!(session.refresh_count(), 2);
    assert_eq!(session.redraw_count(), 1);
    assert!(!session.state().line("L1").open);

    let messages: Vec<&str> = session
        .log()
        .entries()
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("Refresh failed: "));
    assert_eq!(messages[1], "OPEN L1");
}

#[test]
fn bulk_actions_leave_the_target_alone() {
    let mut session = booted(Grid::feeder());
    session.handle_event(&UiEvent::click("L1")).unwrap();

    session.select_switching_line("RCL-05").unwrap();
    let sent = session.bulk_action(BulkAction::Close).unwrap();
    assert_eq!(sent, Some(Command::switch("RCL-05", SwitchAction::Close)));
    assert_eq!(session.target(), Some("L1"));
    assert!(!session.state().line("RCL-05").open);

    session.select_fault_line("L3").unwrap();
    session.bulk_action(BulkAction::ApplyFault).unwrap();
    assert!(session.state().line("L3").fault);
    assert_eq!(session.refresh_count(), 3);
    assert_eq!(session.redraw_count(), 3);
}

#[test]
fn selecting_an_unknown_bulk_line_is_logged() {
    let mut session = booted(Grid::feeder());
    let err = session.select_switching_line("nope").unwrap_err();
    assert_eq!(err, SessionError::Lookup(LookupError::UnknownLine("nope".into())));
    assert_eq!(session.bulk().unwrap().switching.selected(), Some("L1"));
    assert_eq!(session.log().len(), 1);
}

#[test]
fn reset_then_blank_refresh_restores_defaults() {
    let mut session = booted(Grid::feeder());
    session.select_fault_line("L2").unwrap();
    session.bulk_action(BulkAction::ApplyFault).unwrap();
    assert!(session.state().line("L2").fault);

    session.authority_mut().blank = true;
    session.bulk_action(BulkAction::Reset).unwrap();

    let palette = Palette::default();
    for line in ["L1", "L2", "RCL-04", "L3", "RCL-05"] {
        assert_eq!(session.state().line(line), &LineState::default());
        assert_eq!(segment_color(&session, line), palette.neutral);
        assert_eq!(glyph_class(&session, line), "sw closed");
    }
    assert!(session.authority().fault.is_empty());
    assert_eq!(session.log().latest().unwrap().message, "RESET");
}

#[test]
fn startup_failure_does_not_render() {
    let mut grid = Grid::feeder();
    grid.fail_topology = Some(CommandError::transport("connection refused").into());
    let mut session = Session::new(grid, SessionConfig::default());

    let err = session.boot().unwrap_err();
    assert!(matches!(err, LoadError::Topology(_)));
    assert!(!session.is_loaded());
    assert!(session.group().is_empty());
    assert!(session.viewport().is_none());
    assert_eq!(
        session.log().latest().unwrap().message,
        "Startup failed: topology: connection refused"
    );

    // Handlers refuse to run until a boot succeeds.
    let err = session.handle_event(&UiEvent::click("L1")).unwrap_err();
    assert_eq!(err, SessionError::NotLoaded);
}

#[test]
fn dangling_bus_is_a_load_error() {
    let mut grid = Grid::feeder();
    grid.topology.lines.push(triple("L9", "B1", "NOWHERE"));
    let mut session = Session::new(grid, SessionConfig::default());
    let err = session.boot().unwrap_err();
    assert_eq!(err, LoadError::Lookup(LookupError::UnknownBus("NOWHERE".into())));
    assert_eq!(session.authority().state_reads, 0);
}

#[test]
fn canvas_without_content_area_fails_boot() {
    let config: SessionConfig =
        serde_json::from_str(r#"{"width": 100, "height": 100, "margin": 80}"#).unwrap();
    let mut session = Session::new(Grid::two_bus(), config);

    let err = session.boot().unwrap_err();
    assert_eq!(
        err,
        LoadError::Canvas(CanvasError::NoContentArea {
            width: 100.0,
            height: 100.0,
            margin: 80.0,
        })
    );
    assert!(!session.is_loaded());
    assert!(session.projector().is_none());
    assert_eq!(session.authority().state_reads, 0);
    assert_eq!(
        session.log().latest().unwrap().message,
        "Startup failed: a 100 x 100 canvas has no room inside a margin of 80"
    );
}

#[test]
fn redraws_leave_the_view_transform_alone() {
    let mut session = booted(Grid::feeder());
    let vp = session.viewport_mut().unwrap();
    vp.zoom_about(Point::new(100.0, 100.0), 2.0);
    vp.pan_by(Vec2::new(-30.0, 12.0));
    let view = session.view_transform();

    session.handle_event(&UiEvent::click("L1")).unwrap();
    session.panel_action(PanelAction::Open).unwrap();
    assert_eq!(session.redraw_count(), 2);
    assert_eq!(session.view_transform(), view);

    session.bulk_action(BulkAction::Reset).unwrap();
    assert_eq!(session.redraw_count(), 3);
    assert_eq!(session.view_transform(), view);

    session.refresh().unwrap();
    assert_eq!(session.view_transform(), view);
}

#[test]
fn click_tolerance_is_constant_on_screen() {
    let mut session = booted(Grid::two_bus());
    // L1 runs along y = 860 with a 3 unit stroke.
    let near = Point::new(400.0, 863.0);
    let farther = Point::new(400.0, 865.0);

    session.viewport_mut().unwrap().zoom_about(Point::new(400.0, 860.0), 4.0);
    let view_pt = session.viewport().unwrap().canvas_to_view(near);
    session.click(view_pt, Gesture::Click).unwrap();
    assert_eq!(session.target(), None);

    session.fit_view();
    session.viewport_mut().unwrap().zoom_about(Point::new(400.0, 860.0), 0.5);
    let view_pt = session.viewport().unwrap().canvas_to_view(farther);
    let out = session.click(view_pt, Gesture::Click).unwrap();
    assert_eq!(out, Outcome::PanelOpened("L1".into()));
}

#[test]
fn reboot_destroys_the_previous_viewport() {
    let mut session = booted(Grid::feeder());
    session.handle_event(&UiEvent::click("L1")).unwrap();
    session.viewport_mut().unwrap().zoom_about(Point::new(100.0, 100.0), 2.0);
    let zoomed = session.view_transform();

    session.boot().unwrap();
    assert_eq!(session.target(), None);
    assert_ne!(session.view_transform(), zoomed);
    assert!(session.viewport().unwrap().is_active());
    assert_eq!(session.redraw_count(), 2);
}

#[test]
fn manual_refresh_redraws_once() {
    let mut session = booted(Grid::feeder());
    session.authority_mut().open.remove("RCL-04");
    session.refresh().unwrap();
    assert_eq!(session.refresh_count(), 2);
    assert_eq!(session.redraw_count(), 2);
    assert!(!session.state().line("RCL-04").open);
}

#[test]
fn svg_wraps_the_drawing_in_the_viewport_group() {
    let session = booted(Grid::two_bus());
    let svg = session.to_svg();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"<g id="vp" transform="matrix("#));
    assert!(svg.contains(r#"data-line="L1""#));
}
