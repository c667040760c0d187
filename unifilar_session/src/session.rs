// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;

use kurbo::{Affine, Point};
use tracing::{debug, info, warn};
use unifilar_client::StateAuthority;
use unifilar_interaction::{
    ActionPanel, BulkAction, BulkPanel, Controller, Gesture, Outcome, PanelAction, UiEvent,
};
use unifilar_model::{Command, StateSnapshot, StateStore, Topology};
use unifilar_projection::Projector;
use unifilar_scene::{ClickTarget, DrawingGroup, HitParams, Renderer, svg};
use unifilar_viewport::{PanZoom, Viewport};

use crate::config::SessionConfig;
use crate::error::{LoadError, RefreshError, SessionError};
use crate::log::ActivityLog;

/// Everything derived from a successful topology load.
#[derive(Debug)]
struct Network {
    topology: Topology,
    projector: Projector,
    bulk: BulkPanel,
}

/// The application context.
///
/// A session owns the authority connection and every piece of view state:
/// topology, projector, state store, drawing group, controller, bulk
/// selectors, viewport, and activity log. Handlers take `&mut self` and run
/// to completion, so state never changes underneath one.
///
/// Every failure a handler meets is recorded in the [`ActivityLog`] (and
/// traced with `warn!`) before it is returned.
pub struct Session<A> {
    authority: A,
    config: SessionConfig,
    renderer: Renderer,
    hit: HitParams,
    network: Option<Network>,
    state: StateStore,
    group: DrawingGroup,
    controller: Controller,
    viewport: Option<Box<dyn Viewport>>,
    log: ActivityLog,
    refreshes: u64,
    redraws: u64,
}

impl<A: fmt::Debug> fmt::Debug for Session<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authority", &self.authority)
            .field("config", &self.config)
            .field("loaded", &self.network.is_some())
            .field("target", &self.controller.target())
            .field("generation", &self.group.generation())
            .field("refreshes", &self.refreshes)
            .field("redraws", &self.redraws)
            .finish_non_exhaustive()
    }
}

impl<A: StateAuthority> Session<A> {
    /// Creates an unloaded session. Call [`Session::boot`] before anything
    /// else.
    pub fn new(authority: A, config: SessionConfig) -> Self {
        let log = ActivityLog::with_capacity(config.log_capacity);
        Self {
            authority,
            config,
            renderer: Renderer::default(),
            hit: HitParams::default(),
            network: None,
            state: StateStore::new(),
            group: DrawingGroup::new(),
            controller: Controller::new(),
            viewport: None,
            log,
            refreshes: 0,
            redraws: 0,
        }
    }

    /// Replaces the renderer (for example to use a different palette).
    #[must_use]
    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Loads topology and state, renders, and installs a fitted viewport.
    ///
    /// Nothing is committed unless every step succeeds; on failure the
    /// session keeps whatever it had before and the log reads
    /// `Startup failed: …`. Booting again replaces the previous network,
    /// resets the target, and destroys the previous viewport.
    pub fn boot(&mut self) -> Result<(), LoadError> {
        self.load().inspect_err(|err| {
            warn!(error = %err, "startup failed");
            self.log.record(format!("Startup failed: {err}"));
        })
    }

    fn load(&mut self) -> Result<(), LoadError> {
        let canvas = self.config.canvas();
        canvas.validate()?;
        let topology = Topology::from_wire(self.authority.topology().map_err(LoadError::Topology)?)?;
        let projector = Projector::new(topology.bus_positions(), canvas);

        self.refreshes += 1;
        let snapshot = StateSnapshot::from_wire(self.authority.state().map_err(LoadError::State)?)?;
        let mut state = StateStore::new();
        state.replace(snapshot);

        let elements = self.renderer.build(&topology, &state, &projector)?;
        self.group.replace(elements);
        self.redraws += 1;

        info!(
            buses = topology.buses().len(),
            lines = topology.lines().len(),
            transformers = topology.transformers().len(),
            "network loaded"
        );
        self.state = state;
        self.controller = Controller::new();
        self.network = Some(Network {
            bulk: BulkPanel::from_topology(&topology),
            topology,
            projector,
        });

        let mut viewport = PanZoom::new(canvas.rect());
        viewport.set_content_bounds(Some(canvas.rect()));
        self.install_viewport(Box::new(viewport));
        Ok(())
    }

    /// Destroys the current viewport, if any, then installs `viewport`
    /// fitted and centred on the drawing.
    pub fn install_viewport(&mut self, mut viewport: Box<dyn Viewport>) {
        if let Some(mut previous) = self.viewport.take() {
            previous.destroy();
        }
        viewport.fit();
        viewport.center();
        self.viewport = Some(viewport);
    }

    /// Feeds one event through the controller and carries out its outcome.
    ///
    /// A dispatched command is sent, then the state is re-read and the
    /// drawing rebuilt exactly once each; the panel reads the fresh state on
    /// its next [`Session::panel`] call. A failed send changes nothing but
    /// the log.
    pub fn handle_event(&mut self, event: &UiEvent) -> Result<Outcome, SessionError> {
        let result = match &self.network {
            Some(net) => self.controller.handle(event, &net.topology, &self.state),
            None => return Err(self.fail(SessionError::NotLoaded)),
        };
        let outcome = result.map_err(|err| self.fail(err.into()))?;
        match &outcome {
            Outcome::PanelOpened(line) => debug!(%line, "panel opened"),
            Outcome::PanelClosed => debug!("panel closed"),
            Outcome::Dispatch(command) => self.dispatch(command)?,
            Outcome::Ignored => debug!(?event, "event ignored"),
        }
        Ok(outcome)
    }

    /// Hit-tests a view-space point and selects the line under it.
    ///
    /// The point is mapped through the viewport first, and the stroke
    /// tolerance is held constant in view units. A miss counts as an outside
    /// click and dismisses the panel.
    pub fn click(&mut self, view_pt: Point, gesture: Gesture) -> Result<Outcome, SessionError> {
        let (canvas_pt, hit) = match self.viewport.as_deref() {
            Some(vp) => (
                vp.view_to_canvas(view_pt),
                self.hit.at_zoom(vp.transform().determinant().abs().sqrt()),
            ),
            None => (view_pt, self.hit),
        };
        match self.group.hit_test(canvas_pt, &hit) {
            Some(ClickTarget::SelectLine(line)) => {
                let event = UiEvent::Select {
                    line: line.clone(),
                    gesture,
                };
                self.handle_event(&event)
            }
            None => self.handle_event(&UiEvent::DismissOverlay),
        }
    }

    /// Triggers a panel button.
    pub fn panel_action(&mut self, action: PanelAction) -> Result<Outcome, SessionError> {
        self.handle_event(&UiEvent::Action(action))
    }

    /// Triggers a bulk button, returning the command sent, if any.
    ///
    /// The target and panel are not touched.
    pub fn bulk_action(&mut self, action: BulkAction) -> Result<Option<Command>, SessionError> {
        let command = match &self.network {
            Some(net) => net.bulk.command(action),
            None => return Err(self.fail(SessionError::NotLoaded)),
        };
        if let Some(command) = &command {
            self.dispatch(command)?;
        }
        Ok(command)
    }

    /// Picks the line the bulk open and close buttons act on.
    pub fn select_switching_line(&mut self, line: &str) -> Result<(), SessionError> {
        let result = match &mut self.network {
            Some(net) => net.bulk.switching.select(line),
            None => return Err(self.fail(SessionError::NotLoaded)),
        };
        result.map_err(|err| self.fail(err.into()))
    }

    /// Picks the line the bulk fault buttons act on.
    pub fn select_fault_line(&mut self, line: &str) -> Result<(), SessionError> {
        let result = match &mut self.network {
            Some(net) => net.bulk.fault.select(line),
            None => return Err(self.fail(SessionError::NotLoaded)),
        };
        result.map_err(|err| self.fail(err.into()))
    }

    /// Re-reads the state and redraws.
    ///
    /// On failure the previous state and drawing are kept.
    pub fn refresh(&mut self) -> Result<(), SessionError> {
        if self.network.is_none() {
            return Err(self.fail(SessionError::NotLoaded));
        }
        self.refresh_state().map_err(|err| self.fail(err.into()))?;
        self.redraw()
    }

    /// Re-fits and re-centres the viewport.
    pub fn fit_view(&mut self) {
        if let Some(vp) = self.viewport.as_deref_mut() {
            vp.fit();
            vp.center();
        }
    }

    fn dispatch(&mut self, command: &Command) -> Result<(), SessionError> {
        let label = command.describe();
        debug!(command = %label, endpoint = command.endpoint().path(), "sending command");
        if let Err(source) = self.authority.issue(command) {
            return Err(self.fail(SessionError::Command {
                command: command.clone(),
                source,
            }));
        }
        info!(command = %label, "command accepted");
        self.log.record(label);
        self.refresh_state().map_err(|err| self.fail(err.into()))?;
        self.redraw()
    }

    fn refresh_state(&mut self) -> Result<(), RefreshError> {
        self.refreshes += 1;
        let snapshot = StateSnapshot::from_wire(self.authority.state()?)?;
        self.state.replace(snapshot);
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), SessionError> {
        let result = match &self.network {
            Some(net) => {
                self.renderer
                    .render(&mut self.group, &net.topology, &self.state, &net.projector)
            }
            None => return Err(self.fail(SessionError::NotLoaded)),
        };
        result.map_err(|err| self.fail(err.into()))?;
        self.redraws += 1;
        Ok(())
    }

    /// Records `err` in the activity log and hands it back.
    fn fail(&mut self, err: SessionError) -> SessionError {
        warn!(error = %err, "handler failed");
        let entry = match &err {
            SessionError::Load(e) => format!("Startup failed: {e}"),
            SessionError::Refresh(e) => format!("Refresh failed: {e}"),
            SessionError::Lookup(e) => format!("Rejected: {e}"),
            SessionError::NotLoaded | SessionError::Command { .. } => err.to_string(),
        };
        self.log.record(entry);
        err
    }

    /// The topology, once loaded.
    pub fn topology(&self) -> Option<&Topology> {
        self.network.as_ref().map(|net| &net.topology)
    }

    /// The projector, once loaded.
    pub fn projector(&self) -> Option<&Projector> {
        self.network.as_ref().map(|net| &net.projector)
    }

    /// The bulk selectors, once loaded.
    pub fn bulk(&self) -> Option<&BulkPanel> {
        self.network.as_ref().map(|net| &net.bulk)
    }

    /// Returns `true` after a successful [`Session::boot`].
    pub fn is_loaded(&self) -> bool {
        self.network.is_some()
    }

    /// The current state.
    pub fn state(&self) -> &StateStore {
        &self.state
    }

    /// The drawing.
    pub fn group(&self) -> &DrawingGroup {
        &self.group
    }

    /// The targeting state machine.
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// The targeted line, if any.
    pub fn target(&self) -> Option<&str> {
        self.controller.target()
    }

    /// The action panel for the target, built from the current state.
    pub fn panel(&self) -> Option<ActionPanel> {
        self.controller.panel(&self.state)
    }

    /// The installed viewport.
    pub fn viewport(&self) -> Option<&dyn Viewport> {
        self.viewport.as_deref()
    }

    /// The installed viewport, mutably.
    pub fn viewport_mut(&mut self) -> Option<&mut (dyn Viewport + 'static)> {
        self.viewport.as_deref_mut()
    }

    /// The transform applied to the drawing group.
    pub fn view_transform(&self) -> Affine {
        self.viewport
            .as_deref()
            .map_or(Affine::IDENTITY, |vp| vp.transform())
    }

    /// The activity log.
    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// The configuration the session was created with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The authority.
    pub fn authority(&self) -> &A {
        &self.authority
    }

    /// The authority, mutably.
    pub fn authority_mut(&mut self) -> &mut A {
        &mut self.authority
    }

    /// State reads attempted so far, including the one made at boot.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes
    }

    /// Completed redraws, including the one made at boot.
    pub fn redraw_count(&self) -> u64 {
        self.redraws
    }

    /// The drawing as an SVG document, wrapped in the viewport transform.
    pub fn to_svg(&self) -> String {
        svg::to_svg(&self.group, self.config.canvas(), self.view_transform())
    }
}
