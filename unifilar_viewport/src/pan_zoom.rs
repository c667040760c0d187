// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

use crate::Viewport;
use crate::modes::FitMode;

/// Default zoom limits.
const MIN_ZOOM: f64 = 0.5;
const MAX_ZOOM: f64 = 10.0;
/// Factor applied by one zoom step and by a double click.
const ZOOM_STEP: f64 = 1.2;

/// Uniform pan + zoom over the drawing group.
///
/// The transform maps canvas coordinates into the view rectangle:
/// `translate(view_origin + pan) * scale(zoom)`.
///
/// Zoom is clamped to `[0.5, 10]` by default. Once [`Viewport::destroy`] is
/// called every mutating operation becomes a no-op and the transform is
/// frozen at its last value.
#[derive(Clone, Debug)]
pub struct PanZoom {
    view_rect: Rect,
    content_bounds: Option<Rect>,
    zoom: f64,
    pan: Vec2,
    min_zoom: f64,
    max_zoom: f64,
    fit_mode: FitMode,
    double_click_zoom: bool,
    active: bool,
    canvas_to_view: Affine,
}

impl PanZoom {
    /// Creates an active viewport over `view_rect` at zoom `1.0` and no pan.
    #[must_use]
    pub fn new(view_rect: Rect) -> Self {
        let mut vp = Self {
            view_rect,
            content_bounds: None,
            zoom: 1.0,
            pan: Vec2::ZERO,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            fit_mode: FitMode::default(),
            double_click_zoom: true,
            active: true,
            canvas_to_view: Affine::IDENTITY,
        };
        vp.rebuild_transform();
        vp
    }

    /// The view rectangle.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    /// Sets the bounds that [`Viewport::fit`] and [`Viewport::center`] act on.
    pub fn set_content_bounds(&mut self, bounds: Option<Rect>) {
        self.content_bounds = bounds;
    }

    /// Current content bounds, if any.
    #[must_use]
    pub fn content_bounds(&self) -> Option<Rect> {
        self.content_bounds
    }

    /// Current zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pan offset in view coordinates.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Sets the zoom limits. The pair is normalized so that `min <= max` and
    /// the current zoom is clamped into the new range.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (lo, hi) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = lo;
        self.max_zoom = hi;
        let clamped = self.zoom.clamp(lo, hi);
        if clamped != self.zoom {
            let anchor = self.view_rect.center();
            self.zoom_about(anchor, clamped / self.zoom);
        }
    }

    /// Returns `(min, max)` zoom.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Sets how [`Viewport::fit`] positions content.
    pub fn set_fit_mode(&mut self, mode: FitMode) {
        self.fit_mode = mode;
    }

    /// Enables or disables [`PanZoom::double_click`].
    pub fn set_double_click_zoom(&mut self, enabled: bool) {
        self.double_click_zoom = enabled;
    }

    /// Handles a double click at `anchor`: one zoom step in, or out when
    /// `zoom_out` is set (shift-double-click).
    pub fn double_click(&mut self, anchor: Point, zoom_out: bool) {
        if !self.double_click_zoom {
            return;
        }
        let factor = if zoom_out { 1.0 / ZOOM_STEP } else { ZOOM_STEP };
        self.zoom_about(anchor, factor);
    }

    /// One zoom step in about the view centre.
    pub fn zoom_in(&mut self) {
        self.zoom_about(self.view_rect.center(), ZOOM_STEP);
    }

    /// One zoom step out about the view centre.
    pub fn zoom_out(&mut self) {
        self.zoom_about(self.view_rect.center(), 1.0 / ZOOM_STEP);
    }

    /// Returns to zoom `1.0` and no pan.
    pub fn reset(&mut self) {
        if !self.active {
            return;
        }
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
        self.pan = Vec2::ZERO;
        self.rebuild_transform();
    }

    fn rebuild_transform(&mut self) {
        let origin = self.view_rect.origin().to_vec2();
        self.canvas_to_view = Affine::translate(origin + self.pan) * Affine::scale(self.zoom);
    }
}

impl Viewport for PanZoom {
    fn fit(&mut self) {
        if !self.active {
            return;
        }
        let Some(bounds) = self.content_bounds else {
            return;
        };
        let view = self.view_rect.size();
        if bounds.width() <= 0.0
            || bounds.height() <= 0.0
            || view.width <= 0.0
            || view.height <= 0.0
        {
            return;
        }

        let zoom = (view.width / bounds.width())
            .min(view.height / bounds.height())
            .clamp(self.min_zoom, self.max_zoom);
        self.zoom = zoom;
        self.pan = match self.fit_mode {
            FitMode::AlignMin => -bounds.origin().to_vec2() * zoom,
            FitMode::Center => {
                let view_center = self.view_rect.center() - self.view_rect.origin();
                view_center - bounds.center().to_vec2() * zoom
            }
        };
        self.rebuild_transform();
    }

    fn center(&mut self) {
        if !self.active {
            return;
        }
        let Some(bounds) = self.content_bounds else {
            return;
        };
        let delta = self.view_rect.center() - self.canvas_to_view * bounds.center();
        self.pan_by(delta);
    }

    fn destroy(&mut self) {
        self.active = false;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn transform(&self) -> Affine {
        self.canvas_to_view
    }

    fn zoom_about(&mut self, anchor: Point, factor: f64) {
        if !self.active || factor <= 0.0 || !factor.is_finite() {
            return;
        }
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let fixed = self.view_to_canvas(anchor);
        self.zoom = new_zoom;
        self.rebuild_transform();
        let drift = anchor - self.canvas_to_view * fixed;
        self.pan += drift;
        self.rebuild_transform();
    }

    fn pan_by(&mut self, delta: Vec2) {
        if !self.active || delta == Vec2::ZERO {
            return;
        }
        self.pan += delta;
        self.rebuild_transform();
    }
}
