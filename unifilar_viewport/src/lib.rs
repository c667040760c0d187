// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=unifilar_viewport --heading-base-level=0

//! Unifilar Viewport: pan and zoom over the drawing group.
//!
//! The diagram is drawn in canvas coordinates into a single group; the
//! viewport owns the one transform that wraps that group. Redraws replace the
//! group's contents but never touch this transform, so the operator's pan and
//! zoom survive every refresh.
//!
//! [`Viewport`] is the narrow interface the rest of the system relies on:
//! [`fit`](Viewport::fit), [`center`](Viewport::center), and
//! [`destroy`](Viewport::destroy), plus read access to the transform.
//! [`PanZoom`] is the shipped implementation. It additionally supports zoom
//! about a point within limits, panning, double-click zoom, and conversion
//! between view and canvas coordinates.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use unifilar_viewport::{PanZoom, Viewport};
//!
//! let canvas = Rect::new(0.0, 0.0, 1600.0, 900.0);
//! let mut vp = PanZoom::new(canvas);
//! vp.set_content_bounds(Some(canvas));
//! vp.fit();
//! vp.center();
//!
//! // Zoom in on a point; it stays under the pointer.
//! let anchor = Point::new(400.0, 300.0);
//! let before = vp.view_to_canvas(anchor);
//! vp.zoom_about(anchor, 2.0);
//! assert!((vp.view_to_canvas(anchor) - before).hypot() < 1e-9);
//!
//! vp.destroy();
//! assert!(!vp.is_active());
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod modes;
mod pan_zoom;

pub use modes::FitMode;
pub use pan_zoom::PanZoom;

use kurbo::{Affine, Point, Vec2};

/// A pan/zoom controller wrapping the drawing group.
pub trait Viewport {
    /// Zooms so that the content bounds fit inside the view.
    fn fit(&mut self);

    /// Pans so that the content bounds are centred in the view, keeping the
    /// current zoom.
    fn center(&mut self);

    /// Detaches the viewport. Subsequent pan and zoom requests are ignored.
    fn destroy(&mut self);

    /// Returns `false` once [`Viewport::destroy`] has been called.
    fn is_active(&self) -> bool;

    /// The canvas-to-view transform applied to the drawing group.
    fn transform(&self) -> Affine;

    /// Zooms by `factor` keeping `anchor` (view coordinates) fixed.
    fn zoom_about(&mut self, anchor: Point, factor: f64);

    /// Pans by a delta in view coordinates.
    fn pan_by(&mut self, delta: Vec2);

    /// Converts a view point (for example a pointer position) into canvas
    /// coordinates.
    fn view_to_canvas(&self, pt: Point) -> Point {
        self.transform().inverse() * pt
    }

    /// Converts a canvas point into view coordinates.
    fn canvas_to_view(&self, pt: Point) -> Point {
        self.transform() * pt
    }
}
