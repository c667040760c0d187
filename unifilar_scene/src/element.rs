// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Retained visual elements.

use alloc::string::String;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`
use kurbo::{Line, ParamCurveNearest, Point, Rect};
use peniko::Color;

/// Stable identity of an element across redraws.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKey {
    /// The full-canvas background rectangle.
    Background,
    /// The segment of the named line.
    Segment(String),
    /// The switch glyph of the named line.
    Switch(String),
    /// The name label of the named line.
    LineLabel(String),
    /// The dashed connector of the named transformer.
    Connector(String),
    /// The triangle marker of the named transformer.
    Marker(String),
    /// The name label of the named transformer.
    MarkerLabel(String),
}

/// Geometry of an element, in canvas coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis-aligned rectangle.
    Rect(Rect),
    /// Straight segment.
    Segment(Line),
    /// Closed triangle.
    Triangle([Point; 3]),
    /// Text centred horizontally on `anchor`, with its baseline at `anchor.y`.
    Text {
        /// Anchor point.
        anchor: Point,
        /// Displayed text.
        text: String,
    },
}

impl Shape {
    /// Equilateral triangle of side `size` centred on `center`, apex up.
    #[must_use]
    pub fn triangle(center: Point, size: f64) -> Self {
        let h = size * 3.0_f64.sqrt() / 2.0;
        Self::Triangle([
            Point::new(center.x, center.y - h),
            Point::new(center.x - size / 2.0, center.y + h / 2.0),
            Point::new(center.x + size / 2.0, center.y + h / 2.0),
        ])
    }
}

/// Outline paint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    /// Stroke colour.
    pub color: Color,
    /// Stroke width in canvas units.
    pub width: f64,
    /// Dash and gap lengths, if dashed.
    pub dash: Option<[f64; 2]>,
}

impl Stroke {
    /// A solid stroke.
    #[must_use]
    pub const fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dash: None,
        }
    }
}

/// Paint and classification of an element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Style {
    /// Interior paint.
    pub fill: Option<Color>,
    /// Outline paint.
    pub stroke: Option<Stroke>,
    /// Style classes, space separated (for example `sw open`).
    pub class: Option<&'static str>,
}

/// What activating an element asks the controller to do.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClickTarget {
    /// Select the named line.
    SelectLine(String),
}

/// Tolerances for [`Element::hit`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitParams {
    /// Extra distance beyond half the stroke width that still counts as a hit.
    pub stroke_tolerance: f64,
}

impl HitParams {
    /// Converts a tolerance given in view units into canvas units at `zoom`.
    ///
    /// Non-positive or non-finite zoom factors leave the tolerance unchanged.
    #[must_use]
    pub fn at_zoom(self, zoom: f64) -> Self {
        if zoom.is_finite() && zoom > 0.0 {
            Self {
                stroke_tolerance: self.stroke_tolerance / zoom,
            }
        } else {
            self
        }
    }
}

impl Default for HitParams {
    fn default() -> Self {
        Self {
            stroke_tolerance: 2.0,
        }
    }
}

/// One visual element of the drawing group.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    /// Stable identity.
    pub key: ElementKey,
    /// Geometry.
    pub shape: Shape,
    /// Paint.
    pub style: Style,
    /// Set on elements that respond to click and context-menu gestures.
    pub target: Option<ClickTarget>,
}

impl Element {
    /// Returns `true` if `pt` falls on this element.
    ///
    /// Segments are hit within half their stroke width plus
    /// [`HitParams::stroke_tolerance`] of the centreline; rectangles and
    /// triangles are hit inside their area. Text is never hit.
    #[must_use]
    pub fn hit(&self, pt: Point, params: &HitParams) -> bool {
        match &self.shape {
            Shape::Rect(rect) => rect.contains(pt),
            Shape::Segment(line) => {
                let half_width = self.style.stroke.map_or(0.0, |s| s.width / 2.0);
                let dist = line.nearest(pt, 0.).distance_sq.sqrt();
                dist <= half_width + params.stroke_tolerance
            }
            Shape::Triangle(points) => triangle_contains(points, pt),
            Shape::Text { .. } => false,
        }
    }
}

fn triangle_contains([a, b, c]: &[Point; 3], pt: Point) -> bool {
    let side = |p: Point, q: Point| (q - p).cross(pt - p);
    let (d1, d2, d3) = (side(*a, *b), side(*b, *c), side(*c, *a));
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}
