// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

/// A canvas that cannot hold a projection.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum CanvasError {
    /// A dimension is NaN or infinite.
    #[error("canvas dimensions must be finite")]
    NotFinite,
    /// The margin is negative.
    #[error("canvas margin {0} is negative")]
    NegativeMargin(f64),
    /// The margins leave no room for content.
    #[error("a {width} x {height} canvas has no room inside a margin of {margin}")]
    NoContentArea {
        /// Canvas width.
        width: f64,
        /// Canvas height.
        height: f64,
        /// Canvas margin.
        margin: f64,
    },
}

/// Drawing surface dimensions in canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    /// Total width.
    pub width: f64,
    /// Total height.
    pub height: f64,
    /// Inset kept free on every side.
    pub margin: f64,
}

impl Canvas {
    /// Creates a canvas description.
    #[must_use]
    pub const fn new(width: f64, height: f64, margin: f64) -> Self {
        Self {
            width,
            height,
            margin,
        }
    }

    /// Checks that the content rectangle is finite and non-empty.
    ///
    /// A [`Projector`](crate::Projector) built from a canvas that fails this
    /// check places buses outside the canvas.
    pub fn validate(&self) -> Result<(), CanvasError> {
        if !(self.width.is_finite() && self.height.is_finite() && self.margin.is_finite()) {
            return Err(CanvasError::NotFinite);
        }
        if self.margin < 0.0 {
            return Err(CanvasError::NegativeMargin(self.margin));
        }
        if self.width <= 2.0 * self.margin || self.height <= 2.0 * self.margin {
            return Err(CanvasError::NoContentArea {
                width: self.width,
                height: self.height,
                margin: self.margin,
            });
        }
        Ok(())
    }

    /// The full canvas rectangle, `0,0` to `width,height`.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// The area buses are projected into: the canvas minus its margin.
    #[must_use]
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            self.width - self.margin,
            self.height - self.margin,
        )
    }
}

impl Default for Canvas {
    /// 1600 × 900 with a 40 unit margin.
    fn default() -> Self {
        Self::new(1600.0, 900.0, 40.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_canvas_is_valid() {
        assert_eq!(Canvas::default().validate(), Ok(()));
        assert_eq!(Canvas::new(81.0, 81.0, 40.0).validate(), Ok(()));
        assert_eq!(Canvas::new(10.0, 10.0, 0.0).validate(), Ok(()));
    }

    #[test]
    fn margins_must_leave_content_room() {
        assert_eq!(
            Canvas::new(100.0, 100.0, 80.0).validate(),
            Err(CanvasError::NoContentArea {
                width: 100.0,
                height: 100.0,
                margin: 80.0,
            })
        );
        assert!(matches!(
            Canvas::new(1600.0, 80.0, 40.0).validate(),
            Err(CanvasError::NoContentArea { .. })
        ));
        assert!(matches!(
            Canvas::new(0.0, 900.0, 0.0).validate(),
            Err(CanvasError::NoContentArea { .. })
        ));
        assert!(matches!(
            Canvas::new(-200.0, 900.0, 10.0).validate(),
            Err(CanvasError::NoContentArea { .. })
        ));
    }

    #[test]
    fn negative_or_non_finite_dimensions_are_rejected() {
        assert_eq!(
            Canvas::new(1600.0, 900.0, -5.0).validate(),
            Err(CanvasError::NegativeMargin(-5.0))
        );
        assert_eq!(
            Canvas::new(f64::NAN, 900.0, 40.0).validate(),
            Err(CanvasError::NotFinite)
        );
        assert_eq!(
            Canvas::new(1600.0, f64::INFINITY, 40.0).validate(),
            Err(CanvasError::NotFinite)
        );
    }
}
