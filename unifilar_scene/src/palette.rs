// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colours and fixed dimensions of the diagram.

use peniko::Color;
use unifilar_model::LineState;

/// Stroke width of a line segment.
pub const LINE_WIDTH: f64 = 3.0;
/// Side of the square switch glyph.
pub const SWITCH_SIZE: f64 = 12.0;
/// Distance between a line's midpoint and its label baseline.
pub const LINE_LABEL_OFFSET: f64 = 10.0;
/// Stroke width of a transformer connector.
pub const CONNECTOR_WIDTH: f64 = 1.5;
/// Dash pattern of a transformer connector.
pub const CONNECTOR_DASH: [f64; 2] = [4.0, 3.0];
/// Side of the transformer triangle.
pub const MARKER_SIZE: f64 = 10.0;
/// Outline width of the transformer triangle.
pub const MARKER_OUTLINE_WIDTH: f64 = 1.0;
/// Distance between the lower-voltage bus and the transformer label baseline.
pub const MARKER_LABEL_OFFSET: f64 = 12.0;

/// Semantic colour of a line segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineColor {
    /// Open or faulted.
    Alert,
    /// Closed, healthy and fed.
    Active,
    /// Closed, healthy and not fed.
    Neutral,
}

impl LineColor {
    /// Classifies a line state.
    ///
    /// `fault || open` wins over `energized`, which wins over neutral.
    #[must_use]
    pub fn for_state(state: &LineState) -> Self {
        if state.fault || state.open {
            Self::Alert
        } else if state.energized {
            Self::Active
        } else {
            Self::Neutral
        }
    }
}

/// Visual state of a switch glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwitchGlyph {
    /// The line's switch is open.
    Open,
    /// The line's switch is closed.
    Closed,
}

impl SwitchGlyph {
    /// Glyph for a line state.
    #[must_use]
    pub fn for_state(state: &LineState) -> Self {
        if state.open { Self::Open } else { Self::Closed }
    }

    /// Style class name: `open` or `closed`.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// The colours used by the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Canvas background.
    pub background: Color,
    /// Open or faulted line.
    pub alert: Color,
    /// Energized line.
    pub active: Color,
    /// De-energized line.
    pub neutral: Color,
    /// Fill of a closed switch glyph.
    pub switch_closed: Color,
    /// Fill of an open switch glyph.
    pub switch_open: Color,
    /// Outline of switch glyphs.
    pub switch_outline: Color,
    /// Line and transformer label text.
    pub label: Color,
    /// Transformer connector and marker outline.
    pub transformer: Color,
    /// Transformer marker fill.
    pub marker: Color,
}

impl Palette {
    /// Resolves a semantic line colour.
    #[must_use]
    pub fn line(&self, color: LineColor) -> Color {
        match color {
            LineColor::Alert => self.alert,
            LineColor::Active => self.active,
            LineColor::Neutral => self.neutral,
        }
    }

    /// Fill of a switch glyph.
    #[must_use]
    pub fn switch(&self, glyph: SwitchGlyph) -> Color {
        match glyph {
            SwitchGlyph::Open => self.switch_open,
            SwitchGlyph::Closed => self.switch_closed,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::from_rgb8(0x00, 0x00, 0x00),
            alert: Color::from_rgb8(0xff, 0x51, 0x63),
            active: Color::from_rgb8(0x00, 0xe6, 0x76),
            neutral: Color::from_rgb8(0x6b, 0x72, 0x80),
            switch_closed: Color::from_rgb8(0xe5, 0xe7, 0xeb),
            switch_open: Color::from_rgb8(0x00, 0x00, 0x00),
            switch_outline: Color::from_rgb8(0xe5, 0xe7, 0xeb),
            label: Color::from_rgb8(0xd1, 0xd5, 0xdb),
            transformer: Color::from_rgb8(0x9c, 0xa3, 0xaf),
            marker: Color::from_rgb8(0xe5, 0xe7, 0xeb),
        }
    }
}
