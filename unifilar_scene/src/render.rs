// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Line, Point, Rect};
use unifilar_model::{LookupError, StateStore, Topology};
use unifilar_projection::Projector;

use crate::element::{ClickTarget, Element, ElementKey, Shape, Stroke, Style};
use crate::group::DrawingGroup;
use crate::palette::{
    CONNECTOR_DASH, CONNECTOR_WIDTH, LINE_LABEL_OFFSET, LINE_WIDTH, LineColor, MARKER_LABEL_OFFSET,
    MARKER_OUTLINE_WIDTH, MARKER_SIZE, Palette, SWITCH_SIZE, SwitchGlyph,
};

/// Builds the complete element list for a topology and state.
///
/// Rendering is a pure function of its inputs: two calls with the same
/// topology, state, and projector yield identical element lists.
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    /// Creates a renderer with the given palette.
    #[must_use]
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// The palette in use.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Clears `group` and rebuilds it from scratch.
    ///
    /// On error the group is left as it was.
    pub fn render(
        &self,
        group: &mut DrawingGroup,
        topology: &Topology,
        state: &StateStore,
        projector: &Projector,
    ) -> Result<(), LookupError> {
        let elements = self.build(topology, state, projector)?;
        group.replace(elements);
        Ok(())
    }

    /// Produces the element list in paint order: background, then every
    /// line (segment, switch glyph, label), then every transformer.
    pub fn build(
        &self,
        topology: &Topology,
        state: &StateStore,
        projector: &Projector,
    ) -> Result<Vec<Element>, LookupError> {
        let p = &self.palette;
        let mut out =
            Vec::with_capacity(1 + 3 * topology.lines().len() + 3 * topology.transformers().len());

        out.push(Element {
            key: ElementKey::Background,
            shape: Shape::Rect(projector.canvas().rect()),
            style: Style {
                fill: Some(p.background),
                ..Style::default()
            },
            target: None,
        });

        for line in topology.lines() {
            let a = projector.project(&line.from)?;
            let b = projector.project(&line.to)?;
            let st = state.line(&line.name);
            let mid = a.midpoint(b);
            let glyph = SwitchGlyph::for_state(st);

            out.push(Element {
                key: ElementKey::Segment(line.name.clone()),
                shape: Shape::Segment(Line::new(a, b)),
                style: Style {
                    stroke: Some(Stroke::solid(
                        p.line(LineColor::for_state(st)),
                        LINE_WIDTH,
                    )),
                    ..Style::default()
                },
                target: Some(ClickTarget::SelectLine(line.name.clone())),
            });
            out.push(Element {
                key: ElementKey::Switch(line.name.clone()),
                shape: Shape::Rect(Rect::from_center_size(mid, (SWITCH_SIZE, SWITCH_SIZE))),
                style: Style {
                    fill: Some(p.switch(glyph)),
                    stroke: Some(Stroke::solid(p.switch_outline, 1.0)),
                    class: Some(match glyph {
                        SwitchGlyph::Open => "sw open",
                        SwitchGlyph::Closed => "sw closed",
                    }),
                },
                target: Some(ClickTarget::SelectLine(line.name.clone())),
            });
            out.push(Element {
                key: ElementKey::LineLabel(line.name.clone()),
                shape: Shape::Text {
                    anchor: Point::new(mid.x, mid.y - LINE_LABEL_OFFSET),
                    text: line.name.clone(),
                },
                style: label_style(p),
                target: None,
            });
        }

        for trafo in topology.transformers() {
            let hv = projector.project(&trafo.hv_bus)?;
            let lv = projector.project(&trafo.lv_bus)?;

            out.push(Element {
                key: ElementKey::Connector(trafo.name.clone()),
                shape: Shape::Segment(Line::new(hv, lv)),
                style: Style {
                    stroke: Some(Stroke {
                        color: p.transformer,
                        width: CONNECTOR_WIDTH,
                        dash: Some(CONNECTOR_DASH),
                    }),
                    ..Style::default()
                },
                target: None,
            });
            out.push(Element {
                key: ElementKey::Marker(trafo.name.clone()),
                shape: Shape::triangle(lv, MARKER_SIZE),
                style: Style {
                    fill: Some(p.marker),
                    stroke: Some(Stroke::solid(p.transformer, MARKER_OUTLINE_WIDTH)),
                    class: None,
                },
                target: None,
            });
            out.push(Element {
                key: ElementKey::MarkerLabel(trafo.name.clone()),
                shape: Shape::Text {
                    anchor: Point::new(lv.x, lv.y - MARKER_LABEL_OFFSET),
                    text: trafo.name.clone(),
                },
                style: label_style(p),
                target: None,
            });
        }

        Ok(out)
    }
}

fn label_style(p: &Palette) -> Style {
    Style {
        fill: Some(p.label),
        stroke: None,
        class: Some("lbl"),
    }
}
