// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=unifilar_scene --heading-base-level=0

//! Unifilar Scene: the retained drawing of a distribution network.
//!
//! A [`Renderer`] turns a [`Topology`](unifilar_model::Topology), the current
//! [`StateStore`](unifilar_model::StateStore), and a
//! [`Projector`](unifilar_projection::Projector) into a flat list of
//! [`Element`]s, and swaps that list into a single [`DrawingGroup`] in one
//! step. There is no incremental update: every redraw is a full rebuild.
//!
//! Paint order is fixed:
//! 1. the background rectangle covering the canvas,
//! 2. for each line in topology order, its segment, switch glyph, and label,
//! 3. for each transformer, its dashed connector, triangle marker, and label.
//!
//! Segment colour follows [`LineColor::for_state`]; the glyph class follows
//! [`SwitchGlyph::for_state`]. Segments and glyphs carry a
//! [`ClickTarget::SelectLine`]; nothing else is interactive.
//!
//! The group can be hit tested in canvas coordinates with
//! [`DrawingGroup::hit_test`] and exported with [`svg::to_svg`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use unifilar_model::{StateStore, Topology};
//! use unifilar_projection::{Canvas, Projector};
//! use unifilar_scene::{ClickTarget, DrawingGroup, HitParams, Renderer};
//!
//! let topo = Topology::builder()
//!     .bus("A", 0.0, 0.0)
//!     .bus("B", 10.0, 0.0)
//!     .line("L1", "A", "B")
//!     .build()
//!     .unwrap();
//! let proj = Projector::new(topo.bus_positions(), Canvas::default());
//! let state = StateStore::new();
//!
//! let mut group = DrawingGroup::new();
//! Renderer::default().render(&mut group, &topo, &state, &proj).unwrap();
//! assert_eq!(group.elements().len(), 4);
//!
//! // The switch glyph sits at the midpoint of the segment.
//! let hit = group.hit_test(Point::new(800.0, 860.0), &HitParams::default());
//! assert_eq!(hit, Some(&ClickTarget::SelectLine("L1".into())));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod element;
mod group;
mod palette;
mod render;
pub mod svg;

pub use element::{ClickTarget, Element, ElementKey, HitParams, Shape, Stroke, Style};
pub use group::{DrawingGroup, VIEWPORT_GROUP_ID};
pub use palette::{
    CONNECTOR_DASH, CONNECTOR_WIDTH, LINE_LABEL_OFFSET, LINE_WIDTH, LineColor, MARKER_LABEL_OFFSET,
    MARKER_OUTLINE_WIDTH, MARKER_SIZE, Palette, SWITCH_SIZE, SwitchGlyph,
};
pub use render::Renderer;
