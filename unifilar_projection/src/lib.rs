// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=unifilar_projection --heading-base-level=0

//! Unifilar Projection: geographic coordinates onto a bounded canvas.
//!
//! A [`Projector`] is built once from every bus position in a topology and a
//! [`Canvas`] description. It computes a single uniform scale so that the
//! bounding box of all buses fits inside the canvas minus its margin, with the
//! vertical axis flipped so that north is up:
//!
//! ```text
//! s = min((W - 2M) / dLng, (H - 2M) / dLat)
//! x = M + (lng - minLng) * s
//! y = H - (M + (lat - minLat) * s)
//! ```
//!
//! Spans are floored to [`MIN_SPAN`] so that a single bus, or buses sharing a
//! meridian, still produce a finite transform.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use unifilar_model::GeoPoint;
//! use unifilar_projection::{Canvas, Projector};
//!
//! let buses = [
//!     ("A", GeoPoint::new(0.0, 0.0)),
//!     ("B", GeoPoint::new(10.0, 0.0)),
//! ];
//! let proj = Projector::new(buses, Canvas::default());
//!
//! // A sits on the left margin, B on the right margin; both on the bottom margin.
//! assert_eq!(proj.project("A").unwrap(), Point::new(40.0, 860.0));
//! assert_eq!(proj.project("B").unwrap(), Point::new(1560.0, 860.0));
//! assert!(proj.project("C").is_err());
//! ```
//!
//! [`Canvas::validate`] rejects a canvas whose margins leave no content area;
//! projecting onto such a canvas yields points outside it.
//!
//! The projector is immutable; rebuilding it is the only way to account for a
//! different topology or canvas.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod canvas;
mod projector;

pub use canvas::{Canvas, CanvasError};
pub use projector::{MIN_SPAN, Projector};
