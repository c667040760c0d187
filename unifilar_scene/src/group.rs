// Copyright 2025 the Unifilar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Point;

use crate::element::{ClickTarget, Element, ElementKey, HitParams};

/// Identifier of the drawing group the viewport wraps.
pub const VIEWPORT_GROUP_ID: &str = "vp";

/// The single container every diagram element lives in.
///
/// Redraws replace the whole element list; the pan/zoom transform applied
/// to the group is owned by the viewport, not by the group, so it survives
/// redraws untouched.
///
/// A generation counter is bumped on every replacement so observers can tell
/// how many redraws happened.
#[derive(Clone, Debug)]
pub struct DrawingGroup {
    id: String,
    elements: Vec<Element>,
    generation: u64,
}

impl DrawingGroup {
    /// Creates an empty group with id [`VIEWPORT_GROUP_ID`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(VIEWPORT_GROUP_ID)
    }

    /// Creates an empty group with a custom id.
    #[must_use]
    pub fn with_id(id: &str) -> Self {
        Self {
            id: id.into(),
            elements: Vec::new(),
            generation: 0,
        }
    }

    /// The group id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Elements in paint order (first is bottom-most).
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Number of completed rebuilds.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` if the group holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Replaces every element at once.
    pub fn replace(&mut self, elements: Vec<Element>) {
        self.elements = elements;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Removes every element. Counts as a rebuild.
    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    /// Finds an element by key.
    #[must_use]
    pub fn get(&self, key: &ElementKey) -> Option<&Element> {
        self.elements.iter().find(|el| &el.key == key)
    }

    /// Topmost interactive element under `pt` (canvas coordinates).
    ///
    /// Non-interactive elements never block the ones beneath them.
    #[must_use]
    pub fn hit_test(&self, pt: Point, params: &HitParams) -> Option<&ClickTarget> {
        self.elements
            .iter()
            .rev()
            .filter_map(|el| el.target.as_ref().map(|target| (el, target)))
            .find(|(el, _)| el.hit(pt, params))
            .map(|(_, target)| target)
    }
}

impl Default for DrawingGroup {
    fn default() -> Self {
        Self::new()
    }
}
